//! Rotations - player rotation analysis from basketball play-by-play feeds
//!
//! Rebuilds who was on court when from substitution events, then derives
//! minutes, plus/minus, possession-based ratings and a per-minute grid.

pub mod analytics;
pub mod error;
pub mod events;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod rotations;
pub mod settings;

pub use error::{ClockError, GameError, SettingsError};
pub use events::{ClockRules, Event, GameData, Player, Score, Team, TimedEvent, load_feeds};
pub use pipeline::{GameAnalysis, TeamAnalysis, analyze_game, analyze_games, init_parallel};
pub use report::{GameReport, format_summary};
pub use rotations::{PlayerRotation, Stint, TeamRotation};
pub use settings::AnalysisSettings;
