//! Play-by-play events, the game clock and the vendor feed parser

pub mod clock;
pub mod feed;
pub mod types;

pub use clock::{
    ClockRules, TimedEvent, absolute_time, correct_overtime_periods, parse_clock, timestamp_events,
};
pub use feed::{load_feeds, parse_all_feeds, parse_feed, parse_feed_content};
pub use types::{ActionType, Event, GameData, Player, Score, Substitution, Team};
