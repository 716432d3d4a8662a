//! Analytics built on top of rotations
//!
//! Possession estimates and ratings, box scores, the minute grid and the
//! minutes check against the feed's box score.

mod boxscore;
pub mod possessions;
mod ratings;
pub mod timeline;
mod validation;

pub use boxscore::BoxScore;
pub use possessions::{EventIndex, FREE_THROW_FACTOR, PossessionCounts};
pub use ratings::{PlayerRating, StintRating, rate_player, rate_stint, rate_team};
pub use timeline::{
    MinuteCell, PeriodSegment, PlayerTimeline, TeamPlusMinus, lineups_per_minute, period_segments,
    player_timeline, team_plus_minus_per_minute, total_minutes,
};
pub use validation::{DEFAULT_MINUTES_TOLERANCE, MinutesCheck, check_minutes, parse_reported_minutes};
