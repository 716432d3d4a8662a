//! Player rotations: stint reconstruction and per-player aggregation

mod aggregate;
mod stints;

pub use aggregate::{PlayerRotation, TeamRotation, order_rotations};
pub use stints::{ScoreTracker, Stint, StintBuilder, build_team_stints};
