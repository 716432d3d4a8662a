//! Per-player rotation records and display ordering

use std::cmp::Ordering;

use serde::Serialize;

use super::stints::Stint;
use crate::events::{Player, Team};

/// All stints of one player in one game
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRotation {
    pub shirt_number: String,
    pub player_name: String,
    pub team: Team,
    pub is_starter: bool,
    /// Sum of stint durations in seconds
    pub total_seconds: f64,
    /// Chronological, non-overlapping
    pub stints: Vec<Stint>,
}

impl PlayerRotation {
    pub fn new(player: &Player, mut stints: Vec<Stint>) -> Self {
        stints.sort_by(|a, b| a.time_in.total_cmp(&b.time_in));
        let total_seconds = stints.iter().map(Stint::duration).sum();
        Self {
            shirt_number: player.shirt_number.clone(),
            player_name: player.name.clone(),
            team: player.team,
            is_starter: player.is_starter,
            total_seconds,
            stints,
        }
    }

    pub fn minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    pub fn plus_minus(&self) -> i32 {
        self.stints.iter().map(Stint::plus_minus).sum()
    }

    pub fn played(&self) -> bool {
        self.total_seconds > 0.0
    }
}

/// Rotation of one team: ordered players plus those who did not play
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRotation {
    pub team: Team,
    /// Starters by minutes, then bench players who played, by minutes
    pub players: Vec<PlayerRotation>,
    /// Bench players with no court time
    pub did_not_play: Vec<PlayerRotation>,
}

impl TeamRotation {
    /// Group a team's stints per roster player and order the result
    pub fn from_stints<'a>(team: Team, roster: impl IntoIterator<Item = &'a Player>, stints: Vec<Stint>) -> Self {
        let roster: Vec<&Player> = roster.into_iter().filter(|p| p.team == team).collect();
        let mut per_player: Vec<Vec<Stint>> = vec![Vec::new(); roster.len()];

        for stint in stints {
            if let Some(idx) = roster.iter().position(|p| p.shirt_number == stint.shirt_number) {
                per_player[idx].push(stint);
            }
        }

        let rotations = roster
            .into_iter()
            .zip(per_player)
            .map(|(player, stints)| PlayerRotation::new(player, stints))
            .collect();

        let (players, did_not_play) = order_rotations(rotations);
        Self {
            team,
            players,
            did_not_play,
        }
    }

    pub fn get(&self, shirt_number: &str) -> Option<&PlayerRotation> {
        self.iter_all().find(|r| r.shirt_number == shirt_number)
    }

    /// Ordered players followed by those who did not play
    pub fn iter_all(&self) -> impl Iterator<Item = &PlayerRotation> {
        self.players.iter().chain(self.did_not_play.iter())
    }

    /// Total court time of the team; five players on court means five
    /// times the game length
    pub fn total_seconds(&self) -> f64 {
        self.players.iter().map(|r| r.total_seconds).sum()
    }
}

fn by_minutes_desc(a: &PlayerRotation, b: &PlayerRotation) -> Ordering {
    b.total_seconds
        .partial_cmp(&a.total_seconds)
        .unwrap_or(Ordering::Equal)
}

/// Split rotations into (ordered, did not play).
///
/// Starters come first by minutes descending, then bench players with court
/// time by minutes descending. Sorting is stable, so ties keep roster order.
pub fn order_rotations(rotations: Vec<PlayerRotation>) -> (Vec<PlayerRotation>, Vec<PlayerRotation>) {
    let (mut starters, bench): (Vec<_>, Vec<_>) = rotations.into_iter().partition(|r| r.is_starter);
    let (mut bench, did_not_play): (Vec<_>, Vec<_>) = bench.into_iter().partition(|r| r.played());

    starters.sort_by(by_minutes_desc);
    bench.sort_by(by_minutes_desc);

    starters.extend(bench);
    (starters, did_not_play)
}
