//! Possession estimates over absolute time windows
//!
//! possessions = FGA - OREB + TO + factor * FTA

use crate::events::{ActionType, Event, Team, TimedEvent};

/// Default free-throw weight of the possession proxy
pub const FREE_THROW_FACTOR: f64 = 0.44;

/// Counting stats feeding the possession estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PossessionCounts {
    pub field_goal_attempts: u32,
    pub offensive_rebounds: u32,
    pub turnovers: u32,
    pub free_throw_attempts: u32,
}

impl PossessionCounts {
    pub fn record(&mut self, event: &Event) {
        match &event.action {
            action if action.is_field_goal() => self.field_goal_attempts += 1,
            ActionType::FreeThrow => self.free_throw_attempts += 1,
            ActionType::Rebound if event.subtype == "offensive" => self.offensive_rebounds += 1,
            ActionType::Turnover => self.turnovers += 1,
            _ => {}
        }
    }

    pub fn estimate(&self, free_throw_factor: f64) -> f64 {
        self.field_goal_attempts as f64 - self.offensive_rebounds as f64
            + self.turnovers as f64
            + free_throw_factor * self.free_throw_attempts as f64
    }
}

/// Team events sorted by absolute time for window queries
#[derive(Debug, Clone, Default)]
pub struct EventIndex<'a> {
    team1: Vec<&'a TimedEvent>,
    team2: Vec<&'a TimedEvent>,
}

impl<'a> EventIndex<'a> {
    pub fn new(timeline: &'a [TimedEvent]) -> Self {
        let mut index = Self::default();
        for timed in timeline {
            match timed.event.team {
                Some(Team::One) => index.team1.push(timed),
                Some(Team::Two) => index.team2.push(timed),
                None => {}
            }
        }
        // stable: equal times keep sequence order
        index.team1.sort_by(|a, b| a.time.total_cmp(&b.time));
        index.team2.sort_by(|a, b| a.time.total_cmp(&b.time));
        index
    }

    fn events(&self, team: Team) -> &[&'a TimedEvent] {
        match team {
            Team::One => &self.team1,
            Team::Two => &self.team2,
        }
    }

    /// Events of `team` with `start <= time <= end`
    pub fn window(&self, team: Team, start: f64, end: f64) -> &[&'a TimedEvent] {
        let events = self.events(team);
        let lo = events.partition_point(|e| e.time < start);
        let hi = events.partition_point(|e| e.time <= end);
        if lo >= hi { &[] } else { &events[lo..hi] }
    }

    /// Counting stats of `team` in the closed window [start, end]
    pub fn counts(&self, team: Team, start: f64, end: f64) -> PossessionCounts {
        let mut counts = PossessionCounts::default();
        for timed in self.window(team, start, end) {
            counts.record(&timed.event);
        }
        counts
    }

    pub fn possessions(&self, team: Team, start: f64, end: f64, free_throw_factor: f64) -> f64 {
        self.counts(team, start, end).estimate(free_throw_factor)
    }
}
