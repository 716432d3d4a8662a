//! Game clock model
//!
//! Converts (period, countdown clock) pairs into absolute game seconds and
//! repairs feeds that report every overtime period as period 1.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::Event;
use crate::error::{ClockError, GameError};

/// Period structure of a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockRules {
    /// Number of regulation periods
    pub regulation_periods: u32,
    /// Length of a regulation period in seconds
    pub regulation_period_seconds: u32,
    /// Length of an overtime period in seconds
    pub overtime_period_seconds: u32,
}

impl Default for ClockRules {
    fn default() -> Self {
        Self {
            regulation_periods: 4,
            regulation_period_seconds: 600,
            overtime_period_seconds: 300,
        }
    }
}

impl ClockRules {
    pub fn is_overtime(&self, period: u32) -> bool {
        period > self.regulation_periods
    }

    /// Duration of a single period in seconds
    pub fn period_duration(&self, period: u32) -> f64 {
        if self.is_overtime(period) {
            self.overtime_period_seconds as f64
        } else {
            self.regulation_period_seconds as f64
        }
    }

    /// Absolute seconds at the start of `period`
    pub fn period_start(&self, period: u32) -> f64 {
        (1..period).map(|p| self.period_duration(p)).sum()
    }

    /// Absolute seconds at the end of `period`
    pub fn period_end(&self, period: u32) -> f64 {
        self.period_start(period) + self.period_duration(period)
    }

    /// Absolute game-end time for a game of `num_periods` periods
    pub fn game_end(&self, num_periods: u32) -> f64 {
        self.period_start(num_periods + 1)
    }

    /// "Q1".."Q4" for regulation, "OT1".. for overtime
    pub fn period_label(&self, period: u32) -> String {
        if self.is_overtime(period) {
            format!("OT{}", period - self.regulation_periods)
        } else {
            format!("Q{}", period)
        }
    }

    /// Absolute game second of a countdown clock reading within `period`
    pub fn absolute_time(&self, clock: &str, period: u32) -> Result<f64, ClockError> {
        if period == 0 {
            return Err(ClockError::InvalidPeriod(period));
        }
        let remaining = parse_clock(clock)?;
        let duration = self.period_duration(period);
        if remaining as f64 > duration {
            return Err(ClockError::ExceedsPeriod {
                clock: clock.to_string(),
                period,
                duration: duration as u32,
            });
        }
        Ok(self.period_end(period) - remaining as f64)
    }
}

/// Parse a countdown clock "MM:SS" into remaining seconds
pub fn parse_clock(clock: &str) -> Result<u32, ClockError> {
    let malformed = || ClockError::Malformed(clock.to_string());

    let (minutes, seconds) = clock.trim().split_once(':').ok_or_else(malformed)?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| malformed())?;
    let seconds: u32 = seconds.trim().parse().map_err(|_| malformed())?;
    if seconds >= 60 {
        return Err(malformed());
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(malformed)
}

/// Absolute game second with default overtime rules and the given
/// regulation period length
pub fn absolute_time(clock: &str, period: u32, regulation_period_seconds: u32) -> Result<f64, ClockError> {
    ClockRules {
        regulation_period_seconds,
        ..ClockRules::default()
    }
    .absolute_time(clock, period)
}

/// Reassign period numbers from period-end boundaries.
///
/// Some feeds report every overtime period as period 1. When more than
/// `regulation_periods` boundary events exist, each event's period becomes
/// one plus the number of boundaries before it, capped at the boundary
/// count. Otherwise periods are left as reported. `events` must already be
/// in sequence order. Returns whether the relabeling was applied.
pub fn correct_overtime_periods(events: &mut [Event], regulation_periods: u32) -> bool {
    let boundaries = events.iter().filter(|e| e.is_period_end()).count() as u32;
    if boundaries <= regulation_periods {
        return false;
    }

    let mut seen = 0;
    let mut relabeled = 0;
    for event in events.iter_mut() {
        let period = (seen + 1).min(boundaries);
        if event.period != period {
            relabeled += 1;
            event.period = period;
        }
        if event.is_period_end() {
            seen += 1;
        }
    }

    if relabeled > 0 {
        info!(boundaries, relabeled, "relabeled overtime periods from boundary events");
    } else {
        debug!(boundaries, "period labels already consistent with boundaries");
    }
    true
}

/// Event stamped with its absolute game time
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Absolute seconds from game start
    pub time: f64,
    pub event: Event,
}

/// Stamp every event with its absolute time.
///
/// A malformed clock on any event rejects the whole game: a wrong time would
/// corrupt every later window computation.
pub fn timestamp_events(events: &[Event], rules: &ClockRules) -> Result<Vec<TimedEvent>, GameError> {
    events
        .iter()
        .map(|event| {
            let time = rules
                .absolute_time(&event.clock, event.period)
                .map_err(|source| GameError::Clock {
                    sequence: event.sequence,
                    source,
                })?;
            Ok(TimedEvent {
                time,
                event: event.clone(),
            })
        })
        .collect()
}
