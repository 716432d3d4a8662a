//! Box score counting stats rebuilt from the play-by-play

use serde::Serialize;

use crate::events::{ActionType, Event, Team, TimedEvent};

/// Per-player counting stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxScore {
    pub pts: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub fgm: u32,
    pub fga: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub ftm: u32,
    pub fta: u32,
    pub pf: u32,
    pub tov: u32,
}

impl BoxScore {
    /// Add one event credited to the player
    pub fn record(&mut self, event: &Event) {
        match &event.action {
            ActionType::TwoPoint | ActionType::ThreePoint => {
                let three = event.action == ActionType::ThreePoint;
                self.fga += 1;
                if three {
                    self.fg3a += 1;
                }
                if event.success {
                    self.fgm += 1;
                    self.pts += event.points();
                    if three {
                        self.fg3m += 1;
                    }
                }
            }
            ActionType::FreeThrow => {
                self.fta += 1;
                if event.success {
                    self.ftm += 1;
                    self.pts += 1;
                }
            }
            ActionType::Rebound if matches!(event.subtype.as_str(), "offensive" | "defensive") => {
                self.reb += 1;
            }
            ActionType::Assist => self.ast += 1,
            ActionType::Steal => self.stl += 1,
            ActionType::Block => self.blk += 1,
            ActionType::Turnover => self.tov += 1,
            ActionType::Foul if event.subtype != "technical" => self.pf += 1,
            _ => {}
        }
    }

    /// Collect the stats of one player from a list of events
    pub fn collect<'a>(events: impl IntoIterator<Item = &'a TimedEvent>, team: Team, shirt_number: &str) -> Self {
        let mut stats = Self::default();
        for timed in events {
            if timed.event.is_by(team, shirt_number) {
                stats.record(&timed.event);
            }
        }
        stats
    }

    /// Field goal percentage (0.0 - 1.0)
    pub fn fg_pct(&self) -> f64 {
        if self.fga == 0 {
            0.0
        } else {
            self.fgm as f64 / self.fga as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(team: Team, shirt: &str, action: ActionType, subtype: &str, success: bool) -> TimedEvent {
        TimedEvent {
            time: 0.0,
            event: Event::new(0, 1, "10:00", Some(team), action)
                .with_shirt(shirt)
                .with_subtype(subtype)
                .with_success(success),
        }
    }

    #[test]
    fn test_collect_player_stats() {
        let events = vec![
            timed(Team::One, "7", ActionType::ThreePoint, "", true),
            timed(Team::One, "7", ActionType::ThreePoint, "", false),
            timed(Team::One, "7", ActionType::TwoPoint, "layup", true),
            timed(Team::One, "7", ActionType::FreeThrow, "", true),
            timed(Team::One, "7", ActionType::FreeThrow, "", false),
            timed(Team::One, "7", ActionType::Rebound, "defensive", false),
            timed(Team::One, "7", ActionType::Rebound, "offensivedeadball", false),
            timed(Team::One, "7", ActionType::Assist, "", false),
            timed(Team::One, "7", ActionType::Foul, "personal", false),
            timed(Team::One, "7", ActionType::Foul, "technical", false),
            timed(Team::One, "7", ActionType::Turnover, "", false),
            // other player and other team with the same shirt
            timed(Team::One, "8", ActionType::TwoPoint, "", true),
            timed(Team::Two, "7", ActionType::TwoPoint, "", true),
        ];

        let stats = BoxScore::collect(&events, Team::One, "7");
        assert_eq!(stats.pts, 6);
        assert_eq!((stats.fgm, stats.fga), (2, 3));
        assert_eq!((stats.fg3m, stats.fg3a), (1, 2));
        assert_eq!((stats.ftm, stats.fta), (1, 2));
        assert_eq!(stats.reb, 1);
        assert_eq!(stats.ast, 1);
        assert_eq!(stats.pf, 1);
        assert_eq!(stats.tov, 1);
        assert!((stats.fg_pct() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_box_score() {
        let stats = BoxScore::collect(&Vec::<TimedEvent>::new(), Team::Two, "4");
        assert_eq!(stats, BoxScore::default());
        assert_eq!(stats.fg_pct(), 0.0);
    }
}
