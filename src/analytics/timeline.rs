//! Minute-by-minute view of a game
//!
//! Splits the game into one-minute cells per player (court time, +/- and
//! stats inside the player's on-court intervals), plus team +/- per minute,
//! lineups and period segments for the x-axis.

use serde::Serialize;

use super::boxscore::BoxScore;
use crate::events::{ClockRules, TimedEvent};
use crate::rotations::PlayerRotation;

/// Seconds on court that count as a full minute
const FULL_MINUTE_SECONDS: f64 = 59.5;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One period on the minute axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSegment {
    pub period: u32,
    pub label: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub duration: u32,
}

pub fn period_segments(num_periods: u32, rules: &ClockRules) -> Vec<PeriodSegment> {
    let mut offset = 0;
    (1..=num_periods)
        .map(|period| {
            let duration = (rules.period_duration(period) / 60.0).round() as u32;
            let segment = PeriodSegment {
                period,
                label: rules.period_label(period),
                start_minute: offset,
                end_minute: offset + duration,
                duration,
            };
            offset += duration;
            segment
        })
        .collect()
}

/// Number of whole minutes on the game axis
pub fn total_minutes(num_periods: u32, rules: &ClockRules) -> usize {
    (rules.game_end(num_periods) / 60.0).ceil() as usize
}

/// One minute of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteCell {
    pub minute: usize,
    pub on_court: bool,
    pub full_minute: bool,
    pub on_court_seconds: f64,
    pub plus_minus: i32,
    pub pts: u32,
    pub stats: BoxScore,
}

/// Minute grid row of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTimeline {
    pub shirt_number: String,
    pub name: String,
    pub is_starter: bool,
    pub total_seconds: f64,
    pub minutes: Vec<MinuteCell>,
    pub game_stats: BoxScore,
    pub total_plus_minus: i32,
}

impl PlayerTimeline {
    pub fn on_court_in(&self, minute: usize) -> bool {
        self.minutes.get(minute).is_some_and(|m| m.on_court)
    }
}

pub fn player_timeline(rotation: &PlayerRotation, timeline: &[TimedEvent], total_minutes: usize) -> PlayerTimeline {
    let team = rotation.team;
    let mut minutes = Vec::with_capacity(total_minutes);

    for minute in 0..total_minutes {
        let minute_start = minute as f64 * 60.0;
        let minute_end = minute_start + 60.0;

        let intervals: Vec<(f64, f64)> = rotation
            .stints
            .iter()
            .map(|s| (s.time_in.max(minute_start), s.time_out.min(minute_end)))
            .filter(|(start, end)| start < end)
            .collect();
        let on_court_seconds: f64 = intervals.iter().map(|(start, end)| end - start).sum();

        let mut plus_minus = 0;
        let mut stats = BoxScore::default();
        for timed in timeline {
            if timed.time < minute_start || timed.time >= minute_end {
                continue;
            }
            let Some(event_team) = timed.event.team else {
                continue;
            };
            if !rotation.stints.iter().any(|stint| stint.contains(timed.time)) {
                continue;
            }
            let points = timed.event.points() as i32;
            if event_team == team {
                plus_minus += points;
            } else {
                plus_minus -= points;
            }
            if timed.event.is_by(team, &rotation.shirt_number) {
                stats.record(&timed.event);
            }
        }

        minutes.push(MinuteCell {
            minute,
            on_court: on_court_seconds > 0.0,
            full_minute: on_court_seconds >= FULL_MINUTE_SECONDS,
            on_court_seconds: round1(on_court_seconds),
            plus_minus,
            pts: stats.pts,
            stats,
        });
    }

    let total_plus_minus = minutes.iter().filter(|m| m.on_court).map(|m| m.plus_minus).sum();

    PlayerTimeline {
        shirt_number: rotation.shirt_number.clone(),
        name: rotation.player_name.clone(),
        is_starter: rotation.is_starter,
        total_seconds: round1(rotation.total_seconds),
        minutes,
        game_stats: BoxScore::collect(timeline, team, &rotation.shirt_number),
        total_plus_minus,
    }
}

/// Team +/- per minute from the running score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamPlusMinus {
    #[serde(rename = "1")]
    pub team1: Vec<i32>,
    #[serde(rename = "2")]
    pub team2: Vec<i32>,
}

pub fn team_plus_minus_per_minute(timeline: &[TimedEvent], total_minutes: usize) -> TeamPlusMinus {
    if total_minutes == 0 {
        return TeamPlusMinus::default();
    }

    let mut by_minute = vec![Vec::new(); total_minutes];
    for timed in timeline {
        let Some(score) = timed.event.score else {
            continue;
        };
        if score.total() == 0 {
            continue;
        }
        let minute = ((timed.time / 60.0).floor().max(0.0) as usize).min(total_minutes - 1);
        by_minute[minute].push(score);
    }

    let mut result = TeamPlusMinus::default();
    let mut prev = crate::events::Score::default();
    for scores in by_minute {
        let mut end = prev;
        for score in scores {
            if score.total() >= end.total() {
                end = score;
            }
        }
        let gain1 = end.team1 as i32 - prev.team1 as i32;
        let gain2 = end.team2 as i32 - prev.team2 as i32;
        result.team1.push(gain1 - gain2);
        result.team2.push(gain2 - gain1);
        prev = end;
    }
    result
}

/// Names of the players on court in each minute
pub fn lineups_per_minute(players: &[PlayerTimeline], total_minutes: usize) -> Vec<Vec<String>> {
    (0..total_minutes)
        .map(|minute| {
            players
                .iter()
                .filter(|p| p.on_court_in(minute))
                .map(|p| p.name.clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ActionType, Event, Player, Team};
    use crate::rotations::Stint;

    fn stint(time_in: f64, time_out: f64) -> Stint {
        Stint {
            shirt_number: "7".to_string(),
            player_name: "Seven".to_string(),
            team: Team::One,
            period_in: 1,
            period_out: 1,
            time_in,
            time_out,
            score_team_in: 0,
            score_opp_in: 0,
            score_team_out: 0,
            score_opp_out: 0,
        }
    }

    fn made(time: f64, team: Team, shirt: &str, action: ActionType, score: (u32, u32)) -> TimedEvent {
        TimedEvent {
            time,
            event: Event::new(0, 1, "00:00", Some(team), action)
                .with_shirt(shirt)
                .with_success(true)
                .with_score(score.0, score.1),
        }
    }

    #[test]
    fn test_period_segments() {
        let rules = ClockRules::default();
        let segments = period_segments(5, &rules);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].label, "Q1");
        assert_eq!((segments[3].start_minute, segments[3].end_minute), (30, 40));
        assert_eq!(segments[4].label, "OT1");
        assert_eq!((segments[4].start_minute, segments[4].end_minute), (40, 45));
        assert_eq!(total_minutes(5, &rules), 45);
        assert_eq!(total_minutes(4, &rules), 40);
    }

    #[test]
    fn test_player_minutes() {
        let player = Player::new("7", "Seven", Team::One, true);
        let rotation = PlayerRotation::new(&player, vec![stint(0.0, 90.0), stint(150.0, 180.0)]);
        let timeline = vec![
            made(30.0, Team::One, "7", ActionType::TwoPoint, (2, 0)),
            made(70.0, Team::Two, "4", ActionType::ThreePoint, (2, 3)),
            // off court: neither +/- nor minute stats
            made(100.0, Team::One, "7", ActionType::TwoPoint, (4, 3)),
            made(160.0, Team::One, "9", ActionType::FreeThrow, (5, 3)),
        ];

        let row = player_timeline(&rotation, &timeline, 4);
        assert_eq!(row.minutes.len(), 4);

        assert!(row.minutes[0].full_minute);
        assert_eq!(row.minutes[0].plus_minus, 2);
        assert_eq!(row.minutes[0].pts, 2);

        assert!(row.minutes[1].on_court);
        assert!(!row.minutes[1].full_minute);
        assert_eq!(row.minutes[1].on_court_seconds, 30.0);
        assert_eq!(row.minutes[1].plus_minus, -3);
        assert_eq!(row.minutes[1].pts, 0);

        assert_eq!(row.minutes[2].plus_minus, 1);
        assert!(!row.minutes[3].on_court);

        assert_eq!(row.total_plus_minus, 0);
        assert_eq!(row.game_stats.pts, 4);
        assert_eq!(row.total_seconds, 120.0);
    }

    #[test]
    fn test_team_plus_minus() {
        let timeline = vec![
            made(10.0, Team::One, "7", ActionType::TwoPoint, (2, 0)),
            made(50.0, Team::Two, "4", ActionType::ThreePoint, (2, 3)),
            made(130.0, Team::One, "7", ActionType::ThreePoint, (5, 3)),
            // past the axis: folds into the last minute
            made(900.0, Team::Two, "4", ActionType::TwoPoint, (5, 5)),
        ];
        let pm = team_plus_minus_per_minute(&timeline, 3);
        assert_eq!(pm.team1, vec![-1, 0, 1]);
        assert_eq!(pm.team2, vec![1, 0, -1]);
    }

    #[test]
    fn test_lineups() {
        let a = Player::new("7", "Seven", Team::One, true);
        let b = Player::new("8", "Eight", Team::One, false);
        let rows = vec![
            player_timeline(&PlayerRotation::new(&a, vec![stint(0.0, 120.0)]), &[], 2),
            player_timeline(&PlayerRotation::new(&b, vec![stint(60.0, 120.0)]), &[], 2),
        ];
        let lineups = lineups_per_minute(&rows, 2);
        assert_eq!(lineups[0], vec!["Seven".to_string()]);
        assert_eq!(lineups[1], vec!["Seven".to_string(), "Eight".to_string()]);
    }
}
