//! Computed minutes vs. the minutes reported by the feed's box score

use serde::Serialize;

use crate::events::{GameData, Team};
use crate::rotations::TeamRotation;

/// Default allowed gap, in minutes, before a player is flagged
pub const DEFAULT_MINUTES_TOLERANCE: f64 = 2.0;

/// Parse reported minutes, either "MM:SS" or a decimal number of minutes
pub fn parse_reported_minutes(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.trim().parse().ok()?;
            let seconds: u32 = seconds.trim().parse().ok()?;
            Some(minutes as f64 + seconds as f64 / 60.0)
        }
        None => text.parse::<f64>().ok().filter(|m| m.is_finite()),
    }
}

/// One row of the minutes check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesCheck {
    pub shirt_number: String,
    pub player_name: String,
    pub team: Team,
    pub computed_minutes: f64,
    /// None when the feed reported nothing usable
    pub reported_minutes: Option<f64>,
    pub diff: Option<f64>,
    pub flagged: bool,
}

/// Check every ordered player of a team against the reported minutes
pub fn check_minutes(game: &GameData, rotation: &TeamRotation, tolerance: f64) -> Vec<MinutesCheck> {
    rotation
        .players
        .iter()
        .map(|player| {
            let reported_minutes = game
                .roster(rotation.team)
                .find(|p| p.shirt_number == player.shirt_number)
                .and_then(|p| p.stats_minutes.as_deref())
                .and_then(parse_reported_minutes);
            let computed_minutes = player.minutes();
            let diff = reported_minutes.map(|reported| (computed_minutes - reported).abs());

            MinutesCheck {
                shirt_number: player.shirt_number.clone(),
                player_name: player.player_name.clone(),
                team: rotation.team,
                computed_minutes,
                reported_minutes,
                diff,
                flagged: diff.is_some_and(|d| d > tolerance),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Player;
    use crate::rotations::Stint;

    #[test]
    fn test_parse_reported_minutes() {
        assert_eq!(parse_reported_minutes("12:30"), Some(12.5));
        assert_eq!(parse_reported_minutes("0:00"), Some(0.0));
        assert_eq!(parse_reported_minutes("7.25"), Some(7.25));
        assert_eq!(parse_reported_minutes(""), None);
        assert_eq!(parse_reported_minutes("DNP"), None);
        assert_eq!(parse_reported_minutes("12:xx"), None);
    }

    fn stint(shirt: &str, time_in: f64, time_out: f64) -> Stint {
        Stint {
            shirt_number: shirt.to_string(),
            player_name: String::new(),
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

    #[test]
    fn test_check_minutes_flags_large_gaps() {
        let mut game = GameData::default();
        let mut a = Player::new("1", "Close", Team::One, true);
        a.stats_minutes = Some("10:30".to_string());
        let mut b = Player::new("2", "Far", Team::One, true);
        b.stats_minutes = Some("4:00".to_string());
        let mut c = Player::new("3", "Unknown", Team::One, true);
        c.stats_minutes = Some("n/a".to_string());
        game.players = vec![a, b, c];

        let stints = vec![
            stint("1", 0.0, 600.0),
            stint("2", 0.0, 600.0),
            stint("3", 0.0, 300.0),
        ];
        let rotation = TeamRotation::from_stints(Team::One, &game.players, stints);
        let checks = check_minutes(&game, &rotation, DEFAULT_MINUTES_TOLERANCE);
        assert_eq!(checks.len(), 3);

        let close = checks.iter().find(|c| c.shirt_number == "1").unwrap();
        assert!(!close.flagged);
        assert!((close.diff.unwrap() - 0.5).abs() < 1e-9);

        let far = checks.iter().find(|c| c.shirt_number == "2").unwrap();
        assert!(far.flagged);
        assert_eq!(far.computed_minutes, 10.0);

        let unknown = checks.iter().find(|c| c.shirt_number == "3").unwrap();
        assert_eq!(unknown.reported_minutes, None);
        assert!(!unknown.flagged);
    }
}
