//! Offensive and defensive ratings per stint and per player

use serde::Serialize;

use super::possessions::EventIndex;
use crate::events::Team;
use crate::rotations::{PlayerRotation, Stint, TeamRotation};

/// Points per 100 possessions, zero when there were no possessions
fn per_100(points: i32, possessions: f64) -> f64 {
    if possessions > 0.0 {
        points as f64 / possessions * 100.0
    } else {
        0.0
    }
}

/// Rating of a single stint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StintRating {
    /// Estimated possessions of the player's team in the stint window
    pub possessions: f64,
    /// Estimated possessions of the opponent in the same window
    pub opp_possessions: f64,
    pub points_for: i32,
    pub points_against: i32,
    pub ortg: f64,
    pub drtg: f64,
}

/// Rate one stint against the indexed event stream
pub fn rate_stint(stint: &Stint, index: &EventIndex, free_throw_factor: f64) -> StintRating {
    let possessions = index.possessions(stint.team, stint.time_in, stint.time_out, free_throw_factor);
    let opp_possessions = index.possessions(
        stint.team.opponent(),
        stint.time_in,
        stint.time_out,
        free_throw_factor,
    );
    let points_for = stint.points_for();
    let points_against = stint.points_against();

    StintRating {
        possessions,
        opp_possessions,
        points_for,
        points_against,
        ortg: per_100(points_for, possessions),
        drtg: per_100(points_against, opp_possessions),
    }
}

/// Game-level rating of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRating {
    pub shirt_number: String,
    pub player_name: String,
    pub team: Team,
    pub total_seconds: f64,
    /// Team possessions summed over the player's stints; denominator of
    /// both ORTG and DRTG
    pub total_possessions: f64,
    pub total_points_for: i32,
    pub total_points_against: i32,
    pub ortg: f64,
    pub drtg: f64,
    pub net_rating: f64,
}

impl PlayerRating {
    /// Aggregate stint ratings into a game rating
    pub fn from_stints(rotation: &PlayerRotation, stints: &[StintRating]) -> Self {
        let total_possessions: f64 = stints.iter().map(|s| s.possessions).sum();
        let total_points_for: i32 = stints.iter().map(|s| s.points_for).sum();
        let total_points_against: i32 = stints.iter().map(|s| s.points_against).sum();

        let (ortg, drtg, net_rating) = if total_possessions > 0.0 {
            let ortg = per_100(total_points_for, total_possessions);
            let drtg = per_100(total_points_against, total_possessions);
            (ortg, drtg, ortg - drtg)
        } else {
            (0.0, 0.0, 0.0)
        };

        Self {
            shirt_number: rotation.shirt_number.clone(),
            player_name: rotation.player_name.clone(),
            team: rotation.team,
            total_seconds: rotation.total_seconds,
            total_possessions,
            total_points_for,
            total_points_against,
            ortg,
            drtg,
            net_rating,
        }
    }
}

pub fn rate_player(rotation: &PlayerRotation, index: &EventIndex, free_throw_factor: f64) -> PlayerRating {
    let stints: Vec<StintRating> = rotation
        .stints
        .iter()
        .map(|stint| rate_stint(stint, index, free_throw_factor))
        .collect();
    PlayerRating::from_stints(rotation, &stints)
}

/// Ratings for every ordered player of a team, in rotation order
pub fn rate_team(rotation: &TeamRotation, index: &EventIndex, free_throw_factor: f64) -> Vec<PlayerRating> {
    rotation
        .players
        .iter()
        .map(|player| rate_player(player, index, free_throw_factor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::possessions::FREE_THROW_FACTOR;
    use crate::events::{ActionType, Event, Player, TimedEvent};

    fn timed(time: f64, team: Team, action: ActionType) -> TimedEvent {
        TimedEvent {
            time,
            event: Event::new(0, 1, "00:00", Some(team), action),
        }
    }

    fn stint(time_in: f64, time_out: f64, team_in_out: (u32, u32), opp_in_out: (u32, u32)) -> Stint {
        Stint {
            shirt_number: "7".to_string(),
            player_name: "Seven".to_string(),
            team: Team::One,
            period_in: 1,
            period_out: 1,
            time_in,
            time_out,
            score_team_in: team_in_out.0,
            score_opp_in: opp_in_out.0,
            score_team_out: team_in_out.1,
            score_opp_out: opp_in_out.1,
        }
    }

    fn sample_timeline() -> Vec<TimedEvent> {
        let mut timeline = Vec::new();
        for t in [10.0, 20.0, 30.0, 40.0] {
            timeline.push(timed(t, Team::One, ActionType::TwoPoint));
        }
        timeline.push(timed(50.0, Team::One, ActionType::Turnover));
        for t in [15.0, 25.0] {
            timeline.push(timed(t, Team::Two, ActionType::ThreePoint));
        }
        timeline
    }

    #[test]
    fn test_rate_stint() {
        let timeline = sample_timeline();
        let index = EventIndex::new(&timeline);
        let rating = rate_stint(&stint(0.0, 60.0, (0, 6), (0, 3)), &index, FREE_THROW_FACTOR);

        assert_eq!(rating.possessions, 5.0);
        assert_eq!(rating.opp_possessions, 2.0);
        assert_eq!(rating.points_for, 6);
        assert_eq!(rating.points_against, 3);
        assert!((rating.ortg - 120.0).abs() < 1e-9);
        assert!((rating.drtg - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_possession_stint() {
        let timeline = sample_timeline();
        let index = EventIndex::new(&timeline);
        let rating = rate_stint(&stint(100.0, 200.0, (10, 12), (5, 5)), &index, FREE_THROW_FACTOR);

        assert_eq!(rating.possessions, 0.0);
        assert_eq!(rating.points_for, 2);
        assert_eq!(rating.ortg, 0.0);
        assert_eq!(rating.drtg, 0.0);
    }

    #[test]
    fn test_player_rating_uses_team_possessions_for_both() {
        let timeline = sample_timeline();
        let index = EventIndex::new(&timeline);
        let player = Player::new("7", "Seven", Team::One, true);
        let rotation = PlayerRotation::new(
            &player,
            vec![stint(0.0, 35.0, (0, 6), (0, 3)), stint(45.0, 60.0, (6, 8), (3, 3))],
        );

        let rating = rate_player(&rotation, &index, FREE_THROW_FACTOR);
        // three FGA in the first window, one turnover in the second
        assert_eq!(rating.total_possessions, 4.0);
        assert_eq!(rating.total_points_for, 8);
        assert_eq!(rating.total_points_against, 3);
        assert!((rating.ortg - 200.0).abs() < 1e-9);
        assert!((rating.drtg - 75.0).abs() < 1e-9);
        assert!((rating.net_rating - 125.0).abs() < 1e-9);
        assert_eq!(rating.total_seconds, 50.0);
    }

    #[test]
    fn test_player_without_stints() {
        let index = EventIndex::new(&[]);
        let player = Player::new("3", "Bench", Team::Two, false);
        let rotation = PlayerRotation::new(&player, Vec::new());
        let rating = rate_player(&rotation, &index, FREE_THROW_FACTOR);

        assert_eq!(rating.total_possessions, 0.0);
        assert_eq!((rating.ortg, rating.drtg, rating.net_rating), (0.0, 0.0, 0.0));
    }
}
