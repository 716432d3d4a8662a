//! Stint reconstruction
//!
//! Replays substitution events against per-team on-court state and emits
//! an immutable [`Stint`] for every continuous interval a player spent on
//! the court, with score snapshots at both ends.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::events::{GameData, Player, Score, Substitution, Team, TimedEvent};

/// One continuous on-court interval of a player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stint {
    pub shirt_number: String,
    pub player_name: String,
    pub team: Team,
    pub period_in: u32,
    pub period_out: u32,
    /// Absolute seconds from game start
    pub time_in: f64,
    pub time_out: f64,
    pub score_team_in: u32,
    pub score_opp_in: u32,
    pub score_team_out: u32,
    pub score_opp_out: u32,
}

impl Stint {
    pub fn duration(&self) -> f64 {
        self.time_out - self.time_in
    }

    /// Points scored by the player's team during the stint
    pub fn points_for(&self) -> i32 {
        self.score_team_out as i32 - self.score_team_in as i32
    }

    /// Points scored by the opponent during the stint
    pub fn points_against(&self) -> i32 {
        self.score_opp_out as i32 - self.score_opp_in as i32
    }

    pub fn plus_minus(&self) -> i32 {
        self.points_for() - self.points_against()
    }

    /// Whether `time` falls in the half-open interval [time_in, time_out)
    pub fn contains(&self, time: f64) -> bool {
        self.time_in <= time && time < self.time_out
    }
}

/// Last known score, threaded through event processing.
///
/// An event's score is taken only when present and its total does not go
/// below the current total; otherwise the previous snapshot carries forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTracker {
    current: Score,
}

impl ScoreTracker {
    pub fn observe(&mut self, score: Option<Score>) -> Score {
        if let Some(score) = score
            && score.total() >= self.current.total()
        {
            self.current = score;
        }
        self.current
    }

    pub fn current(&self) -> Score {
        self.current
    }
}

/// Entry data of a stint that has not been closed yet
#[derive(Debug, Clone, Copy)]
struct OpenStint {
    time_in: f64,
    period_in: u32,
    score_team: u32,
    score_opp: u32,
}

/// On-court state of one team, keyed by shirt number
pub struct StintBuilder<'a> {
    team: Team,
    roster: HashMap<&'a str, &'a Player>,
    on_court: HashMap<String, OpenStint>,
    stints: Vec<Stint>,
}

impl<'a> StintBuilder<'a> {
    /// Starters go on court at time 0 with a 0-0 score
    pub fn new(team: Team, players: impl IntoIterator<Item = &'a Player>) -> Self {
        let roster: HashMap<&str, &Player> = players
            .into_iter()
            .filter(|p| p.team == team)
            .map(|p| (p.shirt_number.as_str(), p))
            .collect();

        let on_court = roster
            .values()
            .filter(|p| p.is_starter)
            .map(|p| {
                (
                    p.shirt_number.clone(),
                    OpenStint {
                        time_in: 0.0,
                        period_in: 1,
                        score_team: 0,
                        score_opp: 0,
                    },
                )
            })
            .collect();

        Self {
            team,
            roster,
            on_court,
            stints: Vec::new(),
        }
    }

    pub fn is_on_court(&self, shirt_number: &str) -> bool {
        self.on_court.contains_key(shirt_number)
    }

    /// Shirt numbers currently on court, sorted
    pub fn on_court(&self) -> Vec<&str> {
        let mut shirts: Vec<&str> = self.on_court.keys().map(String::as_str).collect();
        shirts.sort();
        shirts
    }

    /// Apply one event with the score snapshot current at that event
    pub fn apply(&mut self, timed: &TimedEvent, score: Score) {
        let event = &timed.event;
        if event.team != Some(self.team) {
            return;
        }
        let Some(direction) = event.substitution() else {
            return;
        };
        let Some(shirt) = event.shirt_number.as_deref() else {
            debug!(sequence = event.sequence, "substitution without shirt number");
            return;
        };
        if !self.roster.contains_key(shirt) {
            warn!(
                sequence = event.sequence,
                team = %self.team,
                shirt,
                "substitution for shirt number not on roster"
            );
            return;
        }

        let (score_team, score_opp) = score.for_team(self.team);
        match direction {
            Substitution::Out => match self.on_court.remove(shirt) {
                Some(open) => self.close(shirt, open, timed.time, event.period, score),
                None => debug!(
                    sequence = event.sequence,
                    team = %self.team,
                    shirt,
                    "ignoring substitution out for player not on court"
                ),
            },
            Substitution::In => {
                let replaced = self.on_court.insert(
                    shirt.to_string(),
                    OpenStint {
                        time_in: timed.time,
                        period_in: event.period,
                        score_team,
                        score_opp,
                    },
                );
                if replaced.is_some() {
                    debug!(
                        sequence = event.sequence,
                        team = %self.team,
                        shirt,
                        "duplicate substitution in, keeping the latest entry"
                    );
                }
            }
        }
    }

    /// Close every open stint at game end and return all stints ordered
    /// by entry time
    pub fn finish(mut self, game_end: f64, final_period: u32, final_score: Score) -> Vec<Stint> {
        let open: Vec<(String, OpenStint)> = self.on_court.drain().collect();
        for (shirt, stint) in open {
            self.close(&shirt, stint, game_end, final_period, final_score);
        }

        self.stints.sort_by(|a, b| {
            a.time_in
                .total_cmp(&b.time_in)
                .then_with(|| a.shirt_number.cmp(&b.shirt_number))
        });
        self.stints
    }

    fn close(&mut self, shirt: &str, open: OpenStint, time_out: f64, period_out: u32, score: Score) {
        if time_out <= open.time_in {
            debug!(
                team = %self.team,
                shirt,
                time_in = open.time_in,
                time_out,
                "dropping stint without positive duration"
            );
            return;
        }

        let player_name = self
            .roster
            .get(shirt)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| shirt.to_string());
        let (score_team_out, score_opp_out) = score.for_team(self.team);

        self.stints.push(Stint {
            shirt_number: shirt.to_string(),
            player_name,
            team: self.team,
            period_in: open.period_in,
            period_out,
            time_in: open.time_in,
            time_out,
            score_team_in: open.score_team,
            score_opp_in: open.score_opp,
            score_team_out,
            score_opp_out,
        });
    }
}

/// Build all stints of one team from a time-stamped, sequence-ordered
/// event list
pub fn build_team_stints(game: &GameData, timeline: &[TimedEvent], team: Team, game_end: f64) -> Vec<Stint> {
    let mut builder = StintBuilder::new(team, game.roster(team));
    let mut tracker = ScoreTracker::default();

    for timed in timeline {
        let score = tracker.observe(timed.event.score);
        builder.apply(timed, score);
    }

    builder.finish(game_end, game.num_periods, game.final_score)
}
