//! Per-game report: the JSON document consumed by the rotation chart and a
//! plain-text summary for the terminal.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{
    BoxScore, PeriodSegment, PlayerTimeline, TeamPlusMinus, lineups_per_minute, period_segments, player_timeline,
    team_plus_minus_per_minute, total_minutes,
};
use crate::events::Team;
use crate::pipeline::GameAnalysis;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a date the way the game pages show it (d.M.YYYY)
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-d.%-m.%Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHeader {
    pub name: String,
    pub code: String,
    pub score: u32,
}

/// A value per team, keyed "1" and "2" in JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerTeam<T> {
    #[serde(rename = "1")]
    pub team1: T,
    #[serde(rename = "2")]
    pub team2: T,
}

impl<T> PerTeam<T> {
    pub fn get(&self, team: Team) -> &T {
        match team {
            Team::One => &self.team1,
            Team::Two => &self.team2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub ortg: f64,
    pub drtg: f64,
    pub net_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub game_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub team1: TeamHeader,
    pub team2: TeamHeader,
    pub periods: Vec<PeriodSegment>,
    pub total_minutes: usize,
    #[serde(rename = "numOT")]
    pub num_ot: u32,
    pub players: PerTeam<Vec<PlayerTimeline>>,
    pub team_plus_minus: TeamPlusMinus,
    pub lineups: PerTeam<Vec<Vec<String>>>,
    /// Keyed "<team>_<shirt>"
    pub ratings: BTreeMap<String, RatingSummary>,
}

impl GameReport {
    pub fn build(analysis: &GameAnalysis, date: Option<NaiveDate>) -> Self {
        let game = &analysis.game;
        let rules = &analysis.rules;
        let minutes = total_minutes(game.num_periods, rules);

        let rows = |team: Team| -> Vec<PlayerTimeline> {
            analysis
                .team(team)
                .rotation
                .players
                .iter()
                .map(|rotation| player_timeline(rotation, &analysis.timeline, minutes))
                .collect()
        };
        let players = PerTeam {
            team1: rows(Team::One),
            team2: rows(Team::Two),
        };
        let lineups = PerTeam {
            team1: lineups_per_minute(&players.team1, minutes),
            team2: lineups_per_minute(&players.team2, minutes),
        };

        let mut ratings = BTreeMap::new();
        for team in &analysis.teams {
            for rating in &team.ratings {
                ratings.insert(
                    format!("{}_{}", team.team, rating.shirt_number),
                    RatingSummary {
                        ortg: round1(rating.ortg),
                        drtg: round1(rating.drtg),
                        net_rating: round1(rating.net_rating),
                    },
                );
            }
        }

        let header = |team: Team| TeamHeader {
            name: game.team_name(team).to_string(),
            code: game.team_code(team).to_string(),
            score: game.final_score.for_team(team).0,
        };

        Self {
            game_id: game.game_id.clone(),
            date,
            team1: header(Team::One),
            team2: header(Team::Two),
            periods: period_segments(game.num_periods, rules),
            total_minutes: minutes,
            num_ot: game.num_overtimes(rules.regulation_periods),
            players,
            team_plus_minus: team_plus_minus_per_minute(&analysis.timeline, minutes),
            lineups,
            ratings,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Rotation and rating tables for both teams
pub fn format_summary(analysis: &GameAnalysis, date: Option<NaiveDate>) -> String {
    let game = &analysis.game;
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} - {} {}",
        game.team1_name, game.final_score.team1, game.final_score.team2, game.team2_name
    ));
    if let Some(date) = date {
        output.push_str(&format!("  ({})", display_date(date)));
    }
    output.push('\n');
    let ot = game.num_overtimes(analysis.rules.regulation_periods);
    if ot > 0 {
        output.push_str(&format!("Overtime periods: {}\n", ot));
    }

    for team in &analysis.teams {
        output.push('\n');
        output.push_str(&format!("{} ({})\n", game.team_name(team.team), game.team_code(team.team)));
        output.push_str(&format!(
            "{:<4} {:<22} {:>6} {:>4} {:>6} {:>5} {:>7} {:>7} {:>7}\n",
            "#", "Player", "Min", "+/-", "Stints", "FG%", "ORTG", "DRTG", "NET"
        ));
        output.push_str(&"-".repeat(75));
        output.push('\n');

        for (player, rating) in team.rotation.players.iter().zip(&team.ratings) {
            let marker = if player.is_starter { "*" } else { "" };
            let stats = BoxScore::collect(&analysis.timeline, team.team, &player.shirt_number);
            output.push_str(&format!(
                "{:<4} {:<22} {:>6.1} {:>+4} {:>6} {:>5.1} {:>7.1} {:>7.1} {:>+7.1}\n",
                player.shirt_number,
                format!("{}{}", player.player_name, marker),
                player.minutes(),
                player.plus_minus(),
                player.stints.len(),
                stats.fg_pct() * 100.0,
                rating.ortg,
                rating.drtg,
                rating.net_rating,
            ));
        }

        output.push_str(&format!("Team minutes: {:.1}\n", team.rotation.total_seconds() / 60.0));

        if !team.rotation.did_not_play.is_empty() {
            let names: Vec<String> = team
                .rotation
                .did_not_play
                .iter()
                .map(|p| format!("#{} {}", p.shirt_number, p.player_name))
                .collect();
            output.push_str(&format!("DNP: {}\n", names.join(", ")));
        }

        for check in team.minutes_check.iter().filter(|c| c.flagged) {
            output.push_str(&format!(
                "Minutes check: #{} {} computed {:.1} vs reported {:.1}\n",
                check.shirt_number,
                check.player_name,
                check.computed_minutes,
                check.reported_minutes.unwrap_or_default(),
            ));
        }
    }

    output
}
