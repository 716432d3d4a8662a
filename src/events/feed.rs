//! Live-stats feed parser
//!
//! Turns the vendor's game JSON document (team rosters plus a descending
//! play-by-play array) into a [`GameData`] ready for analysis.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::clock::{ClockRules, correct_overtime_periods};
use super::types::{ActionType, Event, GameData, Player, Score, Team};
use crate::error::GameError;

#[derive(Debug, Default, Deserialize)]
struct RawFeed {
    #[serde(default)]
    tm: Map<String, Value>,
    #[serde(default)]
    pbp: Vec<RawAction>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTeam {
    name: Option<String>,
    code: Option<String>,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(default)]
    pl: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "shirtNumber", default, deserialize_with = "lenient_string")]
    shirt_number: Option<String>,
    name: Option<String>,
    #[serde(rename = "scoreboardName")]
    scoreboard_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    starter: Option<u32>,
    #[serde(rename = "sMinutes", default, deserialize_with = "lenient_string")]
    s_minutes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(rename = "actionNumber", default, deserialize_with = "lenient_u32")]
    action_number: Option<u32>,
    gt: Option<String>,
    #[serde(default)]
    period: Option<Value>,
    #[serde(default, deserialize_with = "lenient_u32")]
    tno: Option<u32>,
    #[serde(rename = "actionType", default)]
    action_type: String,
    #[serde(rename = "subType", default)]
    sub_type: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    success: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    s1: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    s2: Option<u32>,
    #[serde(rename = "shirtNumber", default, deserialize_with = "lenient_string")]
    shirt_number: Option<String>,
    #[serde(rename = "scoreboardName")]
    scoreboard_name: Option<String>,
    name: Option<String>,
}

fn value_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accept numbers sent either as JSON numbers or numeric strings
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u32))
}

/// Accept strings or numbers, mapping empty strings to None
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl RawAction {
    fn into_event(self) -> Event {
        let score = match (self.s1, self.s2) {
            (Some(s1), Some(s2)) => Some(Score::new(s1, s2)),
            _ => None,
        };
        let sequence = self.action_number.unwrap_or(0);
        let period = match &self.period {
            None | Some(Value::Null) => 1,
            Some(value) => value_to_u32(value).unwrap_or_else(|| {
                warn!(action = sequence, period = %value, "unreadable period, assuming period 1");
                1
            }),
        };
        Event {
            sequence,
            period,
            clock: self.gt.unwrap_or_else(|| "00:00".to_string()),
            team: self.tno.and_then(Team::from_number),
            action: ActionType::parse(&self.action_type),
            subtype: self.sub_type,
            success: self.success == Some(1),
            score,
            shirt_number: self.shirt_number,
            player_name: self.scoreboard_name.or(self.name).unwrap_or_default(),
        }
    }
}

/// Parse a feed file; the file stem becomes the game id
pub fn parse_feed<P: AsRef<Path>>(path: P, rules: &ClockRules) -> Result<GameData, GameError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let game_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_feed_content(&content, &game_id, rules)
}

/// Parse feed content (for testing or in-memory parsing). Overtime
/// relabeling uses the regulation period count of `rules`.
pub fn parse_feed_content(content: &str, game_id: &str, rules: &ClockRules) -> Result<GameData, GameError> {
    let raw: RawFeed = serde_json::from_str(content)?;

    let mut game = GameData {
        game_id: game_id.to_string(),
        ..GameData::default()
    };

    for team in Team::BOTH {
        let Some(value) = raw.tm.get(&team.to_string()) else {
            warn!(game_id, %team, "feed has no team entry");
            continue;
        };
        let raw_team: RawTeam = serde_json::from_value(value.clone())?;

        if let Some(name) = raw_team.name.clone() {
            match team {
                Team::One => game.team1_name = name,
                Team::Two => game.team2_name = name,
            }
        }
        if let Some(code) = raw_team.code.clone().or(raw_team.short_name.clone()) {
            match team {
                Team::One => game.team1_code = code,
                Team::Two => game.team2_code = code,
            }
        }

        for (key, value) in &raw_team.pl {
            let raw_player: RawPlayer = serde_json::from_value(value.clone())?;
            let Some(shirt_number) = raw_player.shirt_number else {
                warn!(game_id, %team, player = key.as_str(), "skipping player without shirt number");
                continue;
            };
            let name = raw_player
                .name
                .or(raw_player.scoreboard_name)
                .unwrap_or_else(|| format!("#{}", shirt_number));
            game.players.push(Player {
                shirt_number,
                name,
                team,
                is_starter: raw_player.starter == Some(1),
                stats_minutes: raw_player.s_minutes,
            });
        }
    }

    game.events = raw.pbp.into_iter().map(RawAction::into_event).collect();
    game.events.sort_by_key(|e| e.sequence);
    correct_overtime_periods(&mut game.events, rules.regulation_periods);

    game.num_periods = game
        .events
        .iter()
        .map(|e| e.period)
        .max()
        .unwrap_or(rules.regulation_periods);

    game.final_score = game
        .events
        .iter()
        .filter_map(|e| e.score)
        .fold(Score::default(), |best, s| if s.total() > best.total() { s } else { best });

    Ok(game)
}

/// Parse all feed files (`*.json`) in a directory, sorted by path.
/// Files that fail to parse are skipped with a warning.
pub fn parse_all_feeds<P: AsRef<Path>>(dir: P, rules: &ClockRules) -> Result<Vec<GameData>, GameError> {
    let mut paths: Vec<_> = fs::read_dir(dir.as_ref())?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();

    let mut games = Vec::new();
    for path in paths {
        match parse_feed(&path, rules) {
            Ok(game) => games.push(game),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable feed"),
        }
    }

    Ok(games)
}

/// Load games from a mix of feed files and directories of feeds, in
/// argument order
pub fn load_feeds<P: AsRef<Path>>(paths: &[P], rules: &ClockRules) -> Result<Vec<GameData>, GameError> {
    let mut games = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            games.extend(parse_all_feeds(path, rules)?);
        } else {
            games.push(parse_feed(path, rules)?);
        }
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed live-stats document: pbp is newest-first, like the vendor sends it
    const SAMPLE_FEED: &str = r#"{
        "tm": {
            "1": {
                "name": "Ostrava",
                "code": "OST",
                "pl": {
                    "p3": {"shirtNumber": "7", "name": "Adam Novak", "starter": 1, "sMinutes": "32:10"},
                    "p1": {"shirtNumber": 12, "scoreboardName": "B. Svoboda", "starter": 0},
                    "p2": {"shirtNumber": "", "name": "Nobody"}
                }
            },
            "2": {
                "name": "Brno",
                "shortName": "BRN",
                "pl": {
                    "p1": {"shirtNumber": "4", "name": "Karel Dvorak", "starter": "1"}
                }
            }
        },
        "pbp": [
            {"actionNumber": 4, "gt": "08:30", "period": 1, "tno": 1, "actionType": "substitution", "subType": "in", "shirtNumber": "12", "s1": "", "s2": ""},
            {"actionNumber": 3, "gt": "08:30", "period": 1, "tno": 1, "actionType": "substitution", "subType": "out", "shirtNumber": "7"},
            {"actionNumber": 2, "gt": "09:12", "period": 1, "tno": 2, "actionType": "3pt", "success": 1, "shirtNumber": "4", "s1": "2", "s2": "3"},
            {"actionNumber": 1, "gt": "09:40", "period": 1, "tno": 1, "actionType": "2pt", "subType": "jumpshot", "success": 1, "shirtNumber": "7", "s1": 2, "s2": 0}
        ]
    }"#;

    #[test]
    fn test_parse_feed_teams() {
        let game = parse_feed_content(SAMPLE_FEED, "2513001", &ClockRules::default()).unwrap();

        assert_eq!(game.game_id, "2513001");
        assert_eq!(game.team1_name, "Ostrava");
        assert_eq!(game.team1_code, "OST");
        assert_eq!(game.team2_name, "Brno");
        assert_eq!(game.team2_code, "BRN");
    }

    #[test]
    fn test_parse_feed_roster_keeps_feed_order() {
        let game = parse_feed_content(SAMPLE_FEED, "g", &ClockRules::default()).unwrap();

        let team1: Vec<&str> = game.roster(Team::One).map(|p| p.shirt_number.as_str()).collect();
        assert_eq!(team1, vec!["7", "12"]);

        let adam = &game.players[0];
        assert!(adam.is_starter);
        assert_eq!(adam.stats_minutes.as_deref(), Some("32:10"));

        let svoboda = &game.players[1];
        assert_eq!(svoboda.name, "B. Svoboda");
        assert!(!svoboda.is_starter);

        let karel = game.roster(Team::Two).next().unwrap();
        assert!(karel.is_starter);
    }

    #[test]
    fn test_parse_feed_events_ascending() {
        let game = parse_feed_content(SAMPLE_FEED, "g", &ClockRules::default()).unwrap();

        let sequences: Vec<u32> = game.events.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4]);

        let first = &game.events[0];
        assert_eq!(first.action, ActionType::TwoPoint);
        assert_eq!(first.subtype, "jumpshot");
        assert!(first.success);
        assert_eq!(first.team, Some(Team::One));
        assert_eq!(first.score, Some(Score::new(2, 0)));

        // empty score strings mean "no score on this event"
        assert_eq!(game.events[3].score, None);
        assert_eq!(game.events[2].score, None);
    }

    #[test]
    fn test_parse_feed_final_score_and_periods() {
        let game = parse_feed_content(SAMPLE_FEED, "g", &ClockRules::default()).unwrap();
        assert_eq!(game.final_score, Score::new(2, 3));
        assert_eq!(game.num_periods, 1);
    }

    fn five_period_feed() -> String {
        let mut pbp = Vec::new();
        for (i, period) in [1, 2, 3, 4, 1].iter().enumerate() {
            let base = (i as u32) * 2;
            pbp.push(format!(
                r#"{{"actionNumber": {}, "gt": "03:00", "period": {}, "tno": 1, "actionType": "2pt", "success": 0}}"#,
                base + 1,
                period
            ));
            pbp.push(format!(
                r#"{{"actionNumber": {}, "gt": "00:00", "period": {}, "tno": 0, "actionType": "period", "subType": "end"}}"#,
                base + 2,
                period
            ));
        }
        format!(r#"{{"tm": {{}}, "pbp": [{}]}}"#, pbp.join(","))
    }

    #[test]
    fn test_parse_feed_relabels_overtime() {
        let game = parse_feed_content(&five_period_feed(), "ot", &ClockRules::default()).unwrap();
        assert_eq!(game.num_periods, 5);
        assert_eq!(game.events.last().unwrap().period, 5);
        assert_eq!(game.team1_name, "Team 1");
    }

    #[test]
    fn test_parse_feed_relabel_follows_regulation_periods() {
        let rules = ClockRules {
            regulation_periods: 5,
            ..ClockRules::default()
        };
        let game = parse_feed_content(&five_period_feed(), "ot", &rules).unwrap();
        // five boundaries fit five regulation periods: labels kept
        assert_eq!(game.events.last().unwrap().period, 1);
        assert_eq!(game.num_periods, 4);

        let empty = parse_feed_content(r#"{"tm": {}, "pbp": []}"#, "g", &rules).unwrap();
        assert_eq!(empty.num_periods, 5);
    }

    #[test]
    fn test_parse_feed_unreadable_period_defaults_to_first() {
        let content = r#"{"tm": {}, "pbp": [
            {"actionNumber": 1, "gt": "09:00", "period": "first", "tno": 1, "actionType": "2pt", "success": 0},
            {"actionNumber": 2, "gt": "08:00", "period": "2", "tno": 1, "actionType": "2pt", "success": 0}
        ]}"#;
        let game = parse_feed_content(content, "g", &ClockRules::default()).unwrap();
        assert_eq!(game.events[0].period, 1);
        assert_eq!(game.events[1].period, 2);
    }

    #[test]
    fn test_parse_feed_invalid_json() {
        assert!(matches!(parse_feed_content("{not json", "g", &ClockRules::default()), Err(GameError::Json(_))));
    }

    #[test]
    fn test_parse_feed_from_file_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2513001.json"), SAMPLE_FEED).unwrap();
        fs::write(dir.path().join("broken.json"), "{\"tm\": ").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let game = parse_feed(dir.path().join("2513001.json"), &ClockRules::default()).unwrap();
        assert_eq!(game.game_id, "2513001");

        let games = parse_all_feeds(dir.path(), &ClockRules::default()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id, "2513001");
    }

    #[test]
    fn test_load_feeds_mixes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("season");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("a.json"), SAMPLE_FEED).unwrap();
        fs::write(nested.join("b.json"), SAMPLE_FEED).unwrap();
        let single = dir.path().join("single.json");
        fs::write(&single, SAMPLE_FEED).unwrap();

        let games = load_feeds(&[single, nested], &ClockRules::default()).unwrap();
        let ids: Vec<&str> = games.iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(ids, vec!["single", "a", "b"]);

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_feeds(&[missing], &ClockRules::default()), Err(GameError::Io(_))));
    }
}
