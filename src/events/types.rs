//! Play-by-play event and roster types

use serde::{Deserialize, Serialize};

/// Team identifier as numbered by the feed (1 or 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::One, Team::Two];

    /// Map a feed team number; 0 (game-level) and anything else yields None
    pub fn from_number(number: u32) -> Option<Team> {
        match number {
            1 => Some(Team::One),
            2 => Some(Team::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Cumulative score snapshot (team 1, team 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub team1: u32,
    pub team2: u32,
}

impl Score {
    pub fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }

    pub fn total(&self) -> u32 {
        self.team1 + self.team2
    }

    /// (own score, opponent score) from the point of view of `team`
    pub fn for_team(&self, team: Team) -> (u32, u32) {
        match team {
            Team::One => (self.team1, self.team2),
            Team::Two => (self.team2, self.team1),
        }
    }
}

/// Action category of a play-by-play event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    TwoPoint,
    ThreePoint,
    FreeThrow,
    Rebound,
    Turnover,
    Foul,
    Assist,
    Steal,
    Block,
    Substitution,
    Period,
    Other(String),
}

impl ActionType {
    /// Parse the feed's `actionType` code
    pub fn parse(code: &str) -> Self {
        match code {
            "2pt" => ActionType::TwoPoint,
            "3pt" => ActionType::ThreePoint,
            "freethrow" => ActionType::FreeThrow,
            "rebound" => ActionType::Rebound,
            "turnover" => ActionType::Turnover,
            "foul" => ActionType::Foul,
            "assist" => ActionType::Assist,
            "steal" => ActionType::Steal,
            "block" => ActionType::Block,
            "substitution" => ActionType::Substitution,
            "period" => ActionType::Period,
            other => ActionType::Other(other.to_string()),
        }
    }

    pub fn is_field_goal(&self) -> bool {
        matches!(self, ActionType::TwoPoint | ActionType::ThreePoint)
    }

    /// Points awarded when this action is successful
    pub fn point_value(&self) -> u32 {
        match self {
            ActionType::TwoPoint => 2,
            ActionType::ThreePoint => 3,
            ActionType::FreeThrow => 1,
            _ => 0,
        }
    }
}

/// Direction of a substitution event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    In,
    Out,
}

/// A single play-by-play event, ordered by `sequence`
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Feed-assigned action number, unique and increasing
    pub sequence: u32,
    /// Period as reported (corrected by overtime relabeling)
    pub period: u32,
    /// Countdown clock within the period ("MM:SS")
    pub clock: String,
    /// Acting team, None for game-level events
    pub team: Option<Team>,
    pub action: ActionType,
    pub subtype: String,
    pub success: bool,
    /// Cumulative score, None when the feed left it empty
    pub score: Option<Score>,
    pub shirt_number: Option<String>,
    pub player_name: String,
}

impl Event {
    pub fn new(sequence: u32, period: u32, clock: &str, team: Option<Team>, action: ActionType) -> Self {
        Self {
            sequence,
            period,
            clock: clock.to_string(),
            team,
            action,
            subtype: String::new(),
            success: false,
            score: None,
            shirt_number: None,
            player_name: String::new(),
        }
    }

    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.subtype = subtype.to_string();
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_score(mut self, team1: u32, team2: u32) -> Self {
        self.score = Some(Score::new(team1, team2));
        self
    }

    pub fn with_shirt(mut self, shirt_number: &str) -> Self {
        self.shirt_number = Some(shirt_number.to_string());
        self
    }

    /// Period-end boundary marker
    pub fn is_period_end(&self) -> bool {
        self.action == ActionType::Period && self.subtype == "end"
    }

    pub fn substitution(&self) -> Option<Substitution> {
        if self.action != ActionType::Substitution {
            return None;
        }
        match self.subtype.as_str() {
            "in" => Some(Substitution::In),
            "out" => Some(Substitution::Out),
            _ => None,
        }
    }

    /// Points scored by this event (0 unless a made shot or free throw)
    pub fn points(&self) -> u32 {
        if self.success { self.action.point_value() } else { 0 }
    }

    pub fn is_by(&self, team: Team, shirt_number: &str) -> bool {
        self.team == Some(team) && self.shirt_number.as_deref() == Some(shirt_number)
    }
}

/// Roster entry for one game
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub shirt_number: String,
    pub name: String,
    pub team: Team,
    pub is_starter: bool,
    /// Minutes reported by the feed's box score, if any
    pub stats_minutes: Option<String>,
}

impl Player {
    pub fn new(shirt_number: &str, name: &str, team: Team, is_starter: bool) -> Self {
        Self {
            shirt_number: shirt_number.to_string(),
            name: name.to_string(),
            team,
            is_starter,
            stats_minutes: None,
        }
    }
}

/// Everything known about one game before analysis
#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    pub game_id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub team1_code: String,
    pub team2_code: String,
    pub final_score: Score,
    pub num_periods: u32,
    pub players: Vec<Player>,
    pub events: Vec<Event>,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            game_id: String::new(),
            team1_name: "Team 1".to_string(),
            team2_name: "Team 2".to_string(),
            team1_code: "T1".to_string(),
            team2_code: "T2".to_string(),
            final_score: Score::default(),
            num_periods: 4,
            players: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl GameData {
    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team1_name,
            Team::Two => &self.team2_name,
        }
    }

    pub fn team_code(&self, team: Team) -> &str {
        match team {
            Team::One => &self.team1_code,
            Team::Two => &self.team2_code,
        }
    }

    /// Players of one team in roster order
    pub fn roster(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == team)
    }

    pub fn num_overtimes(&self, regulation_periods: u32) -> u32 {
        self.num_periods.saturating_sub(regulation_periods)
    }
}
