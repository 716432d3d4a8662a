//! Game analysis pipeline
//!
//! One game: order events, repair overtime labels, stamp absolute times,
//! then rebuild each team's stints and rate them. Many games fan out over
//! rayon's pool.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::analytics::{EventIndex, MinutesCheck, PlayerRating, check_minutes, rate_team};
use crate::error::GameError;
use crate::events::{ClockRules, GameData, Team, TimedEvent, correct_overtime_periods, timestamp_events};
use crate::rotations::{TeamRotation, build_team_stints};
use crate::settings::AnalysisSettings;

/// Initialize parallel execution with the given thread count.
/// Call this once at startup before analyzing games in parallel.
pub fn init_parallel(threads: usize) -> Result<(), GameError> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
        debug!(threads, "initialized global thread pool");
    }
    // If threads == 0, use Rayon's default (auto-detect)
    Ok(())
}

/// Analysis of one team in one game
#[derive(Debug, Clone)]
pub struct TeamAnalysis {
    pub team: Team,
    pub rotation: TeamRotation,
    /// One rating per ordered player, in rotation order
    pub ratings: Vec<PlayerRating>,
    pub minutes_check: Vec<MinutesCheck>,
}

/// Everything derived from one game
#[derive(Debug, Clone)]
pub struct GameAnalysis {
    /// The game with events in sequence order and corrected periods
    pub game: GameData,
    pub rules: ClockRules,
    /// Whether overtime relabeling was applied
    pub overtime_corrected: bool,
    pub timeline: Vec<TimedEvent>,
    /// Indexed by team number - 1
    pub teams: [TeamAnalysis; 2],
}

impl GameAnalysis {
    pub fn team(&self, team: Team) -> &TeamAnalysis {
        match team {
            Team::One => &self.teams[0],
            Team::Two => &self.teams[1],
        }
    }

    pub fn game_end(&self) -> f64 {
        self.rules.game_end(self.game.num_periods)
    }
}

/// Analyze a single game
pub fn analyze_game(mut game: GameData, settings: &AnalysisSettings) -> Result<GameAnalysis, GameError> {
    let rules = settings.clock;

    game.events.sort_by_key(|e| e.sequence);
    let overtime_corrected = correct_overtime_periods(&mut game.events, rules.regulation_periods);
    if let Some(max_period) = game.events.iter().map(|e| e.period).max() {
        game.num_periods = game.num_periods.max(max_period);
    }

    let timeline = timestamp_events(&game.events, &rules)?;
    let game_end = rules.game_end(game.num_periods);
    let index = EventIndex::new(&timeline);

    let teams = Team::BOTH.map(|team| {
        let stints = build_team_stints(&game, &timeline, team, game_end);
        let rotation = TeamRotation::from_stints(team, &game.players, stints);
        let ratings = rate_team(&rotation, &index, settings.free_throw_factor);
        let minutes_check = check_minutes(&game, &rotation, settings.minutes_tolerance);
        TeamAnalysis {
            team,
            rotation,
            ratings,
            minutes_check,
        }
    });

    info!(
        game = %game.game_id,
        events = timeline.len(),
        periods = game.num_periods,
        overtime_corrected,
        "analyzed game"
    );

    Ok(GameAnalysis {
        game,
        rules,
        overtime_corrected,
        timeline,
        teams,
    })
}

/// Analyze games in parallel.
///
/// Returns one result per game in the same order as `games`.
pub fn analyze_games(games: Vec<GameData>, settings: &AnalysisSettings) -> Vec<Result<GameAnalysis, GameError>> {
    games
        .into_par_iter()
        .map(|game| analyze_game(game, settings))
        .collect()
}
