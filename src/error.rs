//! Error types for feed parsing, clock conversion and game analysis

use thiserror::Error;

/// Failure converting a countdown clock into absolute game time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("malformed clock {0:?}, expected MM:SS")]
    Malformed(String),

    #[error("invalid period {0}, periods start at 1")]
    InvalidPeriod(u32),

    #[error("clock {clock:?} exceeds the {duration}s length of period {period}")]
    ExceedsPeriod { clock: String, period: u32, duration: u32 },
}

/// Failure analyzing a single game
#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("feed JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event {sequence}: {source}")]
    Clock { sequence: u32, source: ClockError },

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GameError {
    /// Whether the game can be retried with a fresh copy of its feed.
    /// Clock corruption is a property of the feed itself.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GameError::Io(_) => true,
            GameError::Json(_) => false,
            GameError::Clock { .. } => false,
            GameError::ThreadPool(_) => false,
        }
    }
}

/// Failure loading analysis settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
