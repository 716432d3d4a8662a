//! Analysis settings
//!
//! Clock rules, the possession free-throw factor, the minutes-check tolerance
//! and the worker count. Loaded from `config/rotations.toml` when present,
//! otherwise from the tracked template, otherwise built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::analytics::{DEFAULT_MINUTES_TOLERANCE, FREE_THROW_FACTOR};
use crate::error::SettingsError;
use crate::events::ClockRules;

/// Tracked settings template
pub const SETTINGS_TEMPLATE: &str = "config/rotations.template.toml";
/// Local settings (gitignored, user's custom settings)
pub const SETTINGS_FILE: &str = "config/rotations.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub clock: ClockRules,
    /// Free-throw weight in the possession estimate
    pub free_throw_factor: f64,
    /// Minutes a computed total may differ from the reported one
    pub minutes_tolerance: f64,
    /// Worker threads for multi-game runs (0 = one per core)
    pub threads: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            clock: ClockRules::default(),
            free_throw_factor: FREE_THROW_FACTOR,
            minutes_tolerance: DEFAULT_MINUTES_TOLERANCE,
            threads: 0,
        }
    }
}

impl AnalysisSettings {
    /// Load settings from a file; `.json` is read as JSON, anything else as TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: display.clone(),
            source,
        })?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            toml::from_str(&contents).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| SettingsError::Parse {
            path: display,
            message,
        })
    }

    /// Load from the default config files.
    /// Priority: local settings > template settings > built-in defaults
    pub fn from_config_files() -> Self {
        Self::from_config_paths(Path::new(SETTINGS_FILE), Path::new(SETTINGS_TEMPLATE))
    }

    fn from_config_paths(local: &Path, template: &Path) -> Self {
        for path in [local, template] {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => warn!("{}, trying next settings source", e),
            }
        }
        Self::default()
    }

    /// Resolve settings for a run: an explicit file replaces the config-file
    /// layer, then a thread count from the command line overrides last.
    pub fn resolve(settings_path: Option<&Path>, threads: Option<usize>) -> Result<Self, SettingsError> {
        let mut settings = match settings_path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_config_files(),
        };
        if let Some(threads) = threads {
            settings.threads = threads;
        }
        Ok(settings)
    }
}
