mod config;
pub mod database;
pub mod kv;
pub mod stores;

pub use config::{Config, CuesConfig, HistoryConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryStore};
pub use stores::{HistoryStore, PresetStore, SettingsStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `WORKOUT_TIMER_HOME` overrides the location outright. Otherwise this is
/// `~/.config/workout-timer/`, or `~/.config/workout-timer-dev/` when
/// `WORKOUT_TIMER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("WORKOUT_TIMER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("WORKOUT_TIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("workout-timer-dev")
            } else {
                base_dir.join("workout-timer")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
