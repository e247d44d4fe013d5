//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which cue channels are enabled (voice, haptics, notifications)
//! - An optional external text-to-speech command
//! - How many history entries to keep
//!
//! Configuration is stored at `~/.config/workout-timer/config.toml`. Timer
//! durations are not here; they live in the settings record of the
//! key-value store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::dispatch::CuePreferences;
use crate::error::ConfigError;
use crate::history::HISTORY_LIMIT;

/// Cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub voice: bool,
    #[serde(default = "default_true")]
    pub haptics: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Program invoked as `<command> <text>` for speech (e.g. `say`,
    /// `espeak`). Speech is printed to the terminal when unset.
    #[serde(default)]
    pub speech_command: Option<String>,
}

/// History configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/workout-timer/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cues: CuesConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

fn default_true() -> bool {
    true
}
fn default_history_limit() -> usize {
    HISTORY_LIMIT
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self {
            voice: true,
            haptics: true,
            notifications: true,
            speech_command: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: HISTORY_LIMIT,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(invalid("is a section".into())),
                    // Strings and unset optionals; an empty value clears an optional.
                    _ if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse as
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        if updated.history.limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "history.limit must be positive".into(),
            });
        }
        *self = updated;
        Ok(())
    }

    /// Which cue channels the dispatcher should use.
    pub fn cue_preferences(&self) -> CuePreferences {
        CuePreferences {
            voice: self.cues.voice,
            haptics: self.cues.haptics,
            notifications: self.cues.notifications,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config unreadable, using defaults");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.cues.voice);
        assert_eq!(parsed.history.limit, 50);
        assert!(parsed.cues.speech_command.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("cues.voice").as_deref(), Some("true"));
        assert_eq!(cfg.get("history.limit").as_deref(), Some("50"));
        assert!(cfg.get("cues.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("cues.haptics", "false").unwrap();
        cfg.set("history.limit", "20").unwrap();
        cfg.set("cues.speech_command", "espeak").unwrap();
        assert!(!cfg.cues.haptics);
        assert_eq!(cfg.history.limit, 20);
        assert_eq!(cfg.cues.speech_command.as_deref(), Some("espeak"));

        cfg.set("cues.speech_command", "").unwrap();
        assert!(cfg.cues.speech_command.is_none());
    }

    #[test]
    fn set_rejects_unknown_and_mistyped() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("cues.nonexistent", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("cues.voice", "loud").is_err());
        assert!(cfg.set("history.limit", "-3").is_err());
        assert!(cfg.set("history.limit", "0").is_err());
        assert!(cfg.set("cues", "true").is_err());
        assert!(cfg.cues.voice);
    }

    #[test]
    fn load_from_missing_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.history.limit, 50);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cues]\nvoice = false\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert!(!cfg.cues.voice);
        assert!(cfg.cues.notifications);
        assert_eq!(cfg.history.limit, 50);
        assert!(!cfg.cue_preferences().voice);
    }
}
