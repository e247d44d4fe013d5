//! Typed views over the key-value store.
//!
//! Key names match what earlier mobile builds wrote, so existing data
//! directories keep working.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv::KvStore;
use crate::dispatch::HistorySink;
use crate::error::{CoreError, Result, ValidationError};
use crate::history::{HistoryLog, HistoryStats, WorkoutRecord, HISTORY_LIMIT};
use crate::presets::{default_presets, WorkoutPreset};
use crate::timer::TimerConfiguration;

pub const SETTINGS_KEY: &str = "lastWorkoutSettings";
pub const PRESETS_KEY: &str = "workoutPresets";
pub const HISTORY_KEY: &str = "workoutHistory";

fn read_json<T: DeserializeOwned>(kv: &impl KvStore, key: &str) -> Result<Option<T>> {
    match kv.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn write_json<T: Serialize>(kv: &impl KvStore, key: &str, value: &T) -> Result<()> {
    kv.set(key, &serde_json::to_string(value)?)
}

/// The configuration the timer shows at launch.
pub struct SettingsStore<S> {
    kv: S,
}

impl<S: KvStore> SettingsStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Saved settings, or the defaults when none are stored or they cannot
    /// be read.
    pub fn load(&self) -> TimerConfiguration {
        match read_json::<TimerConfiguration>(&self.kv, SETTINGS_KEY) {
            Ok(Some(cfg)) if cfg.validate().is_ok() => cfg,
            Ok(Some(cfg)) => {
                tracing::warn!(?cfg, "stored settings invalid, using defaults");
                TimerConfiguration::default()
            }
            Ok(None) => TimerConfiguration::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load settings, using defaults");
                TimerConfiguration::default()
            }
        }
    }

    pub fn save(&self, config: &TimerConfiguration) -> Result<()> {
        config.validate()?;
        write_json(&self.kv, SETTINGS_KEY, config)
    }
}

/// Named presets, newest first.
pub struct PresetStore<S> {
    kv: S,
}

impl<S: KvStore> PresetStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// All presets. Seeds and persists the defaults on first use.
    pub fn list(&self) -> Result<Vec<WorkoutPreset>> {
        if let Some(presets) = read_json(&self.kv, PRESETS_KEY)? {
            return Ok(presets);
        }
        let presets = default_presets();
        write_json(&self.kv, PRESETS_KEY, &presets)?;
        Ok(presets)
    }

    pub fn get(&self, id: &str) -> Result<Option<WorkoutPreset>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    pub fn create(&self, name: &str, config: TimerConfiguration) -> Result<WorkoutPreset> {
        let preset = WorkoutPreset::new(name, config)?;
        let mut presets = self.list()?;
        presets.insert(0, preset.clone());
        write_json(&self.kv, PRESETS_KEY, &presets)?;
        Ok(preset)
    }

    /// Returns whether a preset was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut presets = self.list()?;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        if presets.len() == before {
            return Ok(false);
        }
        write_json(&self.kv, PRESETS_KEY, &presets)?;
        Ok(true)
    }

    /// Make a preset the current timer settings.
    pub fn apply(&self, id: &str) -> Result<WorkoutPreset> {
        let preset = self
            .get(id)?
            .ok_or_else(|| ValidationError::UnknownPreset(id.to_string()))?;
        SettingsStore::new(&self.kv).save(&preset.config())?;
        Ok(preset)
    }
}

/// Capped, newest-first workout log.
pub struct HistoryStore<S> {
    kv: S,
    limit: usize,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_limit(kv, HISTORY_LIMIT)
    }

    pub fn with_limit(kv: S, limit: usize) -> Self {
        Self { kv, limit }
    }

    pub fn load(&self) -> Result<HistoryLog> {
        let records: Vec<WorkoutRecord> = read_json(&self.kv, HISTORY_KEY)?.unwrap_or_default();
        Ok(HistoryLog::from_records(records, self.limit))
    }

    pub fn append(&self, record: WorkoutRecord) -> Result<()> {
        let mut log = self.load()?;
        log.push(record, self.limit);
        write_json(&self.kv, HISTORY_KEY, &log)
    }

    pub fn stats(&self) -> Result<HistoryStats> {
        Ok(self.load()?.stats())
    }

    pub fn clear(&self) -> Result<()> {
        self.kv.remove(HISTORY_KEY)
    }
}

impl<S: KvStore + Send> HistorySink for HistoryStore<S> {
    fn record(&self, record: &WorkoutRecord) -> Result<(), CoreError> {
        self.append(record.clone())?;
        tracing::info!(
            rounds = record.rounds_completed,
            total = record.total_rounds,
            "workout recorded"
        );
        Ok(())
    }
}
