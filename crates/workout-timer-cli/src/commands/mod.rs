pub mod config;
pub mod history;
pub mod preset;
pub mod run;
pub mod settings;
pub mod simulate;

use clap::Args;
use workout_timer_core::{KvStore, PresetStore, SettingsStore, TimerConfiguration, ValidationError};

/// Which configuration a run uses.
///
/// Starts from the saved settings (or a preset) and applies any explicit
/// overrides on top.
#[derive(Args, Debug, Default)]
pub struct WorkoutArgs {
    /// Work phase length in seconds
    #[arg(long)]
    pub work: Option<u32>,
    /// Rest phase length in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Number of rounds
    #[arg(long)]
    pub rounds: Option<u32>,
    /// Start from a preset instead of the saved settings
    #[arg(long)]
    pub preset: Option<String>,
}

impl WorkoutArgs {
    pub fn resolve(&self, kv: &impl KvStore) -> Result<TimerConfiguration, Box<dyn std::error::Error>> {
        let base = match &self.preset {
            Some(id) => PresetStore::new(kv)
                .get(id)?
                .ok_or_else(|| ValidationError::UnknownPreset(id.clone()))?
                .config(),
            None => SettingsStore::new(kv).load(),
        };
        let config = TimerConfiguration::new(
            self.work.unwrap_or(base.work_seconds),
            self.rest.unwrap_or(base.rest_seconds),
            self.rounds.unwrap_or(base.total_rounds),
        )?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_timer_core::MemoryStore;

    #[test]
    fn overrides_apply_on_top_of_settings() {
        let kv = MemoryStore::new();
        let args = WorkoutArgs {
            rounds: Some(3),
            ..Default::default()
        };
        let cfg = args.resolve(&kv).unwrap();
        assert_eq!(cfg, TimerConfiguration::new(30, 10, 3).unwrap());
    }

    #[test]
    fn preset_is_base() {
        let kv = MemoryStore::new();
        let args = WorkoutArgs {
            preset: Some("4".into()),
            rest: Some(30),
            ..Default::default()
        };
        let cfg = args.resolve(&kv).unwrap();
        assert_eq!(cfg, TimerConfiguration::new(60, 30, 10).unwrap());
    }

    #[test]
    fn zero_override_rejected() {
        let kv = MemoryStore::new();
        let args = WorkoutArgs {
            work: Some(0),
            ..Default::default()
        };
        assert!(args.resolve(&kv).is_err());
        let args = WorkoutArgs {
            preset: Some("missing".into()),
            ..Default::default()
        };
        assert!(args.resolve(&kv).is_err());
    }
}
