use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::TimerConfiguration;

/// A named, reusable timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPreset {
    pub id: String,
    pub name: String,
    #[serde(alias = "workTime")]
    pub work_seconds: u32,
    #[serde(alias = "restTime")]
    pub rest_seconds: u32,
    #[serde(alias = "rounds")]
    pub total_rounds: u32,
    pub created_at: DateTime<Utc>,
}

impl WorkoutPreset {
    /// Build a preset with a fresh id.
    ///
    /// # Errors
    /// Rejects blank names and invalid configurations.
    pub fn new(name: &str, config: TimerConfiguration) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name".into()));
        }
        config.validate()?;
        Ok(Self::with_id(
            uuid::Uuid::new_v4().to_string(),
            name,
            config,
        ))
    }

    fn with_id(id: String, name: &str, config: TimerConfiguration) -> Self {
        Self {
            id,
            name: name.to_string(),
            work_seconds: config.work_seconds,
            rest_seconds: config.rest_seconds,
            total_rounds: config.total_rounds,
            created_at: Utc::now(),
        }
    }

    pub fn config(&self) -> TimerConfiguration {
        TimerConfiguration {
            work_seconds: self.work_seconds,
            rest_seconds: self.rest_seconds,
            total_rounds: self.total_rounds,
        }
    }
}

/// Presets seeded on first launch.
pub fn default_presets() -> Vec<WorkoutPreset> {
    [
        ("1", "Quick HIIT", 20, 10, 8),
        ("2", "Tabata", 20, 10, 8),
        ("3", "Strength Training", 45, 15, 6),
        ("4", "Cardio Blast", 60, 20, 10),
    ]
    .into_iter()
    .map(|(id, name, work, rest, rounds)| {
        WorkoutPreset::with_id(
            id.to_string(),
            name,
            TimerConfiguration {
                work_seconds: work,
                rest_seconds: rest,
                total_rounds: rounds,
            },
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        let err = WorkoutPreset::new("   ", TimerConfiguration::default()).unwrap_err();
        assert_eq!(err, ValidationError::Empty("name".into()));
    }

    #[test]
    fn new_preset_trims_name_and_gets_unique_id() {
        let a = WorkoutPreset::new(" Sprints ", TimerConfiguration::default()).unwrap();
        let b = WorkoutPreset::new("Sprints", TimerConfiguration::default()).unwrap();
        assert_eq!(a.name, "Sprints");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn defaults_are_valid() {
        let presets = default_presets();
        assert_eq!(presets.len(), 4);
        for p in &presets {
            p.config().validate().unwrap();
        }
        assert_eq!(presets[2].name, "Strength Training");
    }
}
