use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Work/rest durations and round count for one run.
///
/// Doubles as the persisted settings record. Older clients stored the same
/// object as `{workTime, restTime, rounds}`, so those keys are still read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfiguration {
    #[serde(alias = "workTime")]
    pub work_seconds: u32,
    #[serde(alias = "restTime")]
    pub rest_seconds: u32,
    #[serde(alias = "rounds")]
    pub total_rounds: u32,
}

impl TimerConfiguration {
    /// Build a configuration, rejecting zero durations or round counts.
    pub fn new(
        work_seconds: u32,
        rest_seconds: u32,
        total_rounds: u32,
    ) -> Result<Self, ValidationError> {
        let cfg = Self {
            work_seconds,
            rest_seconds,
            total_rounds,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("workSeconds", self.work_seconds),
            ("restSeconds", self.rest_seconds),
            ("totalRounds", self.total_rounds),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "must be a positive integer".into(),
                });
            }
        }
        Ok(())
    }

    /// Longest phase; upper bound for the remaining-seconds counter.
    pub fn longest_phase_secs(&self) -> u32 {
        self.work_seconds.max(self.rest_seconds)
    }

    /// Wall time of a full run, trailing rest included.
    ///
    /// Uses saturating arithmetic so absurd inputs cannot overflow.
    pub fn total_duration_secs(&self) -> u64 {
        u64::from(self.work_seconds)
            .saturating_add(u64::from(self.rest_seconds))
            .saturating_mul(u64::from(self.total_rounds))
    }
}

impl Default for TimerConfiguration {
    fn default() -> Self {
        Self {
            work_seconds: 30,
            rest_seconds: 10,
            total_rounds: 5,
        }
    }
}

/// `M:SS`, the way the timer face shows remaining time.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_fields() {
        assert!(TimerConfiguration::new(0, 10, 3).is_err());
        assert!(TimerConfiguration::new(30, 0, 3).is_err());
        let err = TimerConfiguration::new(30, 10, 0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "totalRounds".into(),
                message: "must be a positive integer".into(),
            }
        );
    }

    #[test]
    fn reads_legacy_settings_keys() {
        let cfg: TimerConfiguration =
            serde_json::from_str(r#"{"workTime":40,"restTime":60,"rounds":5}"#).unwrap();
        assert_eq!(cfg, TimerConfiguration::new(40, 60, 5).unwrap());
    }

    #[test]
    fn writes_camel_case() {
        let json = serde_json::to_value(TimerConfiguration::default()).unwrap();
        assert_eq!(json["workSeconds"], 30);
        assert_eq!(json["restSeconds"], 10);
        assert_eq!(json["totalRounds"], 5);
    }

    #[test]
    fn total_duration() {
        let cfg = TimerConfiguration::new(30, 10, 2).unwrap();
        assert_eq!(cfg.total_duration_secs(), 80);
        assert_eq!(cfg.longest_phase_secs(), 30);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }
}
