use serde::{Deserialize, Serialize};

use crate::history::WorkoutRecord;

/// Haptic strength requested by a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseIntensity {
    Light,
    Medium,
    Heavy,
}

/// Every command and tick produces zero or more effects.
///
/// The engine only describes what should happen; the dispatcher routes each
/// effect to the platform service that performs it. Order within one batch
/// is the order the host should apply them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Speak {
        text: String,
    },
    Pulse {
        intensity: PulseIntensity,
        /// Custom vibration waveform in milliseconds (off, on, off, on, ...).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Vec<u64>>,
    },
    Notify {
        title: String,
        body: String,
    },
    RecordWorkout {
        record: WorkoutRecord,
    },
    /// Acquire (`true`) or release (`false`) the screen wake-lock.
    WakeLock {
        held: bool,
    },
    /// Start (`true`) or stop (`false`) the one-second tick source.
    Ticking {
        running: bool,
    },
}

impl Effect {
    pub fn speak(text: impl Into<String>) -> Self {
        Effect::Speak { text: text.into() }
    }

    pub fn pulse(intensity: PulseIntensity) -> Self {
        Effect::Pulse {
            intensity,
            pattern: None,
        }
    }

    pub fn pulse_pattern(intensity: PulseIntensity, pattern: &[u64]) -> Self {
        Effect::Pulse {
            intensity,
            pattern: Some(pattern.to_vec()),
        }
    }

    pub fn notify(title: impl Into<String>, body: impl Into<String>) -> Self {
        Effect::Notify {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Speak { .. } => "speak",
            Effect::Pulse { .. } => "pulse",
            Effect::Notify { .. } => "notify",
            Effect::RecordWorkout { .. } => "record_workout",
            Effect::WakeLock { .. } => "wake_lock",
            Effect::Ticking { .. } => "ticking",
        }
    }

    /// Spoken text, if this is a speech cue.
    pub fn spoken(&self) -> Option<&str> {
        match self {
            Effect::Speak { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Effect::WakeLock { held: true }).unwrap();
        assert_eq!(json["type"], "wake_lock");
        assert_eq!(json["held"], true);

        let json = serde_json::to_value(Effect::pulse(PulseIntensity::Light)).unwrap();
        assert_eq!(json["intensity"], "light");
        assert!(json.get("pattern").is_none());
    }
}
