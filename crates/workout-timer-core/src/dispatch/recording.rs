//! Services that write every call back as an [`Effect`].
//!
//! Used by headless hosts (dry-run simulation) and tests to observe exactly
//! what reached the platform after muting and wake-lock deduplication.

use std::sync::{Arc, Mutex};

use super::{
    HapticService, HistorySink, NotificationService, Services, SpeechService, TickSource,
    WakeLockService,
};
use crate::error::{CoreError, ServiceError};
use crate::events::{Effect, PulseIntensity};
use crate::history::WorkoutRecord;

#[derive(Clone, Default)]
pub struct RecordingServices {
    calls: Arc<Mutex<Vec<Effect>>>,
}

impl RecordingServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// A full service set sharing this recorder.
    pub fn services(&self) -> Services {
        Services {
            speech: Box::new(self.clone()),
            haptics: Box::new(self.clone()),
            notifications: Box::new(self.clone()),
            wake_lock: Box::new(self.clone()),
            history: Box::new(self.clone()),
            ticks: Box::new(self.clone()),
        }
    }

    /// Everything recorded so far.
    pub fn effects(&self) -> Vec<Effect> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<Effect> {
        std::mem::take(&mut *self.calls.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn records(&self) -> Vec<WorkoutRecord> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                Effect::RecordWorkout { record } => Some(record),
                _ => None,
            })
            .collect()
    }

    fn push(&self, effect: Effect) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(effect);
    }
}

impl SpeechService for RecordingServices {
    fn speak(&self, text: &str) -> Result<(), ServiceError> {
        self.push(Effect::speak(text));
        Ok(())
    }
}

impl HapticService for RecordingServices {
    fn pulse(
        &self,
        intensity: PulseIntensity,
        pattern: Option<&[u64]>,
    ) -> Result<(), ServiceError> {
        self.push(Effect::Pulse {
            intensity,
            pattern: pattern.map(<[u64]>::to_vec),
        });
        Ok(())
    }
}

impl NotificationService for RecordingServices {
    fn notify(&self, title: &str, body: &str) -> Result<(), ServiceError> {
        self.push(Effect::notify(title, body));
        Ok(())
    }
}

impl WakeLockService for RecordingServices {
    fn acquire(&self) -> Result<(), ServiceError> {
        self.push(Effect::WakeLock { held: true });
        Ok(())
    }

    fn release(&self) -> Result<(), ServiceError> {
        self.push(Effect::WakeLock { held: false });
        Ok(())
    }
}

impl HistorySink for RecordingServices {
    fn record(&self, record: &WorkoutRecord) -> Result<(), CoreError> {
        self.push(Effect::RecordWorkout {
            record: record.clone(),
        });
        Ok(())
    }
}

impl TickSource for RecordingServices {
    fn set_running(&self, running: bool) {
        self.push(Effect::Ticking { running });
    }
}
