//! Effect dispatch: the boundary between the pure engine and the platform.
//!
//! Hosts implement the service traits below; [`Dispatcher`] routes each
//! [`Effect`] to the matching service. Service failures are logged and
//! dropped here, so nothing a speaker or vibrator does can change timer
//! state.

mod recording;
mod wake_lock;

pub use recording::RecordingServices;
pub use wake_lock::IdempotentWakeLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ServiceError};
use crate::events::{Effect, PulseIntensity};
use crate::history::WorkoutRecord;

/// Text-to-speech. Fire-and-forget.
pub trait SpeechService: Send {
    fn speak(&self, text: &str) -> Result<(), ServiceError>;
}

/// Vibration motor. Fire-and-forget.
pub trait HapticService: Send {
    fn pulse(&self, intensity: PulseIntensity, pattern: Option<&[u64]>)
        -> Result<(), ServiceError>;
}

/// Local notifications. Fire-and-forget.
pub trait NotificationService: Send {
    fn notify(&self, title: &str, body: &str) -> Result<(), ServiceError>;
}

/// Keeps the display/processor awake during a run.
///
/// Implementations need not be idempotent; wrap them in
/// [`IdempotentWakeLock`].
pub trait WakeLockService: Send {
    fn acquire(&self) -> Result<(), ServiceError>;
    fn release(&self) -> Result<(), ServiceError>;
}

/// Receives the one record each finished or stopped run produces.
pub trait HistorySink: Send {
    fn record(&self, record: &WorkoutRecord) -> Result<(), CoreError>;
}

/// The host's one-second clock.
pub trait TickSource: Send {
    fn set_running(&self, running: bool);
}

/// A service that accepts everything and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SpeechService for Silent {
    fn speak(&self, _text: &str) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl HapticService for Silent {
    fn pulse(&self, _: PulseIntensity, _: Option<&[u64]>) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl NotificationService for Silent {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl WakeLockService for Silent {
    fn acquire(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    fn release(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl HistorySink for Silent {
    fn record(&self, _record: &WorkoutRecord) -> Result<(), CoreError> {
        Ok(())
    }
}

impl TickSource for Silent {
    fn set_running(&self, _running: bool) {}
}

/// Which cue channels the user has turned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuePreferences {
    pub voice: bool,
    pub haptics: bool,
    pub notifications: bool,
}

impl Default for CuePreferences {
    fn default() -> Self {
        Self {
            voice: true,
            haptics: true,
            notifications: true,
        }
    }
}

/// The set of platform services a dispatcher routes to.
pub struct Services {
    pub speech: Box<dyn SpeechService>,
    pub haptics: Box<dyn HapticService>,
    pub notifications: Box<dyn NotificationService>,
    pub wake_lock: Box<dyn WakeLockService>,
    pub history: Box<dyn HistorySink>,
    pub ticks: Box<dyn TickSource>,
}

impl Services {
    /// Every channel wired to [`Silent`].
    pub fn silent() -> Self {
        Self {
            speech: Box::new(Silent),
            haptics: Box::new(Silent),
            notifications: Box::new(Silent),
            wake_lock: Box::new(Silent),
            history: Box::new(Silent),
            ticks: Box::new(Silent),
        }
    }
}

pub struct Dispatcher {
    speech: Box<dyn SpeechService>,
    haptics: Box<dyn HapticService>,
    notifications: Box<dyn NotificationService>,
    wake_lock: IdempotentWakeLock<Box<dyn WakeLockService>>,
    history: Box<dyn HistorySink>,
    ticks: Box<dyn TickSource>,
    prefs: CuePreferences,
}

impl Dispatcher {
    pub fn new(services: Services) -> Self {
        Self {
            speech: services.speech,
            haptics: services.haptics,
            notifications: services.notifications,
            wake_lock: IdempotentWakeLock::new(services.wake_lock),
            history: services.history,
            ticks: services.ticks,
            prefs: CuePreferences::default(),
        }
    }

    pub fn with_preferences(mut self, prefs: CuePreferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn preferences(&self) -> CuePreferences {
        self.prefs
    }

    pub fn wake_lock_held(&self) -> bool {
        self.wake_lock.is_held()
    }

    /// Route a batch of effects in order.
    pub fn dispatch(&mut self, effects: &[Effect]) {
        for effect in effects {
            if let Err(e) = self.dispatch_one(effect) {
                tracing::warn!(effect = effect.kind(), error = %e, "effect dispatch failed");
            }
        }
    }

    fn dispatch_one(&mut self, effect: &Effect) -> Result<(), CoreError> {
        match effect {
            Effect::Speak { text } if self.prefs.voice => self.speech.speak(text)?,
            Effect::Pulse { intensity, pattern } if self.prefs.haptics => {
                self.haptics.pulse(*intensity, pattern.as_deref())?
            }
            Effect::Notify { title, body } if self.prefs.notifications => {
                self.notifications.notify(title, body)?
            }
            Effect::Speak { .. } | Effect::Pulse { .. } | Effect::Notify { .. } => {
                tracing::trace!(effect = effect.kind(), "cue muted");
            }
            Effect::RecordWorkout { record } => self.history.record(record)?,
            Effect::WakeLock { held: true } => self.wake_lock.acquire()?,
            Effect::WakeLock { held: false } => self.wake_lock.release()?,
            Effect::Ticking { running } => self.ticks.set_running(*running),
        }
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Services::silent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl SpeechService for Broken {
        fn speak(&self, _text: &str) -> Result<(), ServiceError> {
            Err(ServiceError::Unsupported { service: "speech" })
        }
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let recorder = RecordingServices::new();
        let mut services = recorder.services();
        services.speech = Box::new(Broken);
        let mut dispatcher = Dispatcher::new(services);

        dispatcher.dispatch(&[
            Effect::speak("Rest!"),
            Effect::notify("Rest Time", "Take a 10 second break"),
        ]);
        assert_eq!(
            recorder.effects(),
            vec![Effect::notify("Rest Time", "Take a 10 second break")]
        );
    }

    #[test]
    fn muted_channels_are_skipped() {
        let recorder = RecordingServices::new();
        let mut dispatcher = Dispatcher::new(recorder.services()).with_preferences(CuePreferences {
            voice: false,
            haptics: true,
            notifications: false,
        });

        dispatcher.dispatch(&[
            Effect::speak("5"),
            Effect::pulse(PulseIntensity::Light),
            Effect::notify("Round 2", "Time to work!"),
        ]);
        assert_eq!(recorder.effects(), vec![Effect::pulse(PulseIntensity::Light)]);
    }

    #[test]
    fn wake_lock_is_forwarded_once() {
        let recorder = RecordingServices::new();
        let mut dispatcher = Dispatcher::new(recorder.services());
        dispatcher.dispatch(&[
            Effect::WakeLock { held: true },
            Effect::WakeLock { held: true },
            Effect::WakeLock { held: false },
            Effect::WakeLock { held: false },
        ]);
        assert_eq!(
            recorder.effects(),
            vec![
                Effect::WakeLock { held: true },
                Effect::WakeLock { held: false }
            ]
        );
        assert!(!dispatcher.wake_lock_held());
    }
}
