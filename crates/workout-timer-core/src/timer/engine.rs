//! Interval timer engine.
//!
//! The engine is a discrete state machine driven by one `tick()` per elapsed
//! second. It owns no threads and performs no I/O: every command returns the
//! [`Effect`]s it produced and the caller decides how to dispatch them.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Work -> Rest -> Work -> ... -> Rest -> Idle
//!          \       /
//!           Paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::default();
//! let effects = engine.start(TimerConfiguration::new(30, 10, 5)?)?;
//! // Once per second while engine.wants_ticks():
//! let effects = engine.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::configuration::TimerConfiguration;
use super::cues;
use crate::error::ValidationError;
use crate::events::Effect;
use crate::history::WorkoutRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Work,
    Rest,
    Paused,
}

/// Mutable progress through the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    pub current_round: u32,
    pub remaining_seconds: u32,
    /// Phase to return to on resume. Only meaningful while paused.
    pub prior_state: TimerState,
    /// Last countdown second spoken in this phase; `None` at phase entry.
    pub last_announced_second: Option<u32>,
}

impl RunProgress {
    fn fresh(config: &TimerConfiguration) -> Self {
        Self {
            current_round: 1,
            remaining_seconds: config.work_seconds,
            prior_state: TimerState::Work,
            last_announced_second: None,
        }
    }
}

/// What a host needs to render the timer face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub current_round: u32,
    pub total_rounds: u32,
    pub remaining_seconds: u32,
}

/// Core interval engine.
///
/// One instance drives one workout at a time and is reused across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfiguration,
    state: TimerState,
    progress: RunProgress,
}

impl TimerEngine {
    /// Create an idle engine showing `config`.
    pub fn new(config: TimerConfiguration) -> Self {
        Self {
            progress: RunProgress::fresh(&config),
            config,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn config(&self) -> &TimerConfiguration {
        &self.config
    }

    pub fn progress(&self) -> &RunProgress {
        &self.progress
    }

    pub fn current_round(&self) -> u32 {
        self.progress.current_round
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.progress.remaining_seconds
    }

    /// True between Start and the end of the run, paused included.
    pub fn is_running(&self) -> bool {
        self.state != TimerState::Idle
    }

    /// Whether the host's one-second clock should be delivering ticks.
    pub fn wants_ticks(&self) -> bool {
        matches!(self.state, TimerState::Work | TimerState::Rest)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            current_round: self.progress.current_round,
            total_rounds: self.config.total_rounds,
            remaining_seconds: self.progress.remaining_seconds,
        }
    }

    /// Replace the configuration shown while idle.
    ///
    /// Returns `Ok(false)` and changes nothing when a run is in progress.
    pub fn set_configuration(
        &mut self,
        config: TimerConfiguration,
    ) -> Result<bool, ValidationError> {
        config.validate()?;
        if self.is_running() {
            return Ok(false);
        }
        self.config = config;
        self.progress = RunProgress::fresh(&config);
        Ok(true)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run. A no-op while a run is already in progress.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for zero durations or rounds; the engine
    /// stays idle.
    pub fn start(&mut self, config: TimerConfiguration) -> Result<Vec<Effect>, ValidationError> {
        if self.is_running() {
            return Ok(Vec::new());
        }
        config.validate()?;
        self.config = config;
        self.progress = RunProgress::fresh(&config);
        self.state = TimerState::Work;
        tracing::debug!(
            work = config.work_seconds,
            rest = config.rest_seconds,
            rounds = config.total_rounds,
            "workout started"
        );

        let mut effects = cues::started(config.total_rounds);
        effects.push(Effect::WakeLock { held: true });
        effects.push(Effect::Ticking { running: true });
        Ok(effects)
    }

    /// Pause an active phase, or resume a paused one.
    pub fn toggle_pause(&mut self) -> Vec<Effect> {
        match self.state {
            TimerState::Work | TimerState::Rest => {
                self.progress.prior_state = self.state;
                self.state = TimerState::Paused;
                let mut effects = cues::paused();
                effects.push(Effect::Ticking { running: false });
                effects
            }
            TimerState::Paused => {
                self.state = self.progress.prior_state;
                let mut effects = cues::resumed();
                effects.push(Effect::Ticking { running: true });
                effects
            }
            TimerState::Idle => Vec::new(),
        }
    }

    /// Jump to the next phase. Skipping the final rest completes the run.
    pub fn skip(&mut self) -> Vec<Effect> {
        match self.state {
            TimerState::Work => {
                let mut effects = vec![cues::phase_end()];
                effects.extend(self.enter_rest(true));
                effects
            }
            TimerState::Rest => {
                let mut effects = vec![cues::phase_end()];
                if self.progress.current_round < self.config.total_rounds {
                    effects.extend(self.enter_next_round());
                } else {
                    effects.extend(self.finish());
                }
                effects
            }
            TimerState::Paused | TimerState::Idle => Vec::new(),
        }
    }

    /// Abort the run.
    ///
    /// Rounds that finished before the stop are recorded; a run stopped
    /// during its first round leaves no record.
    pub fn stop(&mut self) -> Vec<Effect> {
        if !self.is_running() {
            return Vec::new();
        }
        let finished = self.progress.current_round - 1;
        tracing::debug!(round = self.progress.current_round, "workout stopped");

        let mut effects = Vec::new();
        if finished > 0 {
            effects.push(Effect::RecordWorkout {
                record: WorkoutRecord::new(&self.config, finished, Utc::now()),
            });
        }
        effects.extend(cues::stopped());
        effects.push(Effect::WakeLock { held: false });
        effects.push(Effect::Ticking { running: false });
        self.reset();
        effects
    }

    /// One elapsed second. Ignored unless in Work or Rest.
    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.wants_ticks() {
            return Vec::new();
        }
        self.progress.remaining_seconds = self.progress.remaining_seconds.saturating_sub(1);
        let remaining = self.progress.remaining_seconds;
        if remaining > 0 {
            return cues::countdown(remaining, &mut self.progress.last_announced_second);
        }

        let mut effects = vec![cues::phase_end()];
        match self.state {
            TimerState::Work => effects.extend(self.enter_rest(false)),
            TimerState::Rest if self.progress.current_round < self.config.total_rounds => {
                effects.extend(self.enter_next_round())
            }
            TimerState::Rest => effects.extend(self.finish()),
            TimerState::Paused | TimerState::Idle => {}
        }
        effects
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_rest(&mut self, skipped: bool) -> Vec<Effect> {
        self.state = TimerState::Rest;
        self.progress.remaining_seconds = self.config.rest_seconds;
        self.progress.last_announced_second = None;
        tracing::debug!(round = self.progress.current_round, skipped, "rest phase");
        cues::rest(self.config.rest_seconds, skipped)
    }

    fn enter_next_round(&mut self) -> Vec<Effect> {
        self.state = TimerState::Work;
        self.progress.current_round += 1;
        self.progress.remaining_seconds = self.config.work_seconds;
        self.progress.last_announced_second = None;
        tracing::debug!(round = self.progress.current_round, "work phase");
        cues::next_round(self.progress.current_round)
    }

    fn finish(&mut self) -> Vec<Effect> {
        let total = self.config.total_rounds;
        tracing::debug!(rounds = total, "workout complete");
        let mut effects = cues::complete(total);
        effects.push(Effect::Ticking { running: false });
        effects.push(Effect::WakeLock { held: false });
        effects.push(Effect::RecordWorkout {
            record: WorkoutRecord::new(&self.config, total, Utc::now()),
        });
        self.reset();
        effects
    }

    fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.progress = RunProgress::fresh(&self.config);
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfiguration::default())
    }
}
