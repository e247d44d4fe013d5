//! A timer engine paired with the dispatcher that carries out its effects.
//!
//! Hosts hold one [`WorkoutSession`] and call its commands from UI input and
//! from their one-second clock. Every call returns the snapshot to render.

use crate::dispatch::Dispatcher;
use crate::error::ValidationError;
use crate::timer::{TimerConfiguration, TimerEngine, TimerSnapshot};

pub struct WorkoutSession {
    engine: TimerEngine,
    dispatcher: Dispatcher,
}

impl WorkoutSession {
    pub fn new(engine: TimerEngine, dispatcher: Dispatcher) -> Self {
        Self { engine, dispatcher }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn start(&mut self, config: TimerConfiguration) -> Result<TimerSnapshot, ValidationError> {
        let effects = self.engine.start(config)?;
        self.dispatcher.dispatch(&effects);
        Ok(self.engine.snapshot())
    }

    pub fn toggle_pause(&mut self) -> TimerSnapshot {
        let effects = self.engine.toggle_pause();
        self.dispatcher.dispatch(&effects);
        self.engine.snapshot()
    }

    pub fn skip(&mut self) -> TimerSnapshot {
        let effects = self.engine.skip();
        self.dispatcher.dispatch(&effects);
        self.engine.snapshot()
    }

    pub fn stop(&mut self) -> TimerSnapshot {
        let effects = self.engine.stop();
        self.dispatcher.dispatch(&effects);
        self.engine.snapshot()
    }

    pub fn tick(&mut self) -> TimerSnapshot {
        let effects = self.engine.tick();
        self.dispatcher.dispatch(&effects);
        self.engine.snapshot()
    }

    /// Run every remaining second without waiting.
    ///
    /// Returns the number of ticks delivered. Used for dry runs.
    pub fn run_to_completion(&mut self) -> u64 {
        let mut ticks = 0;
        while self.engine.wants_ticks() {
            self.tick();
            ticks += 1;
        }
        ticks
    }
}
