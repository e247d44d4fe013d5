mod configuration;
pub mod cues;
mod engine;

pub use configuration::{format_clock, TimerConfiguration};
pub use engine::{RunProgress, TimerEngine, TimerSnapshot, TimerState};
