//! # Workout Timer Core Library
//!
//! Core logic for an interval-workout timer that alternates work and rest
//! phases over a number of rounds, announcing each transition by voice,
//! vibration and notification, and keeping a history of finished runs.
//! The CLI is a thin host over this crate; any other host (watch, phone,
//! desktop) implements the same service traits.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A discrete state machine advanced by one `tick()` per
//!   second. Commands return [`Effect`]s instead of performing I/O.
//! - **Dispatch**: Routes effects to speech, haptic, notification,
//!   wake-lock, history and clock services, logging and dropping failures.
//! - **Storage**: Key-value persistence (SQLite) for settings, presets and
//!   history, plus a TOML configuration file.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`WorkoutSession`]: Engine plus dispatcher, the object hosts drive
//! - [`Database`]: SQLite key-value store
//! - [`Config`]: Application configuration management

pub mod dispatch;
pub mod error;
pub mod events;
pub mod history;
pub mod presets;
pub mod session;
pub mod storage;
pub mod timer;

pub use dispatch::{CuePreferences, Dispatcher, RecordingServices, Services};
pub use error::{ConfigError, CoreError, DatabaseError, ServiceError, ValidationError};
pub use events::{Effect, PulseIntensity};
pub use history::{HistoryLog, HistoryStats, WorkoutRecord, HISTORY_LIMIT};
pub use presets::WorkoutPreset;
pub use session::WorkoutSession;
pub use storage::{Config, Database, HistoryStore, KvStore, MemoryStore, PresetStore, SettingsStore};
pub use timer::{format_clock, TimerConfiguration, TimerEngine, TimerSnapshot, TimerState};
