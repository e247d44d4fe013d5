//! Terminal implementations of the platform services.
//!
//! A terminal has no vibration motor, notification centre or wake-lock, so
//! cues become printed lines (and the bell for strong pulses). Speech goes to
//! an external TTS program when one is configured.

use std::io::Write;
use std::process::{Command, Stdio};

use tokio::sync::watch;
use workout_timer_core::dispatch::{
    HapticService, NotificationService, SpeechService, TickSource, WakeLockService,
};
use workout_timer_core::{format_clock, PulseIntensity, ServiceError, TimerSnapshot, TimerState};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Print a full line above the status line.
fn print_line(text: &str) {
    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "{CLEAR_LINE}{text}");
    let _ = out.flush();
}

/// Redraw the single status line for the current snapshot.
pub fn render(snap: &TimerSnapshot) {
    let label = match snap.state {
        TimerState::Idle => "READY",
        TimerState::Work => "WORK",
        TimerState::Rest => "REST",
        TimerState::Paused => "PAUSED",
    };
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        "{CLEAR_LINE}{label:<6}  round {}/{}  {}",
        snap.current_round,
        snap.total_rounds,
        format_clock(snap.remaining_seconds)
    );
    let _ = out.flush();
}

pub struct TerminalSpeech {
    command: Option<String>,
}

impl TerminalSpeech {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

impl SpeechService for TerminalSpeech {
    fn speak(&self, text: &str) -> Result<(), ServiceError> {
        print_line(&format!(">> {text}"));
        let Some(program) = &self.command else {
            return Ok(());
        };
        let mut child = Command::new(program)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ServiceError::Failed {
                service: "speech",
                message: format!("{program}: {e}"),
            })?;
        // Reap in the background; speech must not hold up the tick loop.
        std::thread::spawn(move || child.wait());
        Ok(())
    }
}

pub struct TerminalHaptics;

impl HapticService for TerminalHaptics {
    fn pulse(&self, intensity: PulseIntensity, _pattern: Option<&[u64]>) -> Result<(), ServiceError> {
        if intensity == PulseIntensity::Heavy {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\x07");
            let _ = out.flush();
        }
        Ok(())
    }
}

pub struct TerminalNotifications;

impl NotificationService for TerminalNotifications {
    fn notify(&self, title: &str, body: &str) -> Result<(), ServiceError> {
        print_line(&format!("[{title}] {body}"));
        Ok(())
    }
}

/// Terminals cannot keep a display awake; the request is only logged.
pub struct TerminalWakeLock;

impl WakeLockService for TerminalWakeLock {
    fn acquire(&self) -> Result<(), ServiceError> {
        tracing::debug!("wake-lock requested; terminal host keeps running regardless");
        Ok(())
    }

    fn release(&self) -> Result<(), ServiceError> {
        tracing::debug!("wake-lock released");
        Ok(())
    }
}

/// Publishes the engine's tick requests to the run loop.
pub struct WatchTicker {
    tx: watch::Sender<bool>,
}

impl WatchTicker {
    pub fn new(tx: watch::Sender<bool>) -> Self {
        Self { tx }
    }
}

impl TickSource for WatchTicker {
    fn set_running(&self, running: bool) {
        self.tx.send_replace(running);
    }
}
