//! What the timer says and how it buzzes.
//!
//! Every user-facing line lives here so the engine reads as a pure
//! transition table.

use crate::events::{Effect, PulseIntensity};

/// Remaining-second values that get a spoken countdown.
pub const COUNTDOWN_MARKS: [u32; 5] = [10, 5, 3, 2, 1];

/// Vibration waveform for phase boundaries and skips.
pub const HEAVY_PATTERN: [u64; 4] = [0, 200, 100, 200];

/// Vibration waveform for an explicit stop.
pub const STOP_PATTERN: [u64; 4] = [0, 100, 50, 100];

/// Countdown cue for `remaining`, unless it was already announced this phase.
///
/// Updates `last_announced` when a cue fires.
pub fn countdown(remaining: u32, last_announced: &mut Option<u32>) -> Vec<Effect> {
    if !COUNTDOWN_MARKS.contains(&remaining) || *last_announced == Some(remaining) {
        return Vec::new();
    }
    *last_announced = Some(remaining);
    let text = if remaining == 10 {
        "10 seconds".to_string()
    } else {
        remaining.to_string()
    };
    vec![Effect::speak(text), Effect::pulse(PulseIntensity::Light)]
}

pub fn started(total_rounds: u32) -> Vec<Effect> {
    vec![
        Effect::speak(format!("Starting workout. {total_rounds} rounds. Get ready!")),
        Effect::pulse_pattern(PulseIntensity::Heavy, &HEAVY_PATTERN),
    ]
}

pub fn paused() -> Vec<Effect> {
    vec![Effect::speak("Paused"), Effect::pulse(PulseIntensity::Medium)]
}

pub fn resumed() -> Vec<Effect> {
    vec![Effect::speak("Resuming"), Effect::pulse(PulseIntensity::Medium)]
}

pub fn stopped() -> Vec<Effect> {
    vec![
        Effect::speak("Workout stopped"),
        Effect::pulse_pattern(PulseIntensity::Medium, &STOP_PATTERN),
    ]
}

/// The strong buzz at a phase boundary or skip.
pub fn phase_end() -> Effect {
    Effect::pulse_pattern(PulseIntensity::Heavy, &HEAVY_PATTERN)
}

/// Entering rest. Skips say "Rest time!", natural boundaries say "Rest!".
pub fn rest(rest_seconds: u32, skipped: bool) -> Vec<Effect> {
    let line = if skipped { "Rest time!" } else { "Rest!" };
    vec![
        Effect::speak(line),
        Effect::notify("Rest Time", format!("Take a {rest_seconds} second break")),
    ]
}

pub fn next_round(round: u32) -> Vec<Effect> {
    vec![
        Effect::speak(format!("Round {round}. Go!")),
        Effect::notify(format!("Round {round}"), "Time to work!"),
    ]
}

pub fn complete(total_rounds: u32) -> Vec<Effect> {
    vec![
        Effect::speak("Workout complete! Great job!"),
        Effect::notify(
            "Workout Complete",
            format!("You finished {total_rounds} rounds!"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_once_per_mark() {
        let mut last = None;
        let first = countdown(5, &mut last);
        assert_eq!(first[0], Effect::speak("5"));
        assert_eq!(last, Some(5));
        assert!(countdown(5, &mut last).is_empty());
    }

    #[test]
    fn countdown_ignores_unmarked_seconds() {
        let mut last = None;
        for s in [29, 11, 9, 6, 4] {
            assert!(countdown(s, &mut last).is_empty());
        }
        assert_eq!(last, None);
    }

    #[test]
    fn ten_is_spoken_with_unit() {
        let mut last = None;
        let effects = countdown(10, &mut last);
        assert_eq!(effects[0].spoken(), Some("10 seconds"));
        assert_eq!(effects[1], Effect::pulse(PulseIntensity::Light));
    }
}
