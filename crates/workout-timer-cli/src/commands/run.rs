use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use workout_timer_core::{
    Config, Database, Dispatcher, HistoryStore, Services, TimerConfiguration, TimerEngine,
    WorkoutSession,
};

use super::WorkoutArgs;
use crate::terminal::{
    render, TerminalHaptics, TerminalNotifications, TerminalSpeech, TerminalWakeLock, WatchTicker,
};

const CONTROLS: &str = "controls: p + enter = pause/resume, s + enter = skip, q + enter = stop";

enum Input {
    TogglePause,
    Skip,
    Stop,
    Help,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "p" | "pause" | "" => Input::TogglePause,
        "s" | "skip" => Input::Skip,
        "q" | "stop" | "quit" => Input::Stop,
        _ => Input::Help,
    }
}

/// Forward stdin lines from a plain thread.
///
/// Blocking reads on a runtime thread would keep the runtime from shutting
/// down once the workout ends.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn run(args: WorkoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = args.resolve(&db)?;
    let app_config = Config::load_or_default();

    let (tick_tx, tick_rx) = watch::channel(false);
    let services = Services {
        speech: Box::new(TerminalSpeech::new(app_config.cues.speech_command.clone())),
        haptics: Box::new(TerminalHaptics),
        notifications: Box::new(TerminalNotifications),
        wake_lock: Box::new(TerminalWakeLock),
        history: Box::new(HistoryStore::with_limit(db, app_config.history.limit)),
        ticks: Box::new(WatchTicker::new(tick_tx)),
    };
    let dispatcher = Dispatcher::new(services).with_preferences(app_config.cue_preferences());
    let mut session = WorkoutSession::new(TimerEngine::new(config), dispatcher);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(&mut session, config, tick_rx))?;
    println!();
    Ok(())
}

async fn drive(
    session: &mut WorkoutSession,
    config: TimerConfiguration,
    mut ticking: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{CONTROLS}");
    let mut input = spawn_stdin_reader();
    let mut input_open = true;

    let period = Duration::from_secs(1);
    let mut clock = interval_at(Instant::now() + period, period);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&session.start(config)?);
    // start() already flipped the ticker on; the clock is armed above.
    ticking.borrow_and_update();

    while session.engine().is_running() {
        let active = *ticking.borrow();
        tokio::select! {
            biased;

            _ = tokio::signal::ctrl_c() => {
                render(&session.stop());
            }
            changed = ticking.changed() => {
                if changed.is_err() {
                    break;
                }
                if *ticking.borrow() {
                    clock.reset();
                }
            }
            line = input.recv(), if input_open => {
                let snap = match line.as_deref().map(parse_input) {
                    Some(Input::TogglePause) => session.toggle_pause(),
                    Some(Input::Skip) => session.skip(),
                    Some(Input::Stop) => session.stop(),
                    Some(Input::Help) => {
                        println!("\n{CONTROLS}");
                        session.snapshot()
                    }
                    None => {
                        input_open = false;
                        session.snapshot()
                    }
                };
                render(&snap);
            }
            _ = clock.tick(), if active => {
                render(&session.tick());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_mapping() {
        assert!(matches!(parse_input("p\n"), Input::TogglePause));
        assert!(matches!(parse_input(""), Input::TogglePause));
        assert!(matches!(parse_input(" s "), Input::Skip));
        assert!(matches!(parse_input("quit"), Input::Stop));
        assert!(matches!(parse_input("x"), Input::Help));
    }
}
