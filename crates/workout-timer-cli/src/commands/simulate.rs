use workout_timer_core::{
    Config, Database, Dispatcher, Effect, RecordingServices, TimerEngine, WorkoutSession,
};

use super::WorkoutArgs;

/// Human-readable form of one effect.
fn describe(effect: &Effect) -> String {
    match effect {
        Effect::Speak { text } => format!("speak    {text}"),
        Effect::Pulse { intensity, pattern } => match pattern {
            Some(p) => format!("pulse    {intensity:?} {p:?}"),
            None => format!("pulse    {intensity:?}"),
        },
        Effect::Notify { title, body } => format!("notify   {title}: {body}"),
        Effect::RecordWorkout { record } => format!(
            "record   {}/{} rounds ({}s work, {}s rest)",
            record.rounds_completed, record.total_rounds, record.work_seconds, record.rest_seconds
        ),
        Effect::WakeLock { held } => format!("wakelock {}", if *held { "on" } else { "off" }),
        Effect::Ticking { running } => format!("clock    {}", if *running { "on" } else { "off" }),
    }
}

/// Play a whole workout without waiting. Nothing is written to history.
pub fn run(args: WorkoutArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve(&Database::open()?)?;
    let prefs = Config::load_or_default().cue_preferences();

    let recorder = RecordingServices::new();
    let dispatcher = Dispatcher::new(recorder.services()).with_preferences(prefs);
    let mut session = WorkoutSession::new(TimerEngine::new(config), dispatcher);

    session.start(config)?;
    let mut second = 0u64;
    let emit = |second: u64, effects: Vec<Effect>| -> Result<(), serde_json::Error> {
        for effect in effects {
            if json {
                let mut value = serde_json::to_value(&effect)?;
                value["second"] = second.into();
                println!("{value}");
            } else {
                println!("{:>5}  {}", second, describe(&effect));
            }
        }
        Ok(())
    };

    emit(second, recorder.take())?;
    while session.engine().wants_ticks() {
        session.tick();
        second += 1;
        emit(second, recorder.take())?;
    }
    if !json {
        println!("total {second}s");
    }
    Ok(())
}
