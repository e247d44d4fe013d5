//! Integration tests for complete workout runs.
//!
//! Drives a session tick by tick through the public API, with history going
//! to a real SQLite file the way the CLI wires it.

use workout_timer_core::dispatch::{Services, TickSource};
use workout_timer_core::{
    Database, Dispatcher, Effect, HistoryStore, RecordingServices, TimerConfiguration,
    TimerEngine, TimerState, WorkoutSession,
};

fn phase_sequence(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(Effect::spoken)
        .filter(|s| s.starts_with("Round") || s.starts_with("Rest") || s.starts_with("Workout"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_thirty_ten_two_rounds_scenario() {
    let recorder = RecordingServices::new();
    let mut session = WorkoutSession::new(
        TimerEngine::default(),
        Dispatcher::new(recorder.services()),
    );

    let snap = session
        .start(TimerConfiguration::new(30, 10, 2).unwrap())
        .unwrap();
    assert_eq!(snap.state, TimerState::Work);
    assert_eq!(snap.current_round, 1);
    assert_eq!(snap.remaining_seconds, 30);

    for _ in 0..30 {
        session.tick();
    }
    let snap = session.snapshot();
    assert_eq!((snap.state, snap.remaining_seconds), (TimerState::Rest, 10));

    for _ in 0..10 {
        session.tick();
    }
    let snap = session.snapshot();
    assert_eq!(
        (snap.state, snap.current_round, snap.remaining_seconds),
        (TimerState::Work, 2, 30)
    );

    for _ in 0..30 {
        session.tick();
    }
    assert_eq!(session.snapshot().state, TimerState::Rest);

    for _ in 0..10 {
        session.tick();
    }
    assert_eq!(session.snapshot().state, TimerState::Idle);

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(
        (r.rounds_completed, r.total_rounds, r.work_seconds, r.rest_seconds),
        (2, 2, 30, 10)
    );

    assert_eq!(
        phase_sequence(&recorder.effects()),
        vec![
            "Rest!",
            "Round 2. Go!",
            "Rest!",
            "Workout complete! Great job!"
        ]
    );
}

#[test]
fn test_records_persist_to_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workout-timer.db");

    let mut services = Services::silent();
    services.history = Box::new(HistoryStore::new(Database::open_at(&path).unwrap()));
    let mut session = WorkoutSession::new(TimerEngine::default(), Dispatcher::new(services));

    // Completed run
    session
        .start(TimerConfiguration::new(2, 2, 2).unwrap())
        .unwrap();
    session.run_to_completion();

    // Stopped in round 3 of 4, two rounds finished
    session
        .start(TimerConfiguration::new(2, 2, 4).unwrap())
        .unwrap();
    for _ in 0..9 {
        session.tick();
    }
    assert_eq!(session.snapshot().current_round, 3);
    session.stop();

    // Stopped in round 1, nothing recorded
    session.start(TimerConfiguration::default()).unwrap();
    session.tick();
    session.stop();

    let history = HistoryStore::new(Database::open_at(&path).unwrap());
    let log = history.load().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.records()[0].rounds_completed, 2);
    assert_eq!(log.records()[0].total_rounds, 4);
    assert_eq!(log.records()[1].rounds_completed, 2);
    assert!(log.records()[1].is_complete());
}

struct Flag(std::sync::Arc<std::sync::atomic::AtomicBool>);

impl TickSource for Flag {
    fn set_running(&self, running: bool) {
        self.0.store(running, std::sync::atomic::Ordering::SeqCst);
    }
}

#[test]
fn test_tick_source_follows_active_phases() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let flag = Arc::new(AtomicBool::new(false));
    let mut services = Services::silent();
    services.ticks = Box::new(Flag(flag.clone()));
    let mut session = WorkoutSession::new(TimerEngine::default(), Dispatcher::new(services));

    session.start(TimerConfiguration::new(5, 5, 1).unwrap()).unwrap();
    assert!(flag.load(Ordering::SeqCst));
    session.toggle_pause();
    assert!(!flag.load(Ordering::SeqCst));
    session.toggle_pause();
    assert!(flag.load(Ordering::SeqCst));
    session.skip();
    assert!(flag.load(Ordering::SeqCst));
    session.skip();
    assert!(!flag.load(Ordering::SeqCst));
    assert_eq!(session.engine().wants_ticks(), flag.load(Ordering::SeqCst));
}
