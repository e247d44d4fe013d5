//! Workout history: the record a run leaves behind and the capped log
//! those records are kept in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerConfiguration;

/// Maximum number of records kept; older entries fall off the end.
pub const HISTORY_LIMIT: usize = 50;

/// Outcome of one run, written once when the run ends.
///
/// Legacy clients wrote `{date, rounds, totalRounds, workTime, restTime}`;
/// those keys are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
    #[serde(alias = "rounds")]
    pub rounds_completed: u32,
    pub total_rounds: u32,
    #[serde(alias = "workTime")]
    pub work_seconds: u32,
    #[serde(alias = "restTime")]
    pub rest_seconds: u32,
}

impl WorkoutRecord {
    pub fn new(config: &TimerConfiguration, rounds_completed: u32, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            rounds_completed,
            total_rounds: config.total_rounds,
            work_seconds: config.work_seconds,
            rest_seconds: config.rest_seconds,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.rounds_completed >= self.total_rounds
    }

    /// Whole minutes of exercise, rest included, floored.
    pub fn minutes(&self) -> u64 {
        let per_round = u64::from(self.work_seconds) + u64::from(self.rest_seconds);
        u64::from(self.rounds_completed).saturating_mul(per_round) / 60
    }
}

/// Aggregate figures shown above the history list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_workouts: u64,
    pub total_rounds: u64,
    pub total_minutes: u64,
}

/// Newest-first list of workout records, capped at a fixed length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<WorkoutRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(mut records: Vec<WorkoutRecord>, limit: usize) -> Self {
        records.truncate(limit);
        Self { records }
    }

    /// Insert at the front and drop whatever exceeds `limit`.
    pub fn push(&mut self, record: WorkoutRecord, limit: usize) {
        self.records.insert(0, record);
        self.records.truncate(limit);
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> HistoryStats {
        self.records.iter().fold(HistoryStats::default(), |mut acc, r| {
            acc.total_workouts += 1;
            acc.total_rounds += u64::from(r.rounds_completed);
            acc.total_minutes += r.minutes();
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rounds: u32, work: u32, rest: u32) -> WorkoutRecord {
        let cfg = TimerConfiguration::new(work, rest, 10).unwrap();
        WorkoutRecord::new(&cfg, rounds, Utc::now())
    }

    #[test]
    fn push_is_newest_first() {
        let mut log = HistoryLog::new();
        log.push(record(1, 30, 10), HISTORY_LIMIT);
        log.push(record(2, 30, 10), HISTORY_LIMIT);
        assert_eq!(log.records()[0].rounds_completed, 2);
        assert_eq!(log.records()[1].rounds_completed, 1);
    }

    #[test]
    fn push_caps_length() {
        let mut log = HistoryLog::new();
        for i in 0..(HISTORY_LIMIT as u32 + 5) {
            log.push(record(i, 30, 10), HISTORY_LIMIT);
        }
        assert_eq!(log.len(), HISTORY_LIMIT);
        // The five oldest (rounds 0..5) were dropped.
        assert_eq!(log.records().last().unwrap().rounds_completed, 5);
    }

    #[test]
    fn stats_floor_minutes_per_record() {
        let log = HistoryLog::from_records(
            vec![record(2, 30, 10), record(5, 40, 60), record(1, 20, 10)],
            HISTORY_LIMIT,
        );
        let stats = log.stats();
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_rounds, 8);
        // 80s -> 1, 500s -> 8, 30s -> 0
        assert_eq!(stats.total_minutes, 9);
    }

    #[test]
    fn reads_legacy_record_keys() {
        let json = r#"[{"date":"2025-01-02T10:00:00.000Z","rounds":3,"totalRounds":5,"workTime":30,"restTime":10}]"#;
        let log: HistoryLog = serde_json::from_str(json).unwrap();
        let r = &log.records()[0];
        assert_eq!(r.rounds_completed, 3);
        assert_eq!(r.total_rounds, 5);
        assert!(!r.is_complete());
    }
}
