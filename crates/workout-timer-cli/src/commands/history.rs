use chrono::Local;
use clap::Subcommand;
use workout_timer_core::{Config, Database, HistoryStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded workouts, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Totals across the recorded workouts
    Stats,
    /// Delete all recorded workouts
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let limit = Config::load_or_default().history.limit;
    let history = HistoryStore::with_limit(&db, limit);

    match action {
        HistoryAction::List { json } => {
            let log = history.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&log)?);
            } else if log.is_empty() {
                println!("No workout history");
            } else {
                for r in log.records() {
                    let when = r.timestamp.with_timezone(&Local);
                    println!(
                        "{}  {}/{} rounds  {}s work / {}s rest{}",
                        when.format("%Y-%m-%d %H:%M"),
                        r.rounds_completed,
                        r.total_rounds,
                        r.work_seconds,
                        r.rest_seconds,
                        if r.is_complete() { "" } else { "  (stopped)" }
                    );
                }
            }
        }
        HistoryAction::Stats => {
            println!("{}", serde_json::to_string_pretty(&history.stats()?)?);
        }
        HistoryAction::Clear => {
            history.clear()?;
            println!("history cleared");
        }
    }
    Ok(())
}
