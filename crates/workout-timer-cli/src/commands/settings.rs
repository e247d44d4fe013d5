use clap::Subcommand;
use workout_timer_core::{Database, SettingsStore, TimerConfiguration};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the saved settings as JSON
    Show,
    /// Update one or more settings
    Set {
        /// Work phase length in seconds
        #[arg(long)]
        work: Option<u32>,
        /// Rest phase length in seconds
        #[arg(long)]
        rest: Option<u32>,
        /// Number of rounds
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Restore the default settings
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let settings = SettingsStore::new(&db);

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings.load())?);
        }
        SettingsAction::Set { work, rest, rounds } => {
            let current = settings.load();
            let updated = TimerConfiguration::new(
                work.unwrap_or(current.work_seconds),
                rest.unwrap_or(current.rest_seconds),
                rounds.unwrap_or(current.total_rounds),
            )?;
            settings.save(&updated)?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        SettingsAction::Reset => {
            settings.save(&TimerConfiguration::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
