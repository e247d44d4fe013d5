use clap::Subcommand;
use workout_timer_core::{format_clock, Database, PresetStore, TimerConfiguration};

#[derive(Subcommand)]
pub enum PresetAction {
    /// List presets, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a preset
    Create {
        /// Preset name
        name: String,
        /// Work phase length in seconds
        #[arg(long)]
        work: u32,
        /// Rest phase length in seconds
        #[arg(long)]
        rest: u32,
        /// Number of rounds
        #[arg(long)]
        rounds: u32,
    },
    /// Delete a preset
    Delete {
        /// Preset ID
        id: String,
    },
    /// Make a preset the current timer settings
    Apply {
        /// Preset ID
        id: String,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let presets = PresetStore::new(&db);

    match action {
        PresetAction::List { json } => {
            let list = presets.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for p in &list {
                    let cfg = p.config();
                    println!(
                        "{:<38} {:<20} {}s work / {}s rest x {} ({})",
                        p.id,
                        p.name,
                        cfg.work_seconds,
                        cfg.rest_seconds,
                        cfg.total_rounds,
                        format_clock(cfg.total_duration_secs().try_into().unwrap_or(u32::MAX))
                    );
                }
            }
        }
        PresetAction::Create {
            name,
            work,
            rest,
            rounds,
        } => {
            let preset = presets.create(&name, TimerConfiguration::new(work, rest, rounds)?)?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
        PresetAction::Delete { id } => {
            if presets.delete(&id)? {
                println!("preset deleted: {id}");
            } else {
                return Err(format!("no preset with id '{id}'").into());
            }
        }
        PresetAction::Apply { id } => {
            let preset = presets.apply(&id)?;
            println!("\"{}\" has been applied to the timer", preset.name);
        }
    }
    Ok(())
}
