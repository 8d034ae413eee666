//! Settings commands.

use clap::Subcommand;
use restrack_core::storage::Database;
use restrack_core::TimeOfDay;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Update settings
    Set {
        /// Unit name used in report headers
        #[arg(long)]
        unit_name: Option<String>,
        /// Default recorder identity
        #[arg(long)]
        default_recorder: Option<String>,
        /// Comma-separated default muster times in HHMM
        #[arg(long)]
        times: Option<String>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&db.settings()?)?);
        }
        SettingsAction::Set {
            unit_name,
            default_recorder,
            times,
        } => {
            let mut settings = db.settings()?;
            if let Some(unit_name) = unit_name {
                settings.unit_name = unit_name;
            }
            if let Some(default_recorder) = default_recorder {
                settings.default_recorder = default_recorder;
            }
            if let Some(spec) = times {
                let mut parsed = spec
                    .split(',')
                    .map(|s| s.trim().parse::<TimeOfDay>())
                    .collect::<Result<Vec<_>, _>>()?;
                parsed.sort();
                parsed.dedup();
                settings.default_muster_times = parsed;
            }
            db.put_settings(&settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
