//! Compliance statistics commands.

use clap::Subcommand;
use restrack_core::stats;
use restrack_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Statistics for one restrictee
    Show {
        /// Restrictee ID
        id: String,
    },
    /// Statistics for every restrictee on the roster
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show { id } => {
            if db.get_restrictee(&id)?.is_none() {
                println!("Restrictee not found: {id}");
                return Ok(());
            }
            let events = db.events_for_restrictee(&id)?;
            println!("{}", serde_json::to_string_pretty(&stats(&events))?);
        }
        StatsAction::All => {
            for r in db.list_restrictees(false)? {
                let events = db.events_for_restrictee(&r.id)?;
                let s = stats(&events);
                println!(
                    "{}  {}  {}% compliant ({} of {} non-missed)",
                    r.id,
                    r.display_name(),
                    s.compliance_rate,
                    s.present + s.late + s.excused,
                    s.total
                );
            }
        }
    }
    Ok(())
}
