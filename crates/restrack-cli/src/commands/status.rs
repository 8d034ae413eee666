//! Derived status commands.

use clap::Subcommand;
use restrack_core::storage::Database;
use restrack_core::{roster_status, sort_for_display, Clock, SystemClock, Urgency};

#[derive(Subcommand)]
pub enum StatusAction {
    /// Status board for the active roster
    Board,
    /// Detailed status for one restrictee
    Show {
        /// Restrictee ID
        id: String,
    },
}

fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Nominal => "[ OK ]",
        Urgency::Warning => "[SOON]",
        Urgency::Danger => "[LATE]",
    }
}

pub fn run(action: StatusAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let clock = SystemClock;

    match action {
        StatusAction::Board => {
            let mut restrictees = db.list_restrictees(true)?;
            sort_for_display(&mut restrictees, clock.today());
            for r in &restrictees {
                let events = db.events_for_date(&r.id, clock.today())?;
                let status = roster_status(r, &events, &clock);
                let next = match &status.next_muster {
                    Some(n) => format!("next {} ({})", n.time, n.status),
                    None => "all musters complete".to_string(),
                };
                println!(
                    "{} {}  {} days left  {}",
                    urgency_marker(status.urgency),
                    r.display_name(),
                    status.days_remaining,
                    next
                );
            }
        }
        StatusAction::Show { id } => {
            let Some(restrictee) = db.get_restrictee(&id)? else {
                println!("Restrictee not found: {id}");
                return Ok(());
            };
            let events = db.events_for_date(&id, clock.today())?;
            let status = roster_status(&restrictee, &events, &clock);
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
