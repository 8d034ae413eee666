//! Report commands.

use chrono::NaiveDate;
use clap::Subcommand;
use restrack_core::reports;
use restrack_core::storage::Database;
use restrack_core::{Clock, SystemClock};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Daily muster log across the active roster
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// History report for one restrictee
    Individual {
        /// Restrictee ID
        id: String,
        /// Maximum number of days in the log
        #[arg(long, default_value = "30")]
        days: usize,
    },
    /// Weekly per-slot summary grid
    Weekly {
        /// Week start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let clock = SystemClock;

    match action {
        ReportAction::Daily { date } => {
            let date = date.unwrap_or_else(|| clock.today());
            print!("{}", reports::daily_report(&db, date, &clock)?);
        }
        ReportAction::Individual { id, days } => {
            match reports::individual_report(&db, &id, days, &clock)? {
                Some(report) => print!("{report}"),
                None => println!("Restrictee not found: {id}"),
            }
        }
        ReportAction::Weekly { start } => {
            let start = start.unwrap_or_else(|| clock.today());
            print!("{}", reports::weekly_report(&db, start, &clock)?);
        }
    }
    Ok(())
}
