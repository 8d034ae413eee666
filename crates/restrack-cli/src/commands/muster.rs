//! Muster sign-in commands.

use chrono::NaiveDate;
use clap::Subcommand;
use restrack_core::storage::Database;
use restrack_core::{build_daily_log, Clock, Outcome, SignIn, SystemClock, TimeOfDay};

#[derive(Subcommand)]
pub enum MusterAction {
    /// Record a sign-in
    Record {
        /// Restrictee ID
        restrictee_id: String,
        /// Scheduled time (HHMM)
        time: TimeOfDay,
        /// Outcome: present, late, missed, or excused
        outcome: Outcome,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Actual sign-in time (HHMM), defaults to now
        #[arg(long)]
        actual: Option<TimeOfDay>,
        /// Recorder identity, defaults to settings
        #[arg(long)]
        recorded_by: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Daily log for a restrictee
    Log {
        /// Restrictee ID
        restrictee_id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sign-in history grouped by date
    History {
        /// Restrictee ID
        restrictee_id: String,
        /// Maximum number of days
        #[arg(long, default_value = "7")]
        days: usize,
    },
    /// Correct a recorded sign-in
    Correct {
        /// Event ID
        event_id: String,
        /// New outcome
        #[arg(long)]
        outcome: Option<Outcome>,
        /// New actual time (HHMM)
        #[arg(long)]
        actual: Option<TimeOfDay>,
        #[arg(long)]
        recorded_by: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a recorded sign-in
    Remove {
        /// Event ID
        event_id: String,
    },
}

pub fn run(action: MusterAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let clock = SystemClock;

    match action {
        MusterAction::Record {
            restrictee_id,
            time,
            outcome,
            date,
            actual,
            recorded_by,
            notes,
        } => {
            if db.get_restrictee(&restrictee_id)?.is_none() {
                println!("Restrictee not found: {restrictee_id}");
                return Ok(());
            }
            let event = db.record_sign_in(
                SignIn {
                    restrictee_id,
                    scheduled_time: time,
                    outcome,
                    date,
                    actual_time: actual,
                    recorded_by,
                    notes,
                },
                &clock,
            )?;
            println!("Sign-in recorded: {}", event.id);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MusterAction::Log {
            restrictee_id,
            date,
        } => {
            let Some(restrictee) = db.get_restrictee(&restrictee_id)? else {
                println!("Restrictee not found: {restrictee_id}");
                return Ok(());
            };
            let date = date.unwrap_or_else(|| clock.today());
            let records = db.events_for_date(&restrictee_id, date)?;
            let log = build_daily_log(&restrictee, date, &records, &clock);
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        MusterAction::History {
            restrictee_id,
            days,
        } => {
            for (date, events) in db.events_grouped_by_date(&restrictee_id, days)? {
                println!("{date}");
                for event in events {
                    let actual = event
                        .actual_time
                        .map(|t| format!(" at {t}"))
                        .unwrap_or_default();
                    println!(
                        "  {} {} - {}{} ({})",
                        event.id,
                        event.scheduled_time,
                        event.outcome,
                        actual,
                        event.recorded_by
                    );
                }
            }
        }
        MusterAction::Correct {
            event_id,
            outcome,
            actual,
            recorded_by,
            notes,
        } => {
            let Some(mut event) = db.get_event(&event_id)? else {
                println!("Event not found: {event_id}");
                return Ok(());
            };
            if let Some(outcome) = outcome {
                event.outcome = outcome;
            }
            if let Some(actual) = actual {
                event.actual_time = Some(actual);
            }
            if let Some(recorded_by) = recorded_by {
                event.recorded_by = recorded_by;
            }
            if let Some(notes) = notes {
                event.notes = Some(notes);
            }
            event.updated_at = Some(clock.timestamp());
            db.update_event(&event)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MusterAction::Remove { event_id } => {
            if db.delete_event(&event_id)? {
                println!("Event removed: {event_id}");
            } else {
                println!("Event not found: {event_id}");
            }
        }
    }
    Ok(())
}
