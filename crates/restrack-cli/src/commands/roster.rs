//! Roster management commands.

use chrono::NaiveDate;
use clap::Subcommand;
use restrack_core::storage::Database;
use restrack_core::time::calculate_end_date;
use restrack_core::{
    sort_for_display, Clock, CoreError, RestricteeDraft, RestrictionType, SystemClock, TimeOfDay,
};

#[derive(Subcommand)]
pub enum RosterAction {
    /// Add a restrictee
    Add {
        /// Rank (e.g. PFC)
        rank: String,
        /// Last name
        last_name: String,
        /// First name
        first_name: String,
        /// Start date (YYYY-MM-DD)
        start_date: NaiveDate,
        /// Days awarded (1-60)
        days: i64,
        /// Middle initial
        #[arg(long)]
        mi: Option<String>,
        /// Service number
        #[arg(long)]
        edipi: Option<String>,
        /// Unit
        #[arg(long)]
        unit: Option<String>,
        /// Restriction type: restriction, epd, or correctional_custody
        #[arg(long, default_value = "restriction")]
        restriction_type: String,
        /// Comma-separated muster times in HHMM (defaults to settings)
        #[arg(long)]
        times: Option<String>,
        /// Offense description
        #[arg(long)]
        offense: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List restrictees
    List {
        /// Include completed restrictions
        #[arg(long)]
        all: bool,
    },
    /// Show one restrictee
    Show {
        /// Restrictee ID
        id: String,
    },
    /// Update a restrictee
    Update {
        /// Restrictee ID
        id: String,
        #[arg(long)]
        rank: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        mi: Option<String>,
        /// Service number
        #[arg(long)]
        edipi: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        /// Restriction type: restriction, epd, or correctional_custody
        #[arg(long)]
        restriction_type: Option<String>,
        /// New start date (YYYY-MM-DD); recomputes the end date
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// New days awarded; recomputes the end date
        #[arg(long)]
        days: Option<u16>,
        /// Comma-separated muster times in HHMM
        #[arg(long)]
        times: Option<String>,
        #[arg(long)]
        offense: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a restriction complete
    Complete {
        /// Restrictee ID
        id: String,
    },
    /// Remove a restrictee and all their muster records
    Remove {
        /// Restrictee ID
        id: String,
    },
}

fn parse_times(spec: &str) -> Result<Vec<TimeOfDay>, Box<dyn std::error::Error>> {
    spec.split(',')
        .map(|s| s.trim().parse::<TimeOfDay>().map_err(Into::into))
        .collect()
}

pub fn run(action: RosterAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let clock = SystemClock;

    match action {
        RosterAction::Add {
            rank,
            last_name,
            first_name,
            start_date,
            days,
            mi,
            edipi,
            unit,
            restriction_type,
            times,
            offense,
            notes,
        } => {
            let muster_times = match times {
                Some(spec) => parse_times(&spec)?,
                None => db.settings()?.default_muster_times,
            };
            let draft = RestricteeDraft {
                rank,
                last_name,
                first_name,
                mi: mi.unwrap_or_default(),
                edipi: edipi.unwrap_or_default(),
                unit: unit.unwrap_or_default(),
                restriction_type: Some(restriction_type.parse::<RestrictionType>()?),
                start_date: Some(start_date),
                days_awarded: days,
                offense: offense.unwrap_or_default(),
                muster_times,
                notes: notes.unwrap_or_default(),
            };
            let restrictee = draft.into_restrictee(&clock)?;
            db.insert_restrictee(&restrictee)?;
            println!("Restrictee added: {}", restrictee.id);
            println!("{}", serde_json::to_string_pretty(&restrictee)?);
        }
        RosterAction::List { all } => {
            let mut restrictees = db.list_restrictees(!all)?;
            sort_for_display(&mut restrictees, clock.today());
            for r in &restrictees {
                let marker = if r.active { "" } else { " (completed)" };
                let times: Vec<String> = r.muster_times.iter().map(|t| t.to_hhmm()).collect();
                println!(
                    "{}  {}  {} - {}  [{}]{}",
                    r.id,
                    r.display_name(),
                    r.start_date,
                    r.end_date,
                    times.join(","),
                    marker
                );
            }
        }
        RosterAction::Show { id } => match db.get_restrictee(&id)? {
            Some(restrictee) => println!("{}", serde_json::to_string_pretty(&restrictee)?),
            None => println!("Restrictee not found: {id}"),
        },
        RosterAction::Update {
            id,
            rank,
            last_name,
            first_name,
            mi,
            edipi,
            unit,
            restriction_type,
            start_date,
            days,
            times,
            offense,
            notes,
        } => {
            let Some(mut restrictee) = db.get_restrictee(&id)? else {
                println!("Restrictee not found: {id}");
                return Ok(());
            };
            if let Some(rank) = rank {
                restrictee.rank = rank;
            }
            if let Some(last_name) = last_name {
                restrictee.last_name = last_name.to_uppercase();
            }
            if let Some(first_name) = first_name {
                restrictee.first_name = first_name;
            }
            if let Some(mi) = mi {
                restrictee.mi = mi.to_uppercase();
            }
            if let Some(edipi) = edipi {
                restrictee.edipi = edipi;
            }
            if let Some(unit) = unit {
                restrictee.unit = unit;
            }
            if let Some(spec) = restriction_type {
                restrictee.restriction_type = spec.parse::<RestrictionType>()?;
            }
            if let Some(start_date) = start_date {
                restrictee.start_date = start_date;
            }
            if let Some(days) = days {
                restrictee.days_awarded = days;
            }
            if let Some(spec) = times {
                let mut parsed = parse_times(&spec)?;
                parsed.sort();
                parsed.dedup();
                restrictee.muster_times = parsed;
            }
            if let Some(offense) = offense {
                restrictee.offense = offense;
            }
            if let Some(notes) = notes {
                restrictee.notes = notes;
            }
            restrictee.end_date =
                calculate_end_date(restrictee.start_date, restrictee.days_awarded);
            // Edits get the same checks as creation; nothing is persisted
            // while the record is out of bounds.
            let errors = restrictee.validate();
            if !errors.is_empty() {
                return Err(CoreError::Validation(errors).into());
            }
            restrictee.updated_at = Some(clock.timestamp());
            db.update_restrictee(&restrictee)?;
            println!("{}", serde_json::to_string_pretty(&restrictee)?);
        }
        RosterAction::Complete { id } => {
            if db.complete_restrictee(&id, clock.timestamp())? {
                println!("Restriction completed: {id}");
            } else {
                println!("Restrictee not found: {id}");
            }
        }
        RosterAction::Remove { id } => {
            if db.delete_restrictee(&id)? {
                println!("Restrictee removed: {id}");
            } else {
                println!("Restrictee not found: {id}");
            }
        }
    }
    Ok(())
}
