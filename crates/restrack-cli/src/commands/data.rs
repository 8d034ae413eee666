//! Bulk export/import commands.

use std::path::PathBuf;

use clap::Subcommand;
use restrack_core::storage::{AppData, Database};
use restrack_core::SystemClock;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full data set as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the full data set from a JSON document
    Import {
        /// Input file
        input: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let clock = SystemClock;

    match action {
        DataAction::Export { output } => {
            let json = db.export_document(&clock)?.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { input } => {
            let json = std::fs::read_to_string(&input)?;
            let data = AppData::from_json(&json)?;
            db.import_document(&data)?;
            println!(
                "Imported {} restrictees and {} muster records",
                data.restrictees.len(),
                data.muster_records.len()
            );
        }
    }
    Ok(())
}
