//! Whole-document export and import.
//!
//! The bulk interface exchanges the entire data set as one JSON document.
//! Import is wholesale replacement: the document is validated up front and
//! applied in a single transaction, or nothing is written at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{DatabaseError, Result};
use crate::muster::MusterEvent;
use crate::roster::Restrictee;
use crate::storage::{Database, Settings};

/// The full persisted data set. Field names follow the document wire
/// format (camelCase keys, "HHMM" times, "YYYY-MM-DD" dates).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub restrictees: Vec<Restrictee>,
    pub muster_records: Vec<MusterEvent>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl AppData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and shape-check a document. A document missing the expected
    /// top-level collections is rejected here, before any mutation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DatabaseError::ImportRejected(e.to_string()).into())
    }
}

impl Database {
    /// Snapshot the entire store as one document.
    pub fn export_document(&self, clock: &dyn Clock) -> Result<AppData> {
        let restrictees = self.list_restrictees(false)?;
        let mut muster_records = Vec::new();
        for r in &restrictees {
            muster_records.extend(self.events_for_restrictee(&r.id)?);
        }
        Ok(AppData {
            restrictees,
            muster_records,
            settings: self.settings()?,
            last_updated: Some(clock.timestamp()),
        })
    }

    /// Replace the entire store with the given document, in one
    /// transaction. Fails closed: any insert failure rolls everything back
    /// and the previous data survives intact.
    pub fn import_document(&self, data: &AppData) -> Result<()> {
        let tx = self.conn().unchecked_transaction()?;
        tx.execute("DELETE FROM muster_records", [])?;
        tx.execute("DELETE FROM restrictees", [])?;
        tx.execute("DELETE FROM settings", [])?;

        for restrictee in &data.restrictees {
            self.insert_restrictee(restrictee)?;
        }
        for event in &data.muster_records {
            self.insert_event(event)?;
        }
        self.put_settings(&data.settings)?;

        tx.commit()?;
        Ok(())
    }
}
