//! SQLite-backed repository for restrictees, muster events, and settings.
//!
//! The store enforces the one-event-per-slot invariant with a unique index
//! on (restrictee, date, scheduled time); a duplicate sign-in is rejected
//! before anything is written. Lookups that miss return `Ok(None)`.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{DatabaseError, Result};
use crate::muster::{MusterEvent, Outcome, SignIn};
use crate::roster::{Restrictee, RestrictionType};
use crate::storage::{data_dir, Settings};
use crate::time::TimeOfDay;

const SETTINGS_KEY: &str = "settings";

// === Row helpers ===

fn format_restriction_type(t: RestrictionType) -> &'static str {
    match t {
        RestrictionType::Restriction => "restriction",
        RestrictionType::Epd => "epd",
        RestrictionType::CorrectionalCustody => "correctional_custody",
    }
}

fn parse_restriction_type(s: &str) -> RestrictionType {
    match s {
        "epd" => RestrictionType::Epd,
        "correctional_custody" => RestrictionType::CorrectionalCustody,
        _ => RestrictionType::Restriction,
    }
}

fn format_outcome(o: Outcome) -> &'static str {
    match o {
        Outcome::Present => "present",
        Outcome::Late => "late",
        Outcome::Missed => "missed",
        Outcome::Excused => "excused",
    }
}

fn parse_outcome(s: &str) -> Outcome {
    match s {
        "late" => Outcome::Late,
        "missed" => Outcome::Missed,
        "excused" => Outcome::Excused,
        _ => Outcome::Present,
    }
}

/// Parse datetime from RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn conversion_err(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_column(idx: usize, s: &str) -> Result<NaiveDate, rusqlite::Error> {
    s.parse().map_err(|e| conversion_err(idx, e))
}

fn parse_time_column(idx: usize, s: &str) -> Result<TimeOfDay, rusqlite::Error> {
    s.parse().map_err(|e| conversion_err(idx, e))
}

/// Build a Restrictee from a full `restrictees` row.
fn row_to_restrictee(row: &rusqlite::Row) -> Result<Restrictee, rusqlite::Error> {
    let restriction_type: String = row.get(7)?;
    let start_date: String = row.get(8)?;
    let end_date: String = row.get(9)?;
    let muster_times_json: String = row.get(12)?;
    let muster_times: Vec<TimeOfDay> = serde_json::from_str(&muster_times_json)
        .map_err(|e| conversion_err(12, e))?;
    let created_at: String = row.get(15)?;
    let updated_at: Option<String> = row.get(16)?;
    let completed_at: Option<String> = row.get(17)?;

    Ok(Restrictee {
        id: row.get(0)?,
        rank: row.get(1)?,
        last_name: row.get(2)?,
        first_name: row.get(3)?,
        mi: row.get(4)?,
        edipi: row.get(5)?,
        unit: row.get(6)?,
        restriction_type: parse_restriction_type(&restriction_type),
        start_date: parse_date_column(8, &start_date)?,
        end_date: parse_date_column(9, &end_date)?,
        days_awarded: row.get(10)?,
        offense: row.get(11)?,
        muster_times,
        notes: row.get(13)?,
        active: row.get(14)?,
        created_at: parse_datetime_fallback(&created_at),
        updated_at: updated_at.as_deref().map(parse_datetime_fallback),
        completed_at: completed_at.as_deref().map(parse_datetime_fallback),
    })
}

/// Build a MusterEvent from a full `muster_records` row.
fn row_to_event(row: &rusqlite::Row) -> Result<MusterEvent, rusqlite::Error> {
    let date: String = row.get(2)?;
    let scheduled_time: String = row.get(3)?;
    let actual_time: Option<String> = row.get(4)?;
    let outcome: String = row.get(5)?;
    let timestamp: String = row.get(8)?;
    let updated_at: Option<String> = row.get(9)?;

    Ok(MusterEvent {
        id: row.get(0)?,
        restrictee_id: row.get(1)?,
        date: parse_date_column(2, &date)?,
        scheduled_time: parse_time_column(3, &scheduled_time)?,
        actual_time: actual_time
            .map(|s| parse_time_column(4, &s))
            .transpose()?,
        outcome: parse_outcome(&outcome),
        recorded_by: row.get(6)?,
        notes: row.get(7)?,
        timestamp: parse_datetime_fallback(&timestamp),
        updated_at: updated_at.as_deref().map(parse_datetime_fallback),
    })
}

const RESTRICTEE_COLUMNS: &str = "id, rank, last_name, first_name, mi, edipi, unit, \
     restriction_type, start_date, end_date, days_awarded, offense, muster_times, \
     notes, active, created_at, updated_at, completed_at";

const EVENT_COLUMNS: &str = "id, restrictee_id, date, scheduled_time, actual_time, \
     outcome, recorded_by, notes, timestamp, updated_at";

/// SQLite repository for the whole application data set.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/restrack/restrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("restrack.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS restrictees (
                id               TEXT PRIMARY KEY,
                rank             TEXT NOT NULL,
                last_name        TEXT NOT NULL,
                first_name       TEXT NOT NULL,
                mi               TEXT NOT NULL DEFAULT '',
                edipi            TEXT NOT NULL DEFAULT '',
                unit             TEXT NOT NULL DEFAULT '',
                restriction_type TEXT NOT NULL,
                start_date       TEXT NOT NULL,
                end_date         TEXT NOT NULL,
                days_awarded     INTEGER NOT NULL,
                offense          TEXT NOT NULL DEFAULT '',
                muster_times     TEXT NOT NULL,
                notes            TEXT NOT NULL DEFAULT '',
                active           INTEGER NOT NULL DEFAULT 1,
                created_at       TEXT NOT NULL,
                updated_at       TEXT,
                completed_at     TEXT
            );

            CREATE TABLE IF NOT EXISTS muster_records (
                id             TEXT PRIMARY KEY,
                restrictee_id  TEXT NOT NULL,
                date           TEXT NOT NULL,
                scheduled_time TEXT NOT NULL,
                actual_time    TEXT,
                outcome        TEXT NOT NULL,
                recorded_by    TEXT NOT NULL DEFAULT '',
                notes          TEXT,
                timestamp      TEXT NOT NULL,
                updated_at     TEXT
            );

            CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- One authoritative record per (restrictee, date, slot)
            CREATE UNIQUE INDEX IF NOT EXISTS idx_records_slot
                ON muster_records(restrictee_id, date, scheduled_time);
            CREATE INDEX IF NOT EXISTS idx_records_restrictee
                ON muster_records(restrictee_id);
            CREATE INDEX IF NOT EXISTS idx_records_date
                ON muster_records(date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // === Restrictees ===

    /// Insert a new restrictee.
    pub fn insert_restrictee(&self, r: &Restrictee) -> Result<()> {
        self.conn.execute(
            &format!("INSERT INTO restrictees ({RESTRICTEE_COLUMNS}) VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"),
            params![
                r.id,
                r.rank,
                r.last_name,
                r.first_name,
                r.mi,
                r.edipi,
                r.unit,
                format_restriction_type(r.restriction_type),
                r.start_date.to_string(),
                r.end_date.to_string(),
                r.days_awarded,
                r.offense,
                serde_json::to_string(&r.muster_times)?,
                r.notes,
                r.active,
                r.created_at.to_rfc3339(),
                r.updated_at.map(|t| t.to_rfc3339()),
                r.completed_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Look up a restrictee by id; `Ok(None)` on a miss.
    pub fn get_restrictee(&self, id: &str) -> Result<Option<Restrictee>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESTRICTEE_COLUMNS} FROM restrictees WHERE id = ?1"
        ))?;
        Ok(stmt
            .query_row(params![id], row_to_restrictee)
            .optional()?)
    }

    /// All restrictees, optionally only the active ones, ordered by last name.
    pub fn list_restrictees(&self, active_only: bool) -> Result<Vec<Restrictee>> {
        let sql = if active_only {
            format!(
                "SELECT {RESTRICTEE_COLUMNS} FROM restrictees WHERE active = 1 ORDER BY last_name"
            )
        } else {
            format!("SELECT {RESTRICTEE_COLUMNS} FROM restrictees ORDER BY last_name")
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_restrictee)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Update every mutable field of an existing restrictee.
    /// Returns false when the id does not exist.
    pub fn update_restrictee(&self, r: &Restrictee) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE restrictees SET rank = ?2, last_name = ?3, first_name = ?4, mi = ?5,
                edipi = ?6, unit = ?7, restriction_type = ?8, start_date = ?9, end_date = ?10,
                days_awarded = ?11, offense = ?12, muster_times = ?13, notes = ?14,
                active = ?15, updated_at = ?16, completed_at = ?17
             WHERE id = ?1",
            params![
                r.id,
                r.rank,
                r.last_name,
                r.first_name,
                r.mi,
                r.edipi,
                r.unit,
                format_restriction_type(r.restriction_type),
                r.start_date.to_string(),
                r.end_date.to_string(),
                r.days_awarded,
                r.offense,
                serde_json::to_string(&r.muster_times)?,
                r.notes,
                r.active,
                r.updated_at.map(|t| t.to_rfc3339()),
                r.completed_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Flip a restrictee inactive (restriction completed). One-way.
    /// Returns false when the id does not exist.
    pub fn complete_restrictee(&self, id: &str, at: DateTime<Utc>) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE restrictees SET active = 0, completed_at = ?2, updated_at = ?2 WHERE id = ?1",
            params![id, at.to_rfc3339()],
        )?;
        Ok(changed > 0)
    }

    /// Delete a restrictee and cascade to all of their muster records.
    /// Returns false when the id does not exist; nothing is deleted then.
    pub fn delete_restrictee(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM restrictees WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Ok(false);
        }
        tx.execute(
            "DELETE FROM muster_records WHERE restrictee_id = ?1",
            params![id],
        )?;
        tx.commit()?;
        Ok(true)
    }

    // === Muster records ===

    /// Record a sign-in, filling defaults from the clock and settings:
    /// date defaults to today, actual time to now, recorder to the
    /// configured default recorder.
    ///
    /// # Errors
    /// `DatabaseError::DuplicateSlot` when the (restrictee, date, time)
    /// slot already has a record.
    pub fn record_sign_in(&self, sign_in: SignIn, clock: &dyn Clock) -> Result<MusterEvent> {
        let date = sign_in.date.unwrap_or_else(|| clock.today());
        if self
            .get_record(&sign_in.restrictee_id, date, sign_in.scheduled_time)?
            .is_some()
        {
            return Err(DatabaseError::DuplicateSlot {
                date: date.to_string(),
                time: sign_in.scheduled_time.to_hhmm(),
            }
            .into());
        }

        let recorded_by = match sign_in.recorded_by {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.settings()?.default_recorder,
        };

        let event = MusterEvent {
            id: Uuid::new_v4().to_string(),
            restrictee_id: sign_in.restrictee_id,
            date,
            scheduled_time: sign_in.scheduled_time,
            actual_time: sign_in.actual_time.or_else(|| Some(clock.time_of_day())),
            outcome: sign_in.outcome,
            recorded_by,
            notes: sign_in.notes,
            timestamp: clock.timestamp(),
            updated_at: None,
        };
        self.insert_event(&event)?;
        Ok(event)
    }

    /// Insert a fully-formed event (used by import; prefer
    /// [`Database::record_sign_in`] for operator flow).
    pub fn insert_event(&self, e: &MusterEvent) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO muster_records ({EVENT_COLUMNS}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                e.id,
                e.restrictee_id,
                e.date.to_string(),
                e.scheduled_time.to_hhmm(),
                e.actual_time.map(TimeOfDay::to_hhmm),
                format_outcome(e.outcome),
                e.recorded_by,
                e.notes,
                e.timestamp.to_rfc3339(),
                e.updated_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Look up an event by id; `Ok(None)` on a miss.
    pub fn get_event(&self, id: &str) -> Result<Option<MusterEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM muster_records WHERE id = ?1"
        ))?;
        Ok(stmt.query_row(params![id], row_to_event).optional()?)
    }

    /// The authoritative record for a (restrictee, date, time) slot, if any.
    pub fn get_record(
        &self,
        restrictee_id: &str,
        date: NaiveDate,
        scheduled_time: TimeOfDay,
    ) -> Result<Option<MusterEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM muster_records
             WHERE restrictee_id = ?1 AND date = ?2 AND scheduled_time = ?3"
        ))?;
        Ok(stmt
            .query_row(
                params![restrictee_id, date.to_string(), scheduled_time.to_hhmm()],
                row_to_event,
            )
            .optional()?)
    }

    /// Full history for a restrictee: date descending, then time ascending.
    pub fn events_for_restrictee(&self, restrictee_id: &str) -> Result<Vec<MusterEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM muster_records
             WHERE restrictee_id = ?1 ORDER BY date DESC, scheduled_time ASC"
        ))?;
        let rows = stmt.query_map(params![restrictee_id], row_to_event)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// One restrictee's events for a single date, time ascending.
    pub fn events_for_date(
        &self,
        restrictee_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<MusterEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM muster_records
             WHERE restrictee_id = ?1 AND date = ?2 ORDER BY scheduled_time ASC"
        ))?;
        let rows = stmt.query_map(params![restrictee_id, date.to_string()], row_to_event)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Every restrictee's events for a single date, time ascending.
    pub fn all_events_for_date(&self, date: NaiveDate) -> Result<Vec<MusterEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM muster_records
             WHERE date = ?1 ORDER BY scheduled_time ASC"
        ))?;
        let rows = stmt.query_map(params![date.to_string()], row_to_event)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// History grouped by date, most recent first, capped at `limit_days`
    /// distinct dates. Events within a date stay in time order.
    pub fn events_grouped_by_date(
        &self,
        restrictee_id: &str,
        limit_days: usize,
    ) -> Result<Vec<(NaiveDate, Vec<MusterEvent>)>> {
        let events = self.events_for_restrictee(restrictee_id)?;
        let mut grouped: Vec<(NaiveDate, Vec<MusterEvent>)> = Vec::new();
        for event in events {
            match grouped.last_mut() {
                Some((date, bucket)) if *date == event.date => bucket.push(event),
                _ => {
                    if grouped.len() == limit_days {
                        break;
                    }
                    grouped.push((event.date, vec![event]));
                }
            }
        }
        Ok(grouped)
    }

    /// Correct an event in place. Returns false when the id does not exist.
    pub fn update_event(&self, e: &MusterEvent) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE muster_records SET date = ?2, scheduled_time = ?3, actual_time = ?4,
                outcome = ?5, recorded_by = ?6, notes = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                e.id,
                e.date.to_string(),
                e.scheduled_time.to_hhmm(),
                e.actual_time.map(TimeOfDay::to_hhmm),
                format_outcome(e.outcome),
                e.recorded_by,
                e.notes,
                e.updated_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete an event. Returns false when the id does not exist.
    pub fn delete_event(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM muster_records WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // === Settings ===

    /// Current settings, or the defaults when none have been saved.
    pub fn settings(&self) -> Result<Settings> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")?;
        let value: Option<String> = stmt
            .query_row(params![SETTINGS_KEY], |row| row.get(0))
            .optional()?;
        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    pub fn put_settings(&self, settings: &Settings) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![SETTINGS_KEY, serde_json::to_string(settings)?],
        )?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use crate::roster::RestricteeDraft;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(d("2024-06-01"), t("0800"))
    }

    fn sample_restrictee(db: &Database) -> Restrictee {
        let draft = RestricteeDraft {
            rank: "PFC".to_string(),
            last_name: "Doe".to_string(),
            first_name: "John".to_string(),
            start_date: Some(d("2024-05-20")),
            days_awarded: 14,
            muster_times: vec![t("0600"), t("1800")],
            ..Default::default()
        };
        let r = draft.into_restrictee(&clock()).unwrap();
        db.insert_restrictee(&r).unwrap();
        r
    }

    #[test]
    fn restrictee_round_trip() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        let loaded = db.get_restrictee(&r.id).unwrap().unwrap();
        assert_eq!(loaded.last_name, "DOE");
        assert_eq!(loaded.muster_times, r.muster_times);
        assert_eq!(loaded.end_date, d("2024-06-02"));
        assert!(loaded.active);
    }

    #[test]
    fn lookup_miss_is_none_not_error() {
        let db = Database::open_memory().unwrap();
        assert!(db.get_restrictee("nope").unwrap().is_none());
        assert!(db.get_event("nope").unwrap().is_none());
        assert!(!db.delete_restrictee("nope").unwrap());
        assert!(!db.delete_event("nope").unwrap());
    }

    #[test]
    fn list_filters_active() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        assert_eq!(db.list_restrictees(true).unwrap().len(), 1);

        assert!(db.complete_restrictee(&r.id, Utc::now()).unwrap());
        assert_eq!(db.list_restrictees(true).unwrap().len(), 0);
        assert_eq!(db.list_restrictees(false).unwrap().len(), 1);

        let completed = db.get_restrictee(&r.id).unwrap().unwrap();
        assert!(!completed.active);
        assert!(completed.completed_at.is_some());
    }

    #[test]
    fn sign_in_fills_defaults() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        db.put_settings(&Settings {
            default_recorder: "SGT SMITH".to_string(),
            ..Settings::default()
        })
        .unwrap();

        let event = db
            .record_sign_in(
                SignIn {
                    restrictee_id: r.id.clone(),
                    scheduled_time: t("0600"),
                    outcome: Outcome::Present,
                    ..Default::default()
                },
                &clock(),
            )
            .unwrap();

        assert_eq!(event.date, d("2024-06-01"));
        assert_eq!(event.actual_time, Some(t("0800")));
        assert_eq!(event.recorded_by, "SGT SMITH");

        let loaded = db.get_event(&event.id).unwrap().unwrap();
        assert_eq!(loaded, event);
    }

    #[test]
    fn duplicate_slot_rejected() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        let sign_in = SignIn {
            restrictee_id: r.id.clone(),
            scheduled_time: t("0600"),
            outcome: Outcome::Present,
            ..Default::default()
        };
        db.record_sign_in(sign_in.clone(), &clock()).unwrap();

        let err = db.record_sign_in(sign_in, &clock()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::DuplicateSlot { .. })
        ));
        // Only the first record exists.
        assert_eq!(db.events_for_date(&r.id, d("2024-06-01")).unwrap().len(), 1);
    }

    #[test]
    fn history_ordering_and_grouping() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        for (date, time) in [
            ("2024-05-30", "1800"),
            ("2024-05-30", "0600"),
            ("2024-05-31", "0600"),
            ("2024-06-01", "0600"),
        ] {
            db.record_sign_in(
                SignIn {
                    restrictee_id: r.id.clone(),
                    scheduled_time: t(time),
                    outcome: Outcome::Present,
                    date: Some(d(date)),
                    ..Default::default()
                },
                &clock(),
            )
            .unwrap();
        }

        let history = db.events_for_restrictee(&r.id).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].date, d("2024-06-01"));
        // Same date: time ascending.
        assert_eq!(history[2].scheduled_time, t("0600"));
        assert_eq!(history[3].scheduled_time, t("1800"));

        let grouped = db.events_grouped_by_date(&r.id, 2).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, d("2024-06-01"));
        assert_eq!(grouped[1].0, d("2024-05-31"));
    }

    #[test]
    fn delete_restrictee_cascades_to_records() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        db.record_sign_in(
            SignIn {
                restrictee_id: r.id.clone(),
                scheduled_time: t("0600"),
                outcome: Outcome::Present,
                ..Default::default()
            },
            &clock(),
        )
        .unwrap();

        assert!(db.delete_restrictee(&r.id).unwrap());
        assert!(db.get_restrictee(&r.id).unwrap().is_none());
        assert!(db.events_for_restrictee(&r.id).unwrap().is_empty());
    }

    #[test]
    fn event_correction_in_place() {
        let db = Database::open_memory().unwrap();
        let r = sample_restrictee(&db);
        let mut event = db
            .record_sign_in(
                SignIn {
                    restrictee_id: r.id.clone(),
                    scheduled_time: t("0600"),
                    outcome: Outcome::Missed,
                    ..Default::default()
                },
                &clock(),
            )
            .unwrap();

        event.outcome = Outcome::Excused;
        event.notes = Some("medical appointment".to_string());
        event.updated_at = Some(Utc::now());
        assert!(db.update_event(&event).unwrap());

        let loaded = db.get_event(&event.id).unwrap().unwrap();
        assert_eq!(loaded.outcome, Outcome::Excused);
        assert_eq!(loaded.notes.as_deref(), Some("medical appointment"));
    }

    #[test]
    fn settings_round_trip_with_defaults() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.settings().unwrap(), Settings::default());

        let custom = Settings {
            default_muster_times: vec![t("0800"), t("2000")],
            unit_name: "HQ Co".to_string(),
            default_recorder: "CPL JONES".to_string(),
        };
        db.put_settings(&custom).unwrap();
        assert_eq!(db.settings().unwrap(), custom);
    }

    #[test]
    fn on_disk_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restrack.db");
        {
            let conn = Connection::open(&path).unwrap();
            let db = Database { conn };
            db.migrate().unwrap();
            sample_restrictee(&db);
        }
        let conn = Connection::open(&path).unwrap();
        let db = Database { conn };
        db.migrate().unwrap();
        assert_eq!(db.list_restrictees(false).unwrap().len(), 1);
    }
}
