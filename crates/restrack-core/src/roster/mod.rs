//! Roster: restrictees and their derived display status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{CoreError, ValidationError};
use crate::muster::MusterEvent;
use crate::status::{has_missed_today, next_muster, overall_urgency, NextMuster, Urgency};
use crate::time::{calculate_end_date, days_remaining, TimeOfDay};

/// Kind of restriction a person is under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    /// Standard restriction
    Restriction,
    /// Extra punitive duty
    Epd,
    CorrectionalCustody,
}

impl RestrictionType {
    pub fn display_name(self) -> &'static str {
        match self {
            RestrictionType::Restriction => "Restriction",
            RestrictionType::Epd => "EPD",
            RestrictionType::CorrectionalCustody => "Correctional Custody",
        }
    }
}

impl std::str::FromStr for RestrictionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restriction" => Ok(RestrictionType::Restriction),
            "epd" => Ok(RestrictionType::Epd),
            "correctional_custody" => Ok(RestrictionType::CorrectionalCustody),
            other => Err(format!(
                "unknown restriction type '{other}' (expected restriction, epd, or correctional_custody)"
            )),
        }
    }
}

/// A person under movement restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictee {
    /// Opaque unique identifier, immutable after creation.
    pub id: String,
    pub rank: String,
    pub last_name: String,
    pub first_name: String,
    /// Middle initial
    #[serde(default)]
    pub mi: String,
    /// Service number
    #[serde(default)]
    pub edipi: String,
    #[serde(default)]
    pub unit: String,
    pub restriction_type: RestrictionType,
    pub start_date: NaiveDate,
    /// Always `start_date + days_awarded - 1` (inclusive day counting).
    pub end_date: NaiveDate,
    pub days_awarded: u16,
    #[serde(default)]
    pub offense: String,
    /// Non-empty, sorted, de-duplicated.
    pub muster_times: Vec<TimeOfDay>,
    #[serde(default)]
    pub notes: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Restrictee {
    /// "RANK LAST, First M." form used on cards and reports.
    pub fn display_name(&self) -> String {
        let mut name = format!("{} {}, {}", self.rank, self.last_name, self.first_name);
        if !self.mi.is_empty() {
            name.push_str(&format!(" {}.", self.mi));
        }
        name
    }

    /// Re-check the invariants an edit can break. Same checks the draft
    /// runs at creation, applied to an already-minted record; callers must
    /// not persist while this is non-empty.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.rank.trim().is_empty() {
            errors.push(ValidationError::MissingField("Rank"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("Last name"));
        }
        if self.first_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("First name"));
        }
        if self.days_awarded < 1 || self.days_awarded > 60 {
            errors.push(ValidationError::DaysOutOfRange(i64::from(
                self.days_awarded,
            )));
        }
        if self.muster_times.is_empty() {
            errors.push(ValidationError::NoMusterTimes);
        }
        errors
    }
}

/// Operator-submitted fields for creating or editing a restrictee.
/// Validated and normalized before it becomes a [`Restrictee`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestricteeDraft {
    pub rank: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub mi: String,
    #[serde(default)]
    pub edipi: String,
    #[serde(default)]
    pub unit: String,
    pub restriction_type: Option<RestrictionType>,
    pub start_date: Option<NaiveDate>,
    pub days_awarded: i64,
    #[serde(default)]
    pub offense: String,
    pub muster_times: Vec<TimeOfDay>,
    #[serde(default)]
    pub notes: String,
}

impl RestricteeDraft {
    /// Collect every validation failure; the caller shows the list to the
    /// operator and nothing is persisted until it is empty.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.rank.trim().is_empty() {
            errors.push(ValidationError::MissingField("Rank"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("Last name"));
        }
        if self.first_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("First name"));
        }
        if self.start_date.is_none() {
            errors.push(ValidationError::MissingField("Start date"));
        }
        if self.days_awarded < 1 || self.days_awarded > 60 {
            errors.push(ValidationError::DaysOutOfRange(self.days_awarded));
        }
        if self.muster_times.is_empty() {
            errors.push(ValidationError::NoMusterTimes);
        }
        errors
    }

    /// Validate, normalize, and mint a new active restrictee.
    ///
    /// Last name and middle initial are upcased; muster times are sorted
    /// and de-duplicated; the end date is computed from start date and
    /// days awarded.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` carrying every failed check.
    pub fn into_restrictee(self, clock: &dyn Clock) -> Result<Restrictee, CoreError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let start_date = self.start_date.expect("validated above");
        let days_awarded = self.days_awarded as u16;
        let mut muster_times = self.muster_times;
        muster_times.sort();
        muster_times.dedup();

        Ok(Restrictee {
            id: Uuid::new_v4().to_string(),
            rank: self.rank.trim().to_string(),
            last_name: self.last_name.trim().to_uppercase(),
            first_name: self.first_name.trim().to_string(),
            mi: self.mi.trim().to_uppercase(),
            edipi: self.edipi.trim().to_string(),
            unit: self.unit.trim().to_string(),
            restriction_type: self
                .restriction_type
                .unwrap_or(RestrictionType::Restriction),
            start_date,
            end_date: calculate_end_date(start_date, days_awarded),
            days_awarded,
            offense: self.offense,
            muster_times,
            notes: self.notes,
            active: true,
            created_at: clock.timestamp(),
            updated_at: None,
            completed_at: None,
        })
    }
}

/// Derived display status for one restrictee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatus {
    /// Days until the restriction ends; negative once past the end date.
    pub days_remaining: i64,
    pub next_muster: Option<NextMuster>,
    pub missed_today: bool,
    pub urgency: Urgency,
}

/// Compute the live status for a restrictee given today's events.
///
/// `today_events` must be the restrictee's events for the clock's current
/// date. Pure re-derivation; call it as often as the display refreshes.
pub fn roster_status(
    restrictee: &Restrictee,
    today_events: &[MusterEvent],
    clock: &dyn Clock,
) -> RosterStatus {
    let now = clock.time_of_day();
    let next = next_muster(&restrictee.muster_times, today_events, now);
    let missed = has_missed_today(&restrictee.muster_times, today_events, now);

    RosterStatus {
        days_remaining: days_remaining(restrictee.end_date, clock.today()),
        urgency: overall_urgency(missed, next.as_ref()),
        next_muster: next,
        missed_today: missed,
    }
}

/// Order restrictees for roster display: active first, then fewest days
/// remaining, then last name.
pub fn sort_for_display(restrictees: &mut [Restrictee], today: NaiveDate) {
    restrictees.sort_by(|a, b| {
        b.active
            .cmp(&a.active)
            .then_with(|| {
                days_remaining(a.end_date, today).cmp(&days_remaining(b.end_date, today))
            })
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
}
