//! Status derivation engine.
//!
//! Pure, deterministic computation over a restrictee's muster schedule and
//! the day's recorded sign-ins: classify a single slot against the clock,
//! resolve the next actionable muster, and roll the result up into an
//! overall urgency for display. Nothing here touches storage or reads the
//! wall clock; callers supply recorded events and `now`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::muster::{MusterEvent, Outcome};
use crate::time::TimeOfDay;

/// Minutes before the scheduled time at which a muster stops being
/// "upcoming" and becomes "soon".
pub const LOOK_AHEAD_MINUTES: i32 = 30;

/// Minutes after the scheduled time before an unrecorded muster counts as
/// overdue (and as missed for the day-level predicate).
pub const GRACE_MINUTES: i32 = 15;

/// Qualitative status of a single muster slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusterStatus {
    /// More than 30 minutes out
    Upcoming,
    /// Within the 30-minute look-ahead window
    Soon,
    /// At or past the scheduled time, inside the grace period
    Due,
    /// Past the grace period with no sign-in
    Overdue,
    /// A sign-in already exists for this slot today
    Recorded,
}

impl fmt::Display for MusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MusterStatus::Upcoming => "upcoming",
            MusterStatus::Soon => "soon",
            MusterStatus::Due => "due",
            MusterStatus::Overdue => "overdue",
            MusterStatus::Recorded => "recorded",
        };
        f.write_str(s)
    }
}

/// Classify one scheduled muster against the current time of day.
///
/// `recorded` is terminal: once a sign-in exists the clock no longer
/// matters. Otherwise the boundaries are: diff > 30 upcoming, 0 < diff <= 30
/// soon, -15 < diff <= 0 due, diff <= -15 overdue. Same calendar day only;
/// no cross-midnight wraparound is modeled.
pub fn classify(scheduled: TimeOfDay, has_record: bool, now: TimeOfDay) -> MusterStatus {
    if has_record {
        return MusterStatus::Recorded;
    }
    let diff = scheduled.minutes_from(now);
    if diff > LOOK_AHEAD_MINUTES {
        MusterStatus::Upcoming
    } else if diff > 0 {
        MusterStatus::Soon
    } else if diff > -GRACE_MINUTES {
        MusterStatus::Due
    } else {
        MusterStatus::Overdue
    }
}

/// The next unresolved muster for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMuster {
    pub time: TimeOfDay,
    pub status: MusterStatus,
    /// Signed minutes until the slot; negative once it has passed.
    pub minutes_until: i32,
}

/// Resolve the next muster with no recorded sign-in today.
///
/// Times are scanned in ascending order; the first without a matching
/// event (by scheduled time) wins. Returns `None` when every slot has a
/// record, the "all musters complete for today" terminal state.
pub fn next_muster(
    muster_times: &[TimeOfDay],
    today_events: &[MusterEvent],
    now: TimeOfDay,
) -> Option<NextMuster> {
    let mut sorted: Vec<TimeOfDay> = muster_times.to_vec();
    sorted.sort();

    sorted
        .into_iter()
        .find(|time| !today_events.iter().any(|e| e.scheduled_time == *time))
        .map(|time| NextMuster {
            time,
            status: classify(time, false, now),
            minutes_until: time.minutes_from(now),
        })
}

/// True when the restrictee has missed at least one muster today: a slot
/// more than the grace period past with no record, or any recorded sign-in
/// with a missed outcome.
pub fn has_missed_today(
    muster_times: &[TimeOfDay],
    today_events: &[MusterEvent],
    now: TimeOfDay,
) -> bool {
    for time in muster_times {
        let record = today_events.iter().find(|e| e.scheduled_time == *time);
        match record {
            None => {
                if time.minutes_from(now) < -GRACE_MINUTES {
                    return true;
                }
            }
            Some(event) => {
                if event.outcome == Outcome::Missed {
                    return true;
                }
            }
        }
    }
    false
}

/// Display urgency for a restrictee card or roster row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Nominal,
    Warning,
    Danger,
}

/// Fold the missed-today predicate and the next-muster classification into
/// one urgency. Precedence: missed-today outranks an overdue next muster,
/// which outranks a soon next muster, which outranks nominal.
pub fn overall_urgency(missed_today: bool, next: Option<&NextMuster>) -> Urgency {
    if missed_today {
        return Urgency::Danger;
    }
    match next.map(|n| n.status) {
        Some(MusterStatus::Overdue) => Urgency::Danger,
        Some(MusterStatus::Soon) => Urgency::Warning,
        _ => Urgency::Nominal,
    }
}
