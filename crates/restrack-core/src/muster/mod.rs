//! Muster events, compliance statistics, and the daily log builder.
//!
//! A muster event is one recorded attendance outcome for a (restrictee,
//! date, scheduled time) slot. Everything derived from events is recomputed
//! per query; nothing in this module caches or persists.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::roster::Restrictee;
use crate::status::{classify, MusterStatus};
use crate::time::TimeOfDay;

/// Recorded outcome of a muster sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Present,
    Late,
    Missed,
    Excused,
}

impl Outcome {
    /// Single-letter form used in the weekly summary grid.
    pub fn letter(self) -> char {
        match self {
            Outcome::Present => 'P',
            Outcome::Late => 'L',
            Outcome::Missed => 'M',
            Outcome::Excused => 'E',
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Outcome::Present => "Present",
            Outcome::Late => "Late",
            Outcome::Missed => "Missed",
            Outcome::Excused => "Excused",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "present" => Ok(Outcome::Present),
            "late" => Ok(Outcome::Late),
            "missed" => Ok(Outcome::Missed),
            "excused" => Ok(Outcome::Excused),
            other => Err(format!(
                "unknown outcome '{other}' (expected present, late, missed, or excused)"
            )),
        }
    }
}

/// One recorded attendance outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusterEvent {
    pub id: String,
    pub restrictee_id: String,
    pub date: NaiveDate,
    pub scheduled_time: TimeOfDay,
    /// Wall-clock time the sign-in actually happened, when known.
    pub actual_time: Option<TimeOfDay>,
    pub outcome: Outcome,
    pub recorded_by: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Operator input for a sign-in. Omitted fields are defaulted at record
/// time: date to today, actual time to now, recorder to the configured
/// default.
#[derive(Debug, Clone, Default)]
pub struct SignIn {
    pub restrictee_id: String,
    pub scheduled_time: TimeOfDay,
    pub outcome: Outcome,
    pub date: Option<NaiveDate>,
    pub actual_time: Option<TimeOfDay>,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Present
    }
}

/// Tallies over a restrictee's full event history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusterStats {
    pub total: u32,
    pub present: u32,
    pub late: u32,
    pub missed: u32,
    pub excused: u32,
    /// Percentage of recorded musters with a non-missed outcome, rounded
    /// half-up. 100 when no musters are recorded yet.
    pub compliance_rate: u32,
}

/// Tally outcomes over the full, unwindowed history for one restrictee.
pub fn stats(events: &[MusterEvent]) -> MusterStats {
    let mut s = MusterStats::default();
    for event in events {
        s.total += 1;
        match event.outcome {
            Outcome::Present => s.present += 1,
            Outcome::Late => s.late += 1,
            Outcome::Missed => s.missed += 1,
            Outcome::Excused => s.excused += 1,
        }
    }
    s.compliance_rate = if s.total == 0 {
        100
    } else {
        let compliant = s.present + s.late + s.excused;
        (f64::from(compliant) / f64::from(s.total) * 100.0).round() as u32
    };
    s
}

/// State of one slot in a daily log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotState {
    /// A sign-in exists for the slot
    Recorded { outcome: Outcome },
    /// Today's slot with no sign-in yet, annotated with its time status
    Pending { status: MusterStatus },
    /// A past slot with no sign-in. Counts as missed for reporting but is
    /// distinct from an explicit missed entry: nobody recorded it.
    Unrecorded,
}

/// One scheduled time in a daily log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub time: TimeOfDay,
    pub state: SlotState,
    pub actual_time: Option<TimeOfDay>,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
    pub record_id: Option<String>,
}

/// Per-day view of a restrictee's schedule: one entry per scheduled time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    pub restrictee_id: String,
    pub slots: Vec<SlotEntry>,
}

/// Re-derive the day's slot entries from the schedule plus recorded events.
///
/// `records` must be the events for this restrictee on `date`. Slots are
/// emitted in ascending time order. Recorded events are emitted verbatim;
/// an empty slot is `Pending` (with a live classification) when `date` is
/// today and `Unrecorded` for past dates. Should duplicate events exist for
/// a slot the first match wins; the store rejects duplicates on insert.
pub fn build_daily_log(
    restrictee: &Restrictee,
    date: NaiveDate,
    records: &[MusterEvent],
    clock: &dyn Clock,
) -> DailyLog {
    let mut times = restrictee.muster_times.clone();
    times.sort();

    let today = clock.today();
    let slots = times
        .into_iter()
        .map(|time| match records.iter().find(|r| r.scheduled_time == time) {
            Some(record) => SlotEntry {
                time,
                state: SlotState::Recorded {
                    outcome: record.outcome,
                },
                actual_time: record.actual_time,
                recorded_by: Some(record.recorded_by.clone()),
                notes: record.notes.clone(),
                record_id: Some(record.id.clone()),
            },
            None => {
                let state = if date == today {
                    SlotState::Pending {
                        status: classify(time, false, clock.time_of_day()),
                    }
                } else {
                    SlotState::Unrecorded
                };
                SlotEntry {
                    time,
                    state,
                    actual_time: None,
                    recorded_by: None,
                    notes: None,
                    record_id: None,
                }
            }
        })
        .collect();

    DailyLog {
        date,
        restrictee_id: restrictee.id.clone(),
        slots,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use uuid::Uuid;

    /// Minimal event for today at the given time, for derivation tests.
    pub fn event_at(time: &str, outcome: Outcome) -> MusterEvent {
        MusterEvent {
            id: Uuid::new_v4().to_string(),
            restrictee_id: "r-1".to_string(),
            date: "2024-06-01".parse().unwrap(),
            scheduled_time: time.parse().unwrap(),
            actual_time: Some(time.parse().unwrap()),
            outcome,
            recorded_by: "DUTY NCO".to_string(),
            notes: None,
            timestamp: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::event_at;
    use super::*;
    use crate::clock::FixedClock;
    use crate::roster::test_support::restrictee_with_times;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn stats_with_no_events_is_fully_compliant() {
        let s = stats(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.compliance_rate, 100);
    }

    #[test]
    fn stats_tallies_each_outcome() {
        let events = vec![
            event_at("0600", Outcome::Present),
            event_at("1200", Outcome::Late),
            event_at("1800", Outcome::Missed),
            event_at("2200", Outcome::Excused),
        ];
        let s = stats(&events);
        assert_eq!(s.total, 4);
        assert_eq!(s.present, 1);
        assert_eq!(s.late, 1);
        assert_eq!(s.missed, 1);
        assert_eq!(s.excused, 1);
        // 3 of 4 non-missed -> 75
        assert_eq!(s.compliance_rate, 75);
    }

    #[test]
    fn stats_rounds_half_up() {
        // 1 of 8 missed: 7/8 = 87.5 -> 88
        let mut events: Vec<_> = (0..7).map(|i| {
            event_at(&format!("0{}00", i + 1), Outcome::Present)
        }).collect();
        events.push(event_at("0900", Outcome::Missed));
        assert_eq!(stats(&events).compliance_rate, 88);
    }

    #[test]
    fn daily_log_emits_recorded_slots_verbatim() {
        let restrictee = restrictee_with_times(&["0600", "1200"]);
        let mut event = event_at("0600", Outcome::Late);
        event.notes = Some("overslept".to_string());
        let clock = FixedClock::new(d("2024-06-01"), t("0800"));

        let log = build_daily_log(&restrictee, d("2024-06-01"), &[event.clone()], &clock);
        assert_eq!(log.slots.len(), 2);

        let first = &log.slots[0];
        assert_eq!(first.time, t("0600"));
        assert_eq!(
            first.state,
            SlotState::Recorded {
                outcome: Outcome::Late
            }
        );
        assert_eq!(first.record_id.as_deref(), Some(event.id.as_str()));
        assert_eq!(first.notes.as_deref(), Some("overslept"));
    }

    #[test]
    fn daily_log_today_empty_slots_are_pending_with_status() {
        let restrictee = restrictee_with_times(&["0600", "1200"]);
        let clock = FixedClock::new(d("2024-06-01"), t("1145"));

        let log = build_daily_log(&restrictee, d("2024-06-01"), &[], &clock);
        assert_eq!(
            log.slots[0].state,
            SlotState::Pending {
                status: MusterStatus::Overdue
            }
        );
        assert_eq!(
            log.slots[1].state,
            SlotState::Pending {
                status: MusterStatus::Soon
            }
        );
    }

    #[test]
    fn daily_log_past_date_is_all_unrecorded_never_pending() {
        let restrictee = restrictee_with_times(&["0600", "1200", "1800"]);
        let clock = FixedClock::new(d("2024-06-10"), t("0900"));

        let log = build_daily_log(&restrictee, d("2024-06-01"), &[], &clock);
        assert!(log
            .slots
            .iter()
            .all(|slot| slot.state == SlotState::Unrecorded));
    }

    #[test]
    fn daily_log_slots_sorted_by_time() {
        let restrictee = restrictee_with_times(&["2200", "0600", "1800", "1200"]);
        let clock = FixedClock::new(d("2024-06-01"), t("0500"));

        let log = build_daily_log(&restrictee, d("2024-06-01"), &[], &clock);
        let times: Vec<String> = log.slots.iter().map(|s| s.time.to_hhmm()).collect();
        assert_eq!(times, vec!["0600", "1200", "1800", "2200"]);
    }

    #[test]
    fn outcome_parsing_and_letters() {
        assert_eq!("present".parse::<Outcome>().unwrap(), Outcome::Present);
        assert_eq!("LATE".parse::<Outcome>().unwrap(), Outcome::Late);
        assert!("tardy".parse::<Outcome>().is_err());
        assert_eq!(Outcome::Excused.letter(), 'E');
    }
}
