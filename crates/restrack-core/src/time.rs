//! Time-of-day value type and date arithmetic.
//!
//! Muster times are wall-clock times of day with minute resolution. They are
//! stored and exchanged as 4-digit "HHMM" strings (e.g. "0600", "2200") and
//! displayed as "HH:MM". Internally a [`TimeOfDay`] is minutes since
//! midnight, which keeps the derivation engine's arithmetic trivial.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Minutes in a day; `TimeOfDay` values are always below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Time parsing/validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Input was not a recognizable HHMM or HH:MM time
    #[error("Invalid time of day '{0}': expected HHMM or HH:MM")]
    Unparseable(String),

    /// Hour or minute out of range
    #[error("Time of day out of range: hour {hour}, minute {minute}")]
    OutOfRange { hour: u16, minute: u16 },
}

/// A time of day with minute resolution, held as minutes since midnight.
/// Defaults to midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from hour and minute components.
    ///
    /// # Errors
    /// Returns an error unless hour is 0-23 and minute is 0-59.
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 {
            return Err(TimeError::OutOfRange { hour, minute });
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Build from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::OutOfRange {
                hour: minutes / 60,
                minute: minutes % 60,
            });
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Signed minutes from `now` until this time, same calendar day.
    /// Negative when the time has already passed. No midnight wraparound.
    pub fn minutes_from(self, now: TimeOfDay) -> i32 {
        i32::from(self.0) - i32::from(now.0)
    }

    /// Storage/wire form: "HHMM".
    pub fn to_hhmm(self) -> String {
        format!("{:02}{:02}", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    /// Display form: "HH:MM".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    /// Parse "HHMM" or "HH:MM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.chars().filter(|c| *c != ':').collect();
        if cleaned.len() != 4 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(TimeError::Unparseable(s.to_string()));
        }
        let hour: u16 = cleaned[..2]
            .parse()
            .map_err(|_| TimeError::Unparseable(s.to_string()))?;
        let minute: u16 = cleaned[2..]
            .parse()
            .map_err(|_| TimeError::Unparseable(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hhmm())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// End date for a restriction period, counting the start date as day one.
pub fn calculate_end_date(start: NaiveDate, days_awarded: u16) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days_awarded.saturating_sub(1))))
        .unwrap_or(start)
}

/// Whole days from `today` until `end` inclusive of neither time component.
/// Negative once the end date is in the past.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days()
}

/// Whole days since `start`.
pub fn days_elapsed(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days()
}

/// Military date format: "DD Mon YYYY".
pub fn format_military(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Inclusive range of dates from `start` to `end`. Empty when `end < start`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_hhmm_and_colon_forms() {
        let t: TimeOfDay = "0600".parse().unwrap();
        assert_eq!(t.minutes(), 360);
        let t: TimeOfDay = "18:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (18, 30));
    }

    #[test]
    fn rejects_bad_times() {
        assert!("2400".parse::<TimeOfDay>().is_err());
        assert!("0660".parse::<TimeOfDay>().is_err());
        assert!("6:00".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn formats_both_ways() {
        let t = TimeOfDay::new(6, 0).unwrap();
        assert_eq!(t.to_hhmm(), "0600");
        assert_eq!(t.to_string(), "06:00");
    }

    #[test]
    fn serde_uses_hhmm() {
        let t = TimeOfDay::new(22, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"2200\"");
        let back: TimeOfDay = serde_json::from_str("\"2200\"").unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn minutes_from_is_signed() {
        let sched = TimeOfDay::new(12, 0).unwrap();
        assert_eq!(sched.minutes_from(TimeOfDay::new(11, 30).unwrap()), 30);
        assert_eq!(sched.minutes_from(TimeOfDay::new(12, 45).unwrap()), -45);
    }

    #[test]
    fn end_date_counts_start_as_day_one() {
        assert_eq!(
            calculate_end_date(date("2024-01-01"), 30),
            date("2024-01-30")
        );
        assert_eq!(calculate_end_date(date("2024-01-01"), 1), date("2024-01-01"));
    }

    #[test]
    fn days_remaining_can_go_negative() {
        assert_eq!(days_remaining(date("2024-01-30"), date("2024-01-01")), 29);
        assert_eq!(days_remaining(date("2024-01-01"), date("2024-01-05")), -4);
    }

    #[test]
    fn military_format() {
        assert_eq!(format_military(date("2024-01-02")), "02 Jan 2024");
        assert_eq!(format_military(date("2025-12-31")), "31 Dec 2025");
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = date_range(date("2024-03-01"), date("2024-03-07"));
        assert_eq!(range.len(), 7);
        assert_eq!(range[0], date("2024-03-01"));
        assert_eq!(range[6], date("2024-03-07"));
        assert!(date_range(date("2024-03-07"), date("2024-03-01")).is_empty());
    }
}
