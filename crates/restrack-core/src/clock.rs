//! Clock capability.
//!
//! Status derivation depends on the current date and wall-clock time. Rather
//! than reading `now` inside the pure functions, callers thread a [`Clock`]
//! through, so every derivation is deterministic under test.

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

use crate::time::TimeOfDay;

/// Source of the current date and time.
pub trait Clock {
    /// Today's calendar date (local).
    fn today(&self) -> NaiveDate;

    /// Current wall-clock time of day (local).
    fn time_of_day(&self) -> TimeOfDay;

    /// Current instant for record timestamps.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Real system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> TimeOfDay {
        let now = Local::now();
        // In-range by construction; fall back to midnight if not.
        TimeOfDay::new(now.hour() as u16, now.minute() as u16)
            .unwrap_or_else(|_| TimeOfDay::from_minutes(0).expect("midnight is valid"))
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed date and time, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

impl FixedClock {
    pub fn new(date: NaiveDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.time
    }

    fn timestamp(&self) -> DateTime<Utc> {
        let time = chrono::NaiveTime::from_hms_opt(
            u32::from(self.time.hour()),
            u32::from(self.time.minute()),
            0,
        )
        .expect("TimeOfDay is always a valid NaiveTime");
        self.date.and_time(time).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_values() {
        let clock = FixedClock::new(
            "2024-06-01".parse().unwrap(),
            TimeOfDay::new(11, 45).unwrap(),
        );
        assert_eq!(clock.today(), "2024-06-01".parse::<NaiveDate>().unwrap());
        assert_eq!(clock.time_of_day().to_hhmm(), "1145");
        assert_eq!(clock.timestamp().to_rfc3339(), "2024-06-01T11:45:00+00:00");
    }
}
