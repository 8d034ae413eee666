//! # Restrack Core Library
//!
//! Core business logic for restrack, a roster and attendance tracker for
//! personnel under movement restriction. All operations are available via
//! the standalone `restrack` CLI binary, which is a thin layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Derivation engine**: pure functions that classify muster slots
//!   against the clock, resolve the next actionable muster, and aggregate
//!   compliance statistics -- the only stateful input is the event log
//! - **Storage**: SQLite-backed repository for restrictees, muster
//!   records, and settings, plus whole-document export/import
//! - **Reports**: plain-text daily, individual, and weekly renderings
//!
//! ## Key Components
//!
//! - [`Restrictee`]: a person under restriction and their muster schedule
//! - [`MusterEvent`]: one recorded sign-in outcome
//! - [`classify`] / [`next_muster`] / [`stats`]: the derivation engine
//! - [`Database`]: persistence
//! - [`Clock`]: explicit time capability so derivation is testable

pub mod clock;
pub mod error;
pub mod muster;
pub mod reports;
pub mod roster;
pub mod status;
pub mod storage;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, DatabaseError, ValidationError};
pub use muster::{
    build_daily_log, stats, DailyLog, MusterEvent, MusterStats, Outcome, SignIn, SlotEntry,
    SlotState,
};
pub use roster::{
    roster_status, sort_for_display, Restrictee, RestricteeDraft, RestrictionType, RosterStatus,
};
pub use status::{
    classify, has_missed_today, next_muster, overall_urgency, MusterStatus, NextMuster, Urgency,
};
pub use storage::{AppData, Database, Settings};
pub use time::{calculate_end_date, days_remaining, format_military, TimeOfDay};
