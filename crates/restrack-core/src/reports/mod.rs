//! Plain-text report rendering.
//!
//! Three report shapes: the daily muster log for one date across the
//! active roster, an individual restrictee's history, and a weekly
//! per-slot grid. All of them are re-derivations over [`build_daily_log`]
//! and [`stats`]; none of them mutate anything.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::error::Result;
use crate::muster::{build_daily_log, stats, SlotState};
use crate::storage::Database;
use crate::time::{date_range, days_remaining, format_military};

const PAGE_WIDTH: usize = 64;

fn center(s: &str) -> String {
    if s.len() >= PAGE_WIDTH {
        return s.to_string();
    }
    let pad = (PAGE_WIDTH - s.len()) / 2;
    format!("{}{}", " ".repeat(pad), s)
}

fn rule() -> String {
    "=".repeat(PAGE_WIDTH)
}

/// Daily muster log for one date across all active restrictees.
pub fn daily_report(db: &Database, date: NaiveDate, clock: &dyn Clock) -> Result<String> {
    let settings = db.settings()?;
    let restrictees = db.list_restrictees(true)?;

    let mut out = String::new();
    writeln!(out, "{}", center("RESTRICTION MUSTER LOG")).ok();
    writeln!(out, "{}", center(&format_military(date))).ok();
    if !settings.unit_name.is_empty() {
        writeln!(out, "{}", center(&settings.unit_name)).ok();
    }
    writeln!(out, "{}", rule()).ok();

    for restrictee in &restrictees {
        let records = db.events_for_date(&restrictee.id, date)?;
        let log = build_daily_log(restrictee, date, &records, clock);

        writeln!(out).ok();
        writeln!(out, "{}", restrictee.display_name()).ok();
        writeln!(
            out,
            "Restriction: {} - {}",
            format_military(restrictee.start_date),
            format_military(restrictee.end_date)
        )
        .ok();
        writeln!(out, "  {:<7}{:<10}{:<8}RECORDED BY", "TIME", "STATUS", "ACTUAL").ok();

        for slot in &log.slots {
            let status = match &slot.state {
                SlotState::Recorded { outcome } => outcome.display_name().to_uppercase(),
                // The printed log does not distinguish pending from
                // unrecorded; both are open slots on paper.
                SlotState::Pending { .. } | SlotState::Unrecorded => "PENDING".to_string(),
            };
            let actual = slot
                .actual_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            let recorded_by = slot.recorded_by.clone().filter(|s| !s.is_empty());
            writeln!(
                out,
                "  {:<7}{:<10}{:<8}{}",
                slot.time.to_string(),
                status,
                actual,
                recorded_by.as_deref().unwrap_or("-")
            )
            .ok();
            if let Some(notes) = &slot.notes {
                writeln!(out, "      Note: {notes}").ok();
            }
        }
    }

    writeln!(out).ok();
    writeln!(out, "{}", rule()).ok();
    writeln!(out, "DUTY SUPERVISOR: ______________________  DATE: __________").ok();
    writeln!(out, "REMARKS:").ok();
    writeln!(out, "{}", "_".repeat(PAGE_WIDTH)).ok();
    writeln!(out, "{}", "_".repeat(PAGE_WIDTH)).ok();

    Ok(out)
}

/// History report for one restrictee: identity block, summary statistics,
/// then the log grouped by date, most recent first (up to `limit_days`
/// distinct dates). `Ok(None)` when the id does not exist.
pub fn individual_report(
    db: &Database,
    restrictee_id: &str,
    limit_days: usize,
    clock: &dyn Clock,
) -> Result<Option<String>> {
    let Some(restrictee) = db.get_restrictee(restrictee_id)? else {
        return Ok(None);
    };
    let history = db.events_for_restrictee(restrictee_id)?;
    let summary = stats(&history);

    let mut out = String::new();
    writeln!(out, "{}", center("RESTRICTION HISTORY REPORT")).ok();
    writeln!(out, "{}", rule()).ok();
    writeln!(out, "{}", restrictee.display_name()).ok();
    writeln!(
        out,
        "Type: {}",
        restrictee.restriction_type.display_name()
    )
    .ok();
    writeln!(
        out,
        "Period: {} - {} ({} days, {} remaining)",
        format_military(restrictee.start_date),
        format_military(restrictee.end_date),
        restrictee.days_awarded,
        days_remaining(restrictee.end_date, clock.today())
    )
    .ok();
    let times: Vec<String> = restrictee
        .muster_times
        .iter()
        .map(|t| t.to_string())
        .collect();
    writeln!(out, "Muster Times: {}", times.join(", ")).ok();
    if !restrictee.unit.is_empty() {
        writeln!(out, "Unit: {}", restrictee.unit).ok();
    }

    writeln!(out).ok();
    writeln!(out, "SUMMARY").ok();
    writeln!(
        out,
        "Total: {}  Present: {}  Late: {}  Missed: {}  Excused: {}",
        summary.total, summary.present, summary.late, summary.missed, summary.excused
    )
    .ok();
    writeln!(out, "Compliance Rate: {}%", summary.compliance_rate).ok();

    writeln!(out).ok();
    writeln!(out, "MUSTER LOG").ok();
    for (date, events) in db.events_grouped_by_date(restrictee_id, limit_days)? {
        writeln!(out, "{}", format_military(date)).ok();
        for event in events {
            let actual = event
                .actual_time
                .map(|t| format!(" at {t}"))
                .unwrap_or_default();
            let recorder = if event.recorded_by.is_empty() {
                "Unknown".to_string()
            } else {
                event.recorded_by.clone()
            };
            writeln!(
                out,
                "  {} - {}{} ({})",
                event.scheduled_time,
                event.outcome.display_name().to_uppercase(),
                actual,
                recorder
            )
            .ok();
            if let Some(notes) = &event.notes {
                writeln!(out, "      Note: {notes}").ok();
            }
        }
    }

    Ok(Some(out))
}

/// Weekly summary: a 7-day grid per active restrictee, one letter per
/// outcome, `M` for a past slot with no record, `-` for a pending one.
pub fn weekly_report(db: &Database, start: NaiveDate, clock: &dyn Clock) -> Result<String> {
    let settings = db.settings()?;
    let end = start
        .checked_add_days(chrono::Days::new(6))
        .unwrap_or(start);
    let dates = date_range(start, end);
    let today = clock.today();

    let mut out = String::new();
    writeln!(out, "{}", center("WEEKLY RESTRICTION MUSTER SUMMARY")).ok();
    writeln!(
        out,
        "{}",
        center(&format!(
            "{} - {}",
            format_military(start),
            format_military(end)
        ))
    )
    .ok();
    if !settings.unit_name.is_empty() {
        writeln!(out, "{}", center(&settings.unit_name)).ok();
    }
    writeln!(out, "{}", rule()).ok();

    for restrictee in db.list_restrictees(true)? {
        writeln!(out).ok();
        writeln!(out, "{}", restrictee.display_name()).ok();

        write!(out, "  {:<7}", "Time").ok();
        for date in &dates {
            let label = date.format("%a %d").to_string();
            write!(out, "{label:<8}").ok();
        }
        writeln!(out).ok();

        let mut times = restrictee.muster_times.clone();
        times.sort();
        for time in times {
            write!(out, "  {:<7}", time.to_string()).ok();
            for date in &dates {
                let cell = match db.get_record(&restrictee.id, *date, time)? {
                    Some(record) => record.outcome.letter(),
                    None if *date < today => 'M',
                    None => '-',
                };
                write!(out, "{cell:<8}").ok();
            }
            writeln!(out).ok();
        }
    }

    writeln!(out).ok();
    writeln!(
        out,
        "Legend: P = Present   L = Late   M = Missed   E = Excused   - = Pending"
    )
    .ok();

    Ok(out)
}
