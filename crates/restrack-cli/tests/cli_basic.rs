//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify exit codes.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "restrack-cli", "--"])
        .args(args)
        .env("RESTRACK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_roster_list() {
    let (_, _, code) = run_cli(&["roster", "list", "--all"]);
    assert_eq!(code, 0, "roster list failed");
}

#[test]
fn test_roster_add_and_remove() {
    let (stdout, _, code) = run_cli(&[
        "roster", "add", "PFC", "Testcase", "Cli", "2024-01-01", "14", "--times", "0600,1800",
    ]);
    assert_eq!(code, 0, "roster add failed");
    let id_line = stdout
        .lines()
        .find(|l| l.starts_with("Restrictee added: "))
        .expect("no id in output");
    let id = id_line.trim_start_matches("Restrictee added: ").trim();

    let (_, _, code) = run_cli(&["roster", "show", id]);
    assert_eq!(code, 0, "roster show failed");

    let (stdout, _, code) = run_cli(&["roster", "remove", id]);
    assert_eq!(code, 0, "roster remove failed");
    assert!(stdout.contains("Restrictee removed"));
}

#[test]
fn test_roster_add_rejects_bad_days() {
    let (_, stderr, code) = run_cli(&[
        "roster", "add", "PFC", "Invalid", "Days", "2024-01-01", "90", "--times", "0600",
    ]);
    assert_ne!(code, 0, "expected validation failure");
    assert!(stderr.contains("Days awarded"));
}

#[test]
fn test_roster_update_rejects_bad_days() {
    let (stdout, _, code) = run_cli(&[
        "roster", "add", "PFC", "Updatecase", "Cli", "2024-01-01", "14", "--times", "0600",
    ]);
    assert_eq!(code, 0, "roster add failed");
    let id_line = stdout
        .lines()
        .find(|l| l.starts_with("Restrictee added: "))
        .expect("no id in output");
    let id = id_line.trim_start_matches("Restrictee added: ").trim();

    let (_, stderr, code) = run_cli(&["roster", "update", id, "--days", "90"]);
    assert_ne!(code, 0, "expected validation failure");
    assert!(stderr.contains("Days awarded"));

    let (_, stderr, code) = run_cli(&["roster", "update", id, "--days", "0"]);
    assert_ne!(code, 0, "expected validation failure");
    assert!(stderr.contains("Days awarded"));

    // The stored record is untouched.
    let (stdout, _, code) = run_cli(&["roster", "show", id]);
    assert_eq!(code, 0, "roster show failed");
    assert!(stdout.contains("\"daysAwarded\": 14"));
    assert!(stdout.contains("\"endDate\": \"2024-01-14\""));

    let (_, _, code) = run_cli(&["roster", "remove", id]);
    assert_eq!(code, 0, "roster remove failed");
}

#[test]
fn test_roster_update_edipi_and_type() {
    let (stdout, _, code) = run_cli(&[
        "roster", "add", "PFC", "Editcase", "Cli", "2024-01-01", "14", "--times", "0600",
    ]);
    assert_eq!(code, 0, "roster add failed");
    let id_line = stdout
        .lines()
        .find(|l| l.starts_with("Restrictee added: "))
        .expect("no id in output");
    let id = id_line.trim_start_matches("Restrictee added: ").trim();

    let (stdout, _, code) = run_cli(&[
        "roster",
        "update",
        id,
        "--edipi",
        "1234567890",
        "--restriction-type",
        "epd",
    ]);
    assert_eq!(code, 0, "roster update failed");
    assert!(stdout.contains("\"edipi\": \"1234567890\""));
    assert!(stdout.contains("\"restrictionType\": \"epd\""));

    let (_, _, code) = run_cli(&["roster", "remove", id]);
    assert_eq!(code, 0, "roster remove failed");
}

#[test]
fn test_status_board() {
    let (_, _, code) = run_cli(&["status", "board"]);
    assert_eq!(code, 0, "status board failed");
}

#[test]
fn test_report_daily() {
    let (stdout, _, code) = run_cli(&["report", "daily"]);
    assert_eq!(code, 0, "report daily failed");
    assert!(stdout.contains("RESTRICTION MUSTER LOG"));
}

#[test]
fn test_settings_show() {
    let (stdout, _, code) = run_cli(&["settings", "show"]);
    assert_eq!(code, 0, "settings show failed");
    assert!(stdout.contains("defaultMusterTimes"));
}

#[test]
fn test_data_export() {
    let (stdout, _, code) = run_cli(&["data", "export"]);
    assert_eq!(code, 0, "data export failed");
    assert!(stdout.contains("restrictees"));
}
