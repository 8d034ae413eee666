//! Persistence: SQLite-backed repository and whole-document export/import.

pub mod database;
pub mod document;

pub use database::Database;
pub use document::AppData;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// Application-level settings, stored alongside the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Times pre-filled when creating a restrictee.
    #[serde(default = "default_muster_times")]
    pub default_muster_times: Vec<TimeOfDay>,
    /// Unit name printed in report headers.
    #[serde(default)]
    pub unit_name: String,
    /// Recorder identity used when a sign-in omits one.
    #[serde(default)]
    pub default_recorder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_muster_times: default_muster_times(),
            unit_name: String::new(),
            default_recorder: String::new(),
        }
    }
}

fn default_muster_times() -> Vec<TimeOfDay> {
    ["0600", "1200", "1800", "2200"]
        .iter()
        .map(|t| t.parse().expect("default times are valid"))
        .collect()
}

/// Returns `~/.config/restrack[-dev]/` based on RESTRACK_ENV.
///
/// Set RESTRACK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESTRACK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("restrack-dev")
    } else {
        base_dir.join("restrack")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        let times: Vec<String> = s.default_muster_times.iter().map(|t| t.to_hhmm()).collect();
        assert_eq!(times, vec!["0600", "1200", "1800", "2200"]);
        assert!(s.unit_name.is_empty());
        assert!(s.default_recorder.is_empty());
    }

    #[test]
    fn settings_deserialize_fills_missing_fields() {
        let s: Settings = serde_json::from_str(r#"{"unitName":"1st Bn"}"#).unwrap();
        assert_eq!(s.unit_name, "1st Bn");
        assert_eq!(s.default_muster_times.len(), 4);
    }
}
