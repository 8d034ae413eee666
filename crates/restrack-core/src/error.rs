//! Core error types for restrack-core.
//!
//! All failures are detected at the boundary (validation, storage, import);
//! the derivation engine itself is total over well-formed input. Nothing
//! here is fatal to the process.

use std::path::PathBuf;

use thiserror::Error;

use crate::time::TimeError;

/// Core error type for restrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// One or more validation failures; every message is operator-facing
    #[error("Validation failed: {}", format_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Time parsing/range errors
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

fn format_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A sign-in already exists for this (restrictee, date, time) slot
    #[error("A muster record already exists for {date} at {time}")]
    DuplicateSlot { date: String, time: String },

    /// Import document failed shape validation; nothing was written
    #[error("Import rejected: {0}")]
    ImportRejected(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Validation errors for operator-submitted records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing required field
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Days awarded outside the allowed range
    #[error("Days awarded must be between 1 and 60")]
    DaysOutOfRange(i64),

    /// Empty muster schedule
    #[error("At least one muster time is required")]
    NoMusterTimes,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
