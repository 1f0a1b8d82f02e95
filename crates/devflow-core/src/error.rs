//! Core error types for devflow-core.
//!
//! Nothing in this hierarchy is fatal to the process: a persistence
//! failure degrades to in-memory-only state, a malformed backup leaves the
//! store untouched, and an unreachable activity API collapses into a
//! single "unavailable" display state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for devflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Backup import/export errors
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External activity errors
    #[error("Activity error: {0}")]
    Activity(#[from] ActivityError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence-specific errors.
///
/// Write failures are swallowed at the dispatch layer: the in-memory
/// snapshot stays authoritative for the session and the condition is
/// logged, never propagated to the mutating caller.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Could not resolve or create the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),

    /// Writing the snapshot to durable storage failed
    #[error("Failed to write state to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Reading the persisted snapshot failed
    #[error("Failed to read state from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

/// Backup document errors.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The uploaded document could not be parsed
    #[error("Malformed backup document: {0}")]
    Malformed(String),
}

/// Validation errors, rejected before any mutation reaches the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// External activity errors.
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The activity API could not be reached or answered abnormally.
    /// Timeouts, 404s and rate limits all surface as this one state.
    #[error("GitHub activity unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
