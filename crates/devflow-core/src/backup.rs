//! Backup export and import.
//!
//! The backup document is the persisted snapshot plus an export
//! timestamp and a format version. Import is tolerant in both
//! directions: unknown fields are ignored, absent fields fall back to
//! the current defaults, and the session-history cap is re-applied. A
//! document that does not parse rejects the import wholesale -- the
//! store is left untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BackupError, CoreError};
use crate::store::{
    Command, Goal, PomodoroSession, PomodoroSettings, Snapshot, Snippet, Store,
};

/// Version written into new backup documents.
pub const BACKUP_VERSION: u32 = 1;

/// Portable backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub github_username: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub pomodoro_sessions: Vec<PomodoroSession>,
    #[serde(default)]
    pub pomodoro_settings: PomodoroSettings,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
    /// Informational only; never round-tripped into the store.
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

impl BackupDocument {
    /// Parse a backup document from JSON text.
    ///
    /// # Errors
    /// Returns [`BackupError::Malformed`] if the text is not a valid
    /// document.
    pub fn from_json(text: &str) -> Result<Self, BackupError> {
        serde_json::from_str(text).map_err(|err| BackupError::Malformed(err.to_string()))
    }

    /// Serialize for download.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Produce a backup of everything the store persists.
pub fn export_snapshot(store: &Store, now: DateTime<Utc>) -> BackupDocument {
    let snapshot = store.snapshot();
    BackupDocument {
        version: BACKUP_VERSION,
        github_username: snapshot.github_username.clone(),
        goals: snapshot.goals.clone(),
        pomodoro_sessions: snapshot.pomodoro_sessions.clone(),
        pomodoro_settings: snapshot.pomodoro_settings.clone(),
        snippets: snapshot.snippets.clone(),
        exported_at: Some(now),
    }
}

/// Suggested download name, e.g. `devflow-backup-2026-08-05.json`.
pub fn suggested_file_name(date: NaiveDate) -> String {
    format!("devflow-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Replace the store contents with an uploaded document.
///
/// Each top-level field is replaced independently; fields absent from
/// the document land on their defaults, so older and partial backups
/// import cleanly.
///
/// # Errors
/// Returns [`BackupError::Malformed`] (wrapped in [`CoreError`]) when
/// the text does not parse; the store is left unchanged.
pub fn import_snapshot(store: &mut Store, text: &str) -> Result<(), CoreError> {
    let doc = BackupDocument::from_json(text)?;
    let snapshot = Snapshot {
        github_username: doc.github_username,
        goals: doc.goals,
        pomodoro_sessions: doc.pomodoro_sessions,
        pomodoro_settings: doc.pomodoro_settings,
        snippets: doc.snippets,
    };
    store.dispatch(Command::ReplaceAll {
        snapshot: Box::new(snapshot),
    })
}

/// Restore the factory-default snapshot unconditionally.
pub fn reset_all(store: &mut Store) -> Result<(), CoreError> {
    store.dispatch(Command::ResetAll)
}
