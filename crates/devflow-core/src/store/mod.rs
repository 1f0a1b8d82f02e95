//! The persistent store.
//!
//! A single in-memory [`Snapshot`] is the authoritative state. Mutations
//! go through [`Store::dispatch`]: validate the command, apply the pure
//! reducer, then persist the whole document synchronously. A failed write
//! is logged and counted but never surfaces to the mutating caller -- the
//! in-memory state simply stays memory-only for the rest of the session.

mod command;
mod persist;
mod snapshot;

pub use command::{apply, Command, SettingsPatch, SnippetPatch};
pub use persist::{JsonFilePersister, MemoryPersister, Persister};
pub use snapshot::{
    Goal, GoalCategory, PomodoroSession, PomodoroSettings, SessionType, Snapshot, Snippet,
    SESSION_HISTORY_CAP,
};

use std::path::PathBuf;

use chrono::Utc;

use crate::error::{CoreError, PersistenceError};

/// File name under the data directory; the dashboard's storage namespace.
pub const STORAGE_FILE: &str = "devflow-storage.json";

/// Returns `~/.config/devflow[-dev]/` based on DEVFLOW_ENV.
///
/// Set DEVFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEVFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("devflow-dev")
    } else {
        base_dir.join("devflow")
    };

    std::fs::create_dir_all(&dir).map_err(|err| PersistenceError::DataDir(err.to_string()))?;
    Ok(dir)
}

/// The persistent store.
pub struct Store {
    snapshot: Snapshot,
    persister: Box<dyn Persister>,
    write_failures: u64,
}

impl Store {
    /// Open the store at the default location, loading the persisted
    /// snapshot. Missing or corrupt data falls back to the default
    /// initial state rather than failing startup.
    ///
    /// # Errors
    /// Returns an error only if the data directory cannot be resolved.
    pub fn open() -> Result<Self, PersistenceError> {
        let path = data_dir()?.join(STORAGE_FILE);
        Ok(Self::with_persister(Box::new(JsonFilePersister::new(path))))
    }

    /// An ephemeral store that never touches disk.
    pub fn in_memory() -> Self {
        Self::with_persister(Box::new(MemoryPersister::new()))
    }

    /// Open with an explicit persister.
    pub fn with_persister(persister: Box<dyn Persister>) -> Self {
        let snapshot = match persister.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => Snapshot::default(),
            Err(err) => {
                tracing::warn!(error = %err, "persisted state unreadable; starting from defaults");
                Snapshot::default()
            }
        };
        Self {
            snapshot,
            persister,
            write_failures: 0,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Validate and apply a command, then persist.
    ///
    /// # Errors
    /// Returns an error only for invalid input; a persistence write
    /// failure is swallowed and the in-memory state remains authoritative.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CoreError> {
        command.validate()?;
        apply(&mut self.snapshot, command, Utc::now());
        if let Err(err) = self.persister.persist(&self.snapshot) {
            self.write_failures += 1;
            tracing::warn!(error = %err, "state write failed; keeping in-memory snapshot");
        }
        Ok(())
    }

    /// Number of swallowed persistence write failures this session.
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }
}
