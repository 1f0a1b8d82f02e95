//! Snapshot persistence.
//!
//! The store talks to durable storage through the [`Persister`] trait:
//! a JSON file under the data directory in production, an in-memory
//! implementation for tests and ephemeral stores. Writes are whole-document
//! and synchronous; the payload is tens of KB at most.

use std::path::PathBuf;

use super::snapshot::Snapshot;
use crate::error::PersistenceError;

/// Durable storage for the full snapshot.
pub trait Persister {
    /// Read the persisted snapshot. `Ok(None)` means nothing was ever
    /// written (first run).
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;

    /// Write the full snapshot.
    fn persist(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

/// JSON-file persistence at a fixed path.
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Persister for JsonFilePersister {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.path.clone(),
                    message: err.to_string(),
                })
            }
        };
        let snapshot =
            serde_json::from_str(&content).map_err(|err| PersistenceError::ReadFailed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        Ok(Some(snapshot))
    }

    fn persist(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let content =
            serde_json::to_string(snapshot).map_err(|err| PersistenceError::WriteFailed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|err| PersistenceError::WriteFailed {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }
}

/// In-memory persistence for tests and ephemeral stores.
#[derive(Default)]
pub struct MemoryPersister {
    snapshot: Option<Snapshot>,
    /// When set, every write fails. Lets tests exercise the swallowed
    /// write-failure path.
    pub fail_writes: bool,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persisted(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
}

impl Persister for MemoryPersister {
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        Ok(self.snapshot.clone())
    }

    fn persist(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::WriteFailed {
                path: PathBuf::from("<memory>"),
                message: "writes disabled".into(),
            });
        }
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}
