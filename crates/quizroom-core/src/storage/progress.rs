//! Session progress persistence.
//!
//! Stores only move opaque strings under one namespace key. Decoding lives
//! in the provided `load`/`save` methods so every backend treats corrupt
//! records the same way: they read as absent and never fail the caller.

use tracing::warn;

use super::database::Database;
use crate::error::StorageError;
use crate::session::SessionState;

pub trait ProgressStore {
    /// Namespace key the record lives under.
    fn namespace(&self) -> &str;

    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&mut self, record: &str) -> Result<(), StorageError>;
    /// Remove the stored record. Returns whether one existed.
    fn clear(&mut self) -> Result<bool, StorageError>;

    /// Restore saved progress.
    ///
    /// Missing, unreadable and malformed records all yield `None`.
    fn load(&self, default_duration_secs: u64) -> Option<SessionState> {
        let raw = match self.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(namespace = self.namespace(), error = %e, "cannot read saved progress");
                return None;
            }
        };
        match SessionState::from_json(&raw, default_duration_secs) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    namespace = self.namespace(),
                    error = %e,
                    "discarding malformed saved progress"
                );
                None
            }
        }
    }

    /// Persist the current state, replacing any previous record.
    fn save(&mut self, state: &SessionState) -> Result<(), StorageError> {
        let record = state.to_json()?;
        self.write(&record)
    }
}

/// Progress kept in the SQLite `kv` table.
pub struct KvProgressStore {
    db: Database,
    namespace: String,
}

impl KvProgressStore {
    pub fn new(db: Database, namespace: impl Into<String>) -> Self {
        Self {
            db,
            namespace: namespace.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl ProgressStore for KvProgressStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.db.kv_get(&self.namespace)?)
    }

    fn write(&mut self, record: &str) -> Result<(), StorageError> {
        Ok(self.db.kv_set(&self.namespace, record)?)
    }

    fn clear(&mut self) -> Result<bool, StorageError> {
        Ok(self.db.kv_delete(&self.namespace)?)
    }
}

/// Process-local store; nothing survives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    namespace: String,
    record: Option<String>,
    writes: usize,
}

impl MemoryProgressStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            record: None,
            writes: 0,
        }
    }

    /// Start with a raw record already present.
    pub fn with_record(namespace: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            record: Some(record.into()),
            writes: 0,
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProgressStore for MemoryProgressStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.record.clone())
    }

    fn write(&mut self, record: &str) -> Result<(), StorageError> {
        self.record = Some(record.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<bool, StorageError> {
        Ok(self.record.take().is_some())
    }
}
