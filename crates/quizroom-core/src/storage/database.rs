//! SQLite-backed storage.
//!
//! Provides persistent storage for:
//! - Saved session progress (key-value store, one key per namespace)
//! - Results of completed sessions

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::events::CompletionReason;
use crate::session::Summary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub namespace: String,
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub unanswered: usize,
    pub total: usize,
    pub reason: CompletionReason,
    pub completed_at: DateTime<Utc>,
}

/// SQLite database for progress and results.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/quizroom/quizroom.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("quizroom.db"))
    }

    /// Open a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS results (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                namespace    TEXT NOT NULL,
                correct      INTEGER NOT NULL,
                wrong        INTEGER NOT NULL,
                skipped      INTEGER NOT NULL,
                unanswered   INTEGER NOT NULL,
                total        INTEGER NOT NULL,
                reason       TEXT NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_results_completed_at ON results(completed_at);",
        )?;
        Ok(())
    }

    /// Record the summary of a completed session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_result(
        &self,
        namespace: &str,
        summary: &Summary,
        reason: CompletionReason,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        let reason_str = match reason {
            CompletionReason::AllRecorded => "all_recorded",
            CompletionReason::TimeExpired => "time_expired",
        };
        self.conn.execute(
            "INSERT INTO results (namespace, correct, wrong, skipped, unanswered, total, reason, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                namespace,
                summary.correct as i64,
                summary.wrong as i64,
                summary.skipped as i64,
                summary.unanswered as i64,
                summary.total as i64,
                reason_str,
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All recorded results, newest first.
    pub fn results(&self) -> Result<Vec<ResultRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, namespace, correct, wrong, skipped, unanswered, total, reason, completed_at
             FROM results
             ORDER BY completed_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let reason = match row.get::<_, String>(7)?.as_str() {
                "time_expired" => CompletionReason::TimeExpired,
                _ => CompletionReason::AllRecorded,
            };
            let completed_at = DateTime::parse_from_rfc3339(&row.get::<_, String>(8)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_default();
            Ok(ResultRecord {
                id: row.get(0)?,
                namespace: row.get(1)?,
                correct: row.get::<_, i64>(2)? as usize,
                wrong: row.get::<_, i64>(3)? as usize,
                skipped: row.get::<_, i64>(4)? as usize,
                unanswered: row.get::<_, i64>(5)? as usize,
                total: row.get::<_, i64>(6)? as usize,
                reason,
                completed_at,
            })
        })?;

        rows.collect()
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Returns whether it existed.
    pub fn kv_delete(&self, key: &str) -> Result<bool, rusqlite::Error> {
        let n = self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }
}
