//! SQLite-backed progress store.
//!
//! One row per user holds the serialized record; the table doubles as
//! the at-most-one-record-per-user contract of the gateway.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{data_dir, ProgressStore};
use crate::error::StorageError;

/// Local store at `~/.config/humanos/humanos.db`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at its default location, creating the schema if
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::Backend(e.to_string()))?
            .join("humanos.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path (used by tests with tempdirs).
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS progress (
                user_id    TEXT PRIMARY KEY,
                document   TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl ProgressStore for SqliteStore {
    fn load(&self, user_id: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM progress WHERE user_id = ?1")?;
        let result = stmt.query_row(params![user_id], |row| row.get::<_, String>(0));
        match result {
            Ok(document) => Ok(Some(document)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, user_id: &str, document: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO progress (user_id, document, updated_at)
             VALUES (?1, ?2, ?3)",
            params![user_id, document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn clear(&mut self, user_id: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM progress WHERE user_id = ?1", params![user_id])?;
        Ok(())
    }
}
