//! SQLite implementation of the store traits.
//!
//! One database file holds both the blob table and the key directory, so a
//! single [`SqliteStore`] can be handed to the client as both collaborators.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};
use strongbox_core::BlobId;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{BlobStore, KeyDirectory};

/// SQLite-based blob store and key directory.
///
/// Thread-safe via an internal Mutex around the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of blobs currently stored.
    pub fn blob_count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM blobs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(format!("mutex poisoned: {}", e)))
    }
}

impl BlobStore for SqliteStore {
    fn put(&self, id: &BlobId, bytes: &[u8]) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO blobs (id, data) VALUES (?1, ?2)",
            params![id.as_bytes().as_slice(), bytes],
        )?;
        Ok(())
    }

    fn get(&self, id: &BlobId) -> Result<Option<Bytes>> {
        let data: Option<Vec<u8>> = self
            .conn()?
            .query_row(
                "SELECT data FROM blobs WHERE id = ?1",
                params![id.as_bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data.map(Bytes::from))
    }

    fn delete(&self, id: &BlobId) -> Result<()> {
        self.conn()?.execute(
            "DELETE FROM blobs WHERE id = ?1",
            params![id.as_bytes().as_slice()],
        )?;
        Ok(())
    }

    fn contains(&self, id: &BlobId) -> Result<bool> {
        let found: Option<i64> = self
            .conn()?
            .query_row(
                "SELECT 1 FROM blobs WHERE id = ?1",
                params![id.as_bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl KeyDirectory for SqliteStore {
    fn publish(&self, label: &str, key: &[u8]) -> Result<()> {
        let inserted = self.conn()?.execute(
            "INSERT OR IGNORE INTO directory (label, key, published_at) VALUES (?1, ?2, ?3)",
            params![label, key, migration::now_millis()],
        )?;

        if inserted == 0 {
            return Err(StoreError::LabelTaken(label.to_string()));
        }
        Ok(())
    }

    fn lookup(&self, label: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .conn()?
            .query_row(
                "SELECT key FROM directory WHERE label = ?1",
                params![label],
                |row| row.get(0),
            )
            .optional()?)
    }
}
