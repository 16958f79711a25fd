//! In-memory implementations of the store traits.
//!
//! These are primarily for testing. They have the same semantics as the
//! SQLite backend but keep everything in memory, and the blob store counts
//! the bytes written through it so tests can measure write volume.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use bytes::Bytes;
use strongbox_core::BlobId;

use crate::error::{Result, StoreError};
use crate::traits::{BlobStore, KeyDirectory};

/// In-memory blob store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<BlobId, Bytes>>,
    bytes_written: AtomicU64,
    puts: AtomicU64,
    deletes: AtomicU64,
}

impl MemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bytes passed to `put` since creation or the last
    /// [`reset_stats`](Self::reset_stats).
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Number of `put` calls since the last reset.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Number of `delete` calls since the last reset.
    pub fn delete_count(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Zero the write counters.
    pub fn reset_stats(&self) {
        self.bytes_written.store(0, Ordering::Relaxed);
        self.puts.store(0, Ordering::Relaxed);
        self.deletes.store(0, Ordering::Relaxed);
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    /// Whether the store holds no blobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All identifiers currently stored, sorted.
    pub fn ids(&self) -> Result<Vec<BlobId>> {
        let blobs = self.read()?;
        let mut ids: Vec<BlobId> = blobs.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<BlobId, Bytes>>> {
        self.blobs
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<BlobId, Bytes>>> {
        self.blobs
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, id: &BlobId, bytes: &[u8]) -> Result<()> {
        self.write()?.insert(*id, Bytes::copy_from_slice(bytes));
        self.bytes_written
            .fetch_add(bytes.len() as u64, Ordering::Relaxed);
        self.puts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn get(&self, id: &BlobId) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn delete(&self, id: &BlobId) -> Result<()> {
        self.write()?.remove(id);
        self.deletes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn contains(&self, id: &BlobId) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }
}

/// In-memory key directory.
#[derive(Default)]
pub struct MemoryDirectory {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published labels.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyDirectory for MemoryDirectory {
    fn publish(&self, label: &str, key: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        if entries.contains_key(label) {
            return Err(StoreError::LabelTaken(label.to_string()));
        }
        entries.insert(label.to_string(), key.to_vec());
        Ok(())
    }

    fn lookup(&self, label: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(entries.get(label).cloned())
    }
}
