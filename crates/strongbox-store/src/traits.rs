//! Store traits: the abstract interface to the blob store and directory.
//!
//! These traits keep the client storage-agnostic. Calls are synchronous
//! and expected to return or fail immediately; retry and timeout policy
//! belongs to the backend.

use std::sync::Arc;

use bytes::Bytes;
use strongbox_core::BlobId;

use crate::error::Result;

/// An untrusted key-value blob store.
///
/// Implementations may be shared by many uncoordinated clients. No locking
/// is offered across calls; `put` is last-write-wins.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `id`, replacing any previous value.
    fn put(&self, id: &BlobId, bytes: &[u8]) -> Result<()>;

    /// Fetch the blob at `id`, or `None` if absent.
    fn get(&self, id: &BlobId) -> Result<Option<Bytes>>;

    /// Remove the blob at `id`. Removing an absent blob is not an error.
    fn delete(&self, id: &BlobId) -> Result<()>;

    /// Check whether a blob exists at `id`.
    fn contains(&self, id: &BlobId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// A public, write-once directory of public keys.
pub trait KeyDirectory: Send + Sync {
    /// Publish `key` under `label`.
    ///
    /// Fails with [`StoreError::LabelTaken`](crate::StoreError::LabelTaken)
    /// if the label already exists. There is no update or delete.
    fn publish(&self, label: &str, key: &[u8]) -> Result<()>;

    /// Look up the key published under `label`.
    fn lookup(&self, label: &str) -> Result<Option<Vec<u8>>>;
}

impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn put(&self, id: &BlobId, bytes: &[u8]) -> Result<()> {
        (**self).put(id, bytes)
    }

    fn get(&self, id: &BlobId) -> Result<Option<Bytes>> {
        (**self).get(id)
    }

    fn delete(&self, id: &BlobId) -> Result<()> {
        (**self).delete(id)
    }

    fn contains(&self, id: &BlobId) -> Result<bool> {
        (**self).contains(id)
    }
}

impl<D: KeyDirectory + ?Sized> KeyDirectory for Arc<D> {
    fn publish(&self, label: &str, key: &[u8]) -> Result<()> {
        (**self).publish(label, key)
    }

    fn lookup(&self, label: &str) -> Result<Option<Vec<u8>>> {
        (**self).lookup(label)
    }
}
