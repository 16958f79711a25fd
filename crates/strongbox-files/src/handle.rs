//! Handles: the mutable indirection between an access secret and content.

use serde::{Deserialize, Serialize};
use std::fmt;

use strongbox_core::{seal_value, BlobId, SecretKey};
use strongbox_store::BlobStore;

use crate::error::{FilesError, Result};
use crate::sealed::open_at;
use crate::secret::AccessSecret;

/// The (tail slot, chunk key) pair an access secret currently resolves to.
///
/// Stored at `secret.handle_location()`, sealed under the secret. Ordinary
/// appends never touch it; only revocation rewrites it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Handle {
    /// Mutable slot holding the id of the newest chunk.
    pub tail_slot: BlobId,
    /// Key every chunk and the tail pointer are sealed under.
    pub chunk_key: SecretKey,
}

impl Handle {
    /// A fresh handle with a random tail slot and chunk key.
    pub fn generate() -> Self {
        Self {
            tail_slot: BlobId::random(),
            chunk_key: SecretKey::generate(),
        }
    }

    /// Read the handle an access secret resolves to.
    ///
    /// A missing handle is `NotFound`; this is what a revoked holder sees.
    pub fn load<B: BlobStore + ?Sized>(store: &B, secret: &AccessSecret) -> Result<Self> {
        let location = secret.handle_location();
        let blob = store
            .get(&location)?
            .ok_or_else(|| FilesError::NotFound(format!("handle {}", location)))?;
        open_at(secret.key(), &location, &blob, "handle")
    }

    /// Write this handle for an access secret, replacing any previous one.
    pub fn save<B: BlobStore + ?Sized>(&self, store: &B, secret: &AccessSecret) -> Result<()> {
        let blob = seal_value(secret.key(), self)?;
        store.put(&secret.handle_location(), &blob)?;
        Ok(())
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("tail_slot", &self.tail_slot)
            .finish_non_exhaustive()
    }
}
