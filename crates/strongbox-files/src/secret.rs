//! Access secrets: the unit of revocable access to one file.

use serde::{Deserialize, Serialize};
use std::fmt;

use strongbox_core::{BlobId, SecretKey};

/// Label under which an access secret's handle is stored.
pub const HANDLE_LABEL: &str = "handle";

/// A per-grantee symmetric secret.
///
/// Every grantee of a file holds a distinct `AccessSecret`. All of them
/// resolve to the same [`Handle`](crate::Handle) until a revocation
/// rewrites some handles and leaves others dangling.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessSecret(SecretKey);

impl AccessSecret {
    /// Mint a fresh random access secret.
    pub fn generate() -> Self {
        Self(SecretKey::generate())
    }

    /// Wrap existing key material.
    pub fn from_key(key: SecretKey) -> Self {
        Self(key)
    }

    /// The underlying key.
    pub fn key(&self) -> &SecretKey {
        &self.0
    }

    /// Where this secret's handle lives.
    pub fn handle_location(&self) -> BlobId {
        self.0.derive_id(HANDLE_LABEL)
    }

    /// Derive a further location under this secret.
    pub fn derive_location(&self, label: &str) -> BlobId {
        self.0.derive_id(label)
    }
}

impl fmt::Debug for AccessSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessSecret(handle={:?})", self.handle_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_secrets_distinct_handles() {
        let a = AccessSecret::generate();
        let b = AccessSecret::generate();
        assert_ne!(a.handle_location(), b.handle_location());
    }

    #[test]
    fn test_handle_location_stable() {
        let key = SecretKey::from_bytes([3u8; 32]);
        let a = AccessSecret::from_key(key.clone());
        let b = AccessSecret::from_key(key);
        assert_eq!(a.handle_location(), b.handle_location());
        assert_ne!(a.handle_location(), a.derive_location("delegations"));
    }
}
