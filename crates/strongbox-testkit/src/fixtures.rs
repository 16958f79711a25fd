//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use strongbox::{MemoryBlobStore, MemoryDirectory, Session, Vault, VaultConfig};
use strongbox_core::{BlobId, KdfParams};
use strongbox_store::{BlobStore, Result as StoreResult};

/// Argon2id parameters cheap enough to run hundreds of logins in a test.
pub const FAST_KDF: KdfParams = KdfParams {
    mem_cost_kib: 64,
    time_cost: 1,
    parallelism: 1,
};

/// Default configuration with [`FAST_KDF`].
pub fn fast_config() -> VaultConfig {
    VaultConfig {
        kdf: FAST_KDF,
        ..VaultConfig::default()
    }
}

/// An in-memory vault.
pub struct TestFixture {
    pub vault: Vault<MemoryBlobStore, MemoryDirectory>,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_config(fast_config())
    }

    /// Use `config` but always with cheap KDF parameters.
    pub fn with_config(config: VaultConfig) -> Self {
        let config = VaultConfig {
            kdf: FAST_KDF,
            ..config
        };
        let vault = match Vault::new(MemoryBlobStore::new(), MemoryDirectory::new(), config) {
            Ok(vault) => vault,
            Err(e) => panic!("fast config rejected: {e}"),
        };
        Self { vault }
    }

    /// The password fixtures register `username` with.
    pub fn password(username: &str) -> String {
        format!("{username}-password")
    }

    /// Register `username` and return the session.
    pub fn user(&self, username: &str) -> Session<MemoryBlobStore, MemoryDirectory> {
        match self.vault.register(username, &Self::password(username)) {
            Ok(session) => session,
            Err(e) => panic!("register {username}: {e}"),
        }
    }

    /// Register several users at once.
    pub fn users(&self, usernames: &[&str]) -> Vec<Session<MemoryBlobStore, MemoryDirectory>> {
        usernames.iter().map(|name| self.user(name)).collect()
    }

    /// Open another session for an already registered user.
    pub fn login(&self, username: &str) -> Session<MemoryBlobStore, MemoryDirectory> {
        match self.vault.login(username, &Self::password(username)) {
            Ok(session) => session,
            Err(e) => panic!("login {username}: {e}"),
        }
    }

    pub fn store(&self) -> &MemoryBlobStore {
        self.vault.store()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip one bit of the blob at `id`. Returns false if there is no blob.
pub fn flip_bit<B: BlobStore + ?Sized>(store: &B, id: &BlobId, bit: usize) -> StoreResult<bool> {
    let Some(blob) = store.get(id)? else {
        return Ok(false);
    };
    let mut tampered = blob.to_vec();
    if tampered.is_empty() {
        return Ok(false);
    }
    let byte = (bit / 8) % tampered.len();
    tampered[byte] ^= 1 << (bit % 8);
    store.put(id, &tampered)?;
    Ok(true)
}
