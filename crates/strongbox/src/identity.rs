//! User identity: the long-term keys recovered at login.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use strongbox_core::{pseudonym, BlobId, Blake3Hash, Ed25519PublicKey, Keypair, SecretKey};
use strongbox_share::{X25519PublicKey, X25519StaticSecret};

use crate::error::{Result, VaultError};

/// Label of the identity record under the password key.
pub const IDENTITY_LABEL: &str = "identity";

/// Directory label of a user's public encryption key.
pub fn encryption_label(username: &str) -> String {
    format!("{}/encryption", username)
}

/// Directory label of a user's public verification key.
pub fn verification_label(username: &str) -> String {
    format!("{}/verification", username)
}

/// Where a user's identity record is stored, given their password key.
pub fn identity_location(password_key: &SecretKey) -> BlobId {
    password_key.derive_id(IDENTITY_LABEL)
}

/// The sealed form of an [`Identity`].
#[derive(Serialize, Deserialize)]
struct IdentityRecord {
    pseudonym: Blake3Hash,
    username: String,
    filename_root_key: SecretKey,
    #[serde(with = "serde_bytes")]
    decryption_key: [u8; 32],
    #[serde(with = "serde_bytes")]
    signing_seed: [u8; 32],
}

impl Drop for IdentityRecord {
    fn drop(&mut self) {
        self.decryption_key.zeroize();
        self.signing_seed.zeroize();
    }
}

/// A logged-in user's private state.
#[derive(Clone)]
pub struct Identity {
    username: String,
    filename_root_key: SecretKey,
    decryption: X25519StaticSecret,
    signing: Keypair,
}

impl Identity {
    /// Fresh keys for a new user.
    pub fn generate(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            filename_root_key: SecretKey::generate(),
            decryption: X25519StaticSecret::generate(),
            signing: Keypair::generate(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn filename_root_key(&self) -> &SecretKey {
        &self.filename_root_key
    }

    pub fn decryption_key(&self) -> &X25519StaticSecret {
        &self.decryption
    }

    pub fn signing_key(&self) -> &Keypair {
        &self.signing
    }

    pub fn encryption_key(&self) -> X25519PublicKey {
        self.decryption.public_key()
    }

    pub fn verification_key(&self) -> Ed25519PublicKey {
        self.signing.public_key()
    }

    /// Seal the identity under the password key.
    pub fn seal(&self, password_key: &SecretKey) -> Result<Vec<u8>> {
        let record = IdentityRecord {
            pseudonym: pseudonym(&self.username),
            username: self.username.clone(),
            filename_root_key: self.filename_root_key.clone(),
            decryption_key: self.decryption.to_bytes(),
            signing_seed: self.signing.seed(),
        };
        Ok(strongbox_core::seal_value(password_key, &record)?)
    }

    /// Open a sealed identity and check it belongs to `username`.
    pub fn open(password_key: &SecretKey, username: &str, blob: &[u8]) -> Result<Self> {
        let record: IdentityRecord = strongbox_core::open_value(password_key, blob)?;
        if record.pseudonym != pseudonym(username) || record.username != username {
            return Err(VaultError::Integrity);
        }

        Ok(Self {
            username: record.username.clone(),
            filename_root_key: record.filename_root_key.clone(),
            decryption: X25519StaticSecret::from_bytes(record.decryption_key),
            signing: Keypair::from_seed(&record.signing_seed),
        })
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("verification_key", &self.verification_key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let identity = Identity::generate("alice");
        let key = SecretKey::generate();

        let blob = identity.seal(&key).unwrap();
        let opened = Identity::open(&key, "alice", &blob).unwrap();

        assert_eq!(opened.username(), "alice");
        assert_eq!(opened.verification_key(), identity.verification_key());
        assert_eq!(opened.encryption_key(), identity.encryption_key());
        assert_eq!(
            opened.filename_root_key().as_bytes(),
            identity.filename_root_key().as_bytes()
        );
    }

    #[test]
    fn test_open_with_wrong_key() {
        let blob = Identity::generate("alice").seal(&SecretKey::generate()).unwrap();
        assert!(matches!(
            Identity::open(&SecretKey::generate(), "alice", &blob),
            Err(VaultError::Integrity)
        ));
    }

    #[test]
    fn test_open_for_other_username() {
        let key = SecretKey::generate();
        let blob = Identity::generate("alice").seal(&key).unwrap();
        assert!(matches!(
            Identity::open(&key, "mallory", &blob),
            Err(VaultError::Integrity)
        ));
    }

    #[test]
    fn test_labels_distinct() {
        assert_eq!(encryption_label("alice"), "alice/encryption");
        assert_eq!(verification_label("alice"), "alice/verification");
        assert_ne!(encryption_label("alice"), verification_label("alice"));
    }
}
