//! A logged-in user's view of the store.

use std::fmt;
use std::sync::Arc;

use strongbox_core::{BlobId, Ed25519PublicKey};
use strongbox_files::{AccessSecret, Chain, Handle, NameBindings};
use strongbox_share::{DelegationMap, RevocationReport, RevokedGrants, X25519PublicKey};
use strongbox_store::{BlobStore, KeyDirectory};

use crate::error::{Result, VaultError};
use crate::identity::{encryption_label, verification_label, Identity};

/// File operations on behalf of one user.
///
/// A session holds only what it derived at login. Several sessions for the
/// same user may run side by side; they see each other's writes through the
/// store and nothing else.
pub struct Session<B: BlobStore, D: KeyDirectory> {
    store: Arc<B>,
    directory: Arc<D>,
    identity: Identity,
    revoked_grants: RevokedGrants,
}

impl<B: BlobStore, D: KeyDirectory> Session<B, D> {
    pub(crate) fn new(
        store: Arc<B>,
        directory: Arc<D>,
        identity: Identity,
        revoked_grants: RevokedGrants,
    ) -> Self {
        Self {
            store,
            directory,
            identity,
            revoked_grants,
        }
    }

    pub fn username(&self) -> &str {
        self.identity.username()
    }

    pub fn verification_key(&self) -> Ed25519PublicKey {
        self.identity.verification_key()
    }

    pub fn encryption_key(&self) -> X25519PublicKey {
        self.identity.encryption_key()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create `filename`, or replace its entire content.
    ///
    /// Replacing keeps the access secret and every grant made through it;
    /// grantees see the new content.
    pub fn store_file(&self, filename: &str, content: &[u8]) -> Result<()> {
        let names = self.names();
        match names.lookup(filename)? {
            Some(secret) => {
                let handle = Handle::load(self.store(), &secret)?;
                Chain::new(self.store(), &handle).reset(content)?;
                tracing::debug!(user = self.username(), len = content.len(), "overwrote file");
            }
            None => {
                let secret = AccessSecret::generate();
                let handle = Handle::generate();
                handle.save(self.store(), &secret)?;
                DelegationMap::new().save(self.store(), &secret)?;
                Chain::new(self.store(), &handle).reset(content)?;
                names.bind(filename, &secret)?;
                tracing::debug!(user = self.username(), len = content.len(), "created file");
            }
        }
        Ok(())
    }

    /// Add `content` to the end of `filename`.
    ///
    /// Writes one chunk and the tail slot regardless of the file's size.
    pub fn append_to_file(&self, filename: &str, content: &[u8]) -> Result<()> {
        let handle = self.handle(filename)?;
        Chain::new(self.store(), &handle).append(content)?;
        tracing::debug!(user = self.username(), len = content.len(), "appended to file");
        Ok(())
    }

    /// Read the full content of `filename`.
    pub fn load_file(&self, filename: &str) -> Result<Vec<u8>> {
        let handle = self.handle(filename)?;
        Ok(Chain::new(self.store(), &handle).load()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sharing
    // ─────────────────────────────────────────────────────────────────────────

    /// Invite `recipient` to `filename`. Returns the token location to hand
    /// to the recipient out of band.
    pub fn create_invitation(&self, filename: &str, recipient: &str) -> Result<BlobId> {
        let recipient_key = self
            .directory
            .lookup(&encryption_label(recipient))?
            .ok_or_else(|| VaultError::NotFound(format!("no user named {}", recipient)))?;
        let recipient_key = X25519PublicKey::from_slice(&recipient_key)?;

        let secret = self.names().resolve(filename)?;
        let token = strongbox_share::create_invitation(
            self.store(),
            &secret,
            recipient,
            &recipient_key,
            self.identity.signing_key(),
        )?;

        tracing::debug!(user = self.username(), recipient, "invited user");
        Ok(token)
    }

    /// Accept an invitation from `sender`, binding it to `filename`.
    pub fn accept_invitation(&self, sender: &str, token: &BlobId, filename: &str) -> Result<()> {
        let names = self.names();
        if names.exists(filename)? {
            return Err(VaultError::Policy(format!(
                "{} already has a file named {:?}",
                self.username(),
                filename
            )));
        }

        let sender_key = self
            .directory
            .lookup(&verification_label(sender))?
            .ok_or_else(|| VaultError::NotFound(format!("no user named {}", sender)))?;
        let sender_key = Ed25519PublicKey::from_slice(&sender_key)?;

        let secret = strongbox_share::accept_invitation(
            self.store(),
            token,
            &sender_key,
            self.identity.decryption_key(),
        )?;
        names.bind(filename, &secret)?;

        tracing::debug!(user = self.username(), sender, "accepted invitation");
        Ok(())
    }

    /// Revoke the access `target` was granted to `filename` by this user,
    /// along with everyone `target` invited in turn.
    pub fn revoke_access(&self, filename: &str, target: &str) -> Result<RevocationReport> {
        let secret = self.names().resolve(filename)?;
        let report = strongbox_share::revoke(self.store(), &secret, target, self.revoked_grants)?;
        tracing::debug!(user = self.username(), target, "revoked access");
        Ok(report)
    }

    fn store(&self) -> &B {
        &self.store
    }

    fn names(&self) -> NameBindings<'_, B> {
        NameBindings::new(self.store(), self.identity.filename_root_key())
    }

    fn handle(&self, filename: &str) -> Result<Handle> {
        let secret = self.names().resolve(filename)?;
        Ok(Handle::load(self.store(), &secret)?)
    }
}

impl<B: BlobStore, D: KeyDirectory> fmt::Debug for Session<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username())
            .field("revoked_grants", &self.revoked_grants)
            .finish_non_exhaustive()
    }
}
