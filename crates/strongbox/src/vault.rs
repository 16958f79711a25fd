//! The vault: entry point that registers users and opens sessions.

use std::sync::Arc;

use strongbox_core::{derive_password_key, pseudonym, SecretKey};
use strongbox_store::{BlobStore, KeyDirectory, StoreError};

use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::identity::{encryption_label, identity_location, verification_label, Identity};
use crate::session::Session;

/// A blob store and key directory, plus the configuration to use them with.
///
/// Cloning a vault is cheap; clones share the same backends.
pub struct Vault<B: BlobStore, D: KeyDirectory> {
    store: Arc<B>,
    directory: Arc<D>,
    config: VaultConfig,
}

impl<B: BlobStore, D: KeyDirectory> Clone for Vault<B, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
            config: self.config.clone(),
        }
    }
}

impl<B: BlobStore, D: KeyDirectory> Vault<B, D> {
    /// Create a vault over owned backends.
    pub fn new(store: B, directory: D, config: VaultConfig) -> Result<Self> {
        Self::from_shared(Arc::new(store), Arc::new(directory), config)
    }

    /// Create a vault over backends that other vaults may also use.
    pub fn from_shared(store: Arc<B>, directory: Arc<D>, config: VaultConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            directory,
            config,
        })
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Create a new user and log them in.
    ///
    /// Fails with `Policy` if the username is empty, if an identity already
    /// exists for these credentials, or if the username's directory labels
    /// were claimed by an earlier registration.
    ///
    /// The sealed identity is written before any key is published. A retry
    /// after a failure part-way through reopens that identity and publishes
    /// whatever is still missing.
    pub fn register(&self, username: &str, password: &str) -> Result<Session<B, D>> {
        if username.is_empty() {
            return Err(VaultError::Policy("username must not be empty".into()));
        }

        let password_key = self.password_key(username, password)?;
        let location = identity_location(&password_key);

        let identity = match self.store.get(&location)? {
            Some(blob) => Identity::open(&password_key, username, &blob)?,
            None => {
                if self.directory.lookup(&encryption_label(username))?.is_some()
                    || self.directory.lookup(&verification_label(username))?.is_some()
                {
                    return Err(already_registered(username));
                }
                let identity = Identity::generate(username);
                self.store.put(&location, &identity.seal(&password_key)?)?;
                identity
            }
        };

        let published = self.publish_missing(&identity)?;
        if published == 0 {
            return Err(already_registered(username));
        }

        tracing::debug!(username, published, "registered user");
        Ok(self.session(identity))
    }

    /// Log in an existing user.
    ///
    /// An unknown username, a wrong password and a tampered identity record
    /// all fail with the same `Authentication` error.
    pub fn login(&self, username: &str, password: &str) -> Result<Session<B, D>> {
        let password_key = self.password_key(username, password)?;
        let location = identity_location(&password_key);

        let blob = self
            .store
            .get(&location)?
            .ok_or_else(Self::bad_credentials)?;
        let identity = Identity::open(&password_key, username, &blob).map_err(|e| match e {
            VaultError::Integrity => {
                tracing::warn!(username, "identity record failed verification");
                Self::bad_credentials()
            }
            other => other,
        })?;

        tracing::debug!(username, "logged in");
        Ok(self.session(identity))
    }

    fn password_key(&self, username: &str, password: &str) -> Result<SecretKey> {
        Ok(derive_password_key(
            password,
            &pseudonym(username),
            &self.config.kdf,
        )?)
    }

    /// Publish each of the identity's public keys not yet in the directory.
    ///
    /// A label already holding this identity's key is skipped; one holding
    /// any other key is a `Policy` error. Returns how many were published.
    fn publish_missing(&self, identity: &Identity) -> Result<usize> {
        let username = identity.username();
        let entries = [
            (encryption_label(username), identity.encryption_key().as_bytes().to_vec()),
            (verification_label(username), identity.verification_key().as_bytes().to_vec()),
        ];

        let mut published = 0;
        for (label, key) in &entries {
            match self.directory.lookup(label)? {
                Some(existing) if existing == *key => continue,
                Some(_) => {
                    return Err(VaultError::Policy(format!(
                        "directory label {} already taken",
                        label
                    )))
                }
                None => {}
            }
            self.directory.publish(label, key).map_err(|e| match e {
                StoreError::LabelTaken(label) => {
                    VaultError::Policy(format!("directory label {} already taken", label))
                }
                other => other.into(),
            })?;
            published += 1;
        }
        Ok(published)
    }

    fn session(&self, identity: Identity) -> Session<B, D> {
        Session::new(
            Arc::clone(&self.store),
            Arc::clone(&self.directory),
            identity,
            self.config.revoked_grants(),
        )
    }

    fn bad_credentials() -> VaultError {
        VaultError::Authentication("invalid username or password".into())
    }
}

fn already_registered(username: &str) -> VaultError {
    VaultError::Policy(format!("{} is already registered", username))
}
