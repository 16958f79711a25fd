//! Delegation maps: whom each access secret's holder has invited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use strongbox_core::{open_value, seal_value, BlobId};
use strongbox_files::AccessSecret;
use strongbox_store::BlobStore;

use crate::error::{Result, ShareError};

/// Label under which an access secret's delegation map is stored.
pub const DELEGATIONS_LABEL: &str = "delegations";

/// One edge of the delegation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    /// The secret minted for the recipient.
    pub secret: AccessSecret,
    /// Set once the grant has been revoked. Revoked grants are never
    /// re-keyed again.
    pub revoked: bool,
}

/// Recipient username to grant, for a single access secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelegationMap {
    grants: BTreeMap<String, Grant>,
}

impl DelegationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the map for `secret` is stored.
    pub fn location(secret: &AccessSecret) -> BlobId {
        secret.derive_location(DELEGATIONS_LABEL)
    }

    /// Read the map belonging to `secret`.
    pub fn load<B: BlobStore + ?Sized>(store: &B, secret: &AccessSecret) -> Result<Self> {
        let location = Self::location(secret);
        let blob = store
            .get(&location)?
            .ok_or_else(|| ShareError::NotFound(format!("delegation map {}", location)))?;
        Ok(open_value(secret.key(), &blob)?)
    }

    pub fn save<B: BlobStore + ?Sized>(&self, store: &B, secret: &AccessSecret) -> Result<()> {
        store.put(&Self::location(secret), &seal_value(secret.key(), self)?)?;
        Ok(())
    }

    /// Record a new grant, replacing any earlier grant to the same user.
    pub fn insert(&mut self, recipient: &str, secret: AccessSecret) {
        self.grants.insert(
            recipient.to_owned(),
            Grant {
                secret,
                revoked: false,
            },
        );
    }

    pub fn get(&self, recipient: &str) -> Option<&Grant> {
        self.grants.get(recipient)
    }

    /// Flag a grant as revoked, keeping the entry. Returns false if absent.
    pub fn mark_revoked(&mut self, recipient: &str) -> bool {
        match self.grants.get_mut(recipient) {
            Some(grant) => {
                grant.revoked = true;
                true
            }
            None => false,
        }
    }

    /// Drop a grant entirely.
    pub fn remove(&mut self, recipient: &str) -> Option<Grant> {
        self.grants.remove(recipient)
    }

    /// Grants that have not been revoked, in username order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &AccessSecret)> {
        self.grants
            .iter()
            .filter(|(_, grant)| !grant.revoked)
            .map(|(name, grant)| (name.as_str(), &grant.secret))
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
