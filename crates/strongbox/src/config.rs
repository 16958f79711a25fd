//! Vault configuration.

use serde::{Deserialize, Serialize};

use strongbox_core::KdfParams;
use strongbox_share::RevokedGrants;

use crate::error::{Result, VaultError};

/// Configuration shared by every session opened through a vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Argon2id cost for the password key.
    pub kdf: KdfParams,
    /// Remove revoked grants from delegation maps instead of flagging them.
    pub prune_revoked_grants: bool,
}

impl VaultConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VaultError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.kdf
            .validate()
            .map_err(|e| VaultError::Config(e.to_string()))
    }

    pub(crate) fn revoked_grants(&self) -> RevokedGrants {
        if self.prune_revoked_grants {
            RevokedGrants::Prune
        } else {
            RevokedGrants::Retain
        }
    }
}
