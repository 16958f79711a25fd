//! Password-hardened key derivation.
//!
//! The password key is Argon2id over the password, salted with the
//! username's pseudonym. Binding the salt to the username means one
//! precomputed dictionary cannot be reused across users.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::crypto::{Blake3Hash, SecretKey};
use crate::error::{CoreError, Result};

/// Argon2id cost parameters.
///
/// These are part of the persisted-data contract: changing them relocates
/// every identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub mem_cost_kib: u32,
    /// Number of passes.
    pub time_cost: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Check the parameters against Argon2's limits without deriving.
    pub fn validate(&self) -> Result<()> {
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(&self) -> Result<Params> {
        Params::new(
            self.mem_cost_kib,
            self.time_cost,
            self.parallelism,
            Some(SecretKey::LEN),
        )
        .map_err(|e| CoreError::Kdf(format!("invalid Argon2id params: {e}")))
    }
}

/// The stable pseudonym of a username: `BLAKE3(username)`.
pub fn pseudonym(username: &str) -> Blake3Hash {
    Blake3Hash::hash(username.as_bytes())
}

/// Derive the 256-bit password key for a user.
pub fn derive_password_key(
    password: &str,
    salt: &Blake3Hash,
    params: &KdfParams,
) -> Result<SecretKey> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

    let mut key = [0u8; SecretKey::LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut key)
        .map_err(|e| CoreError::Kdf(format!("Argon2id failed: {e}")))?;

    Ok(SecretKey::from_bytes(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: KdfParams = KdfParams {
        mem_cost_kib: 64,
        time_cost: 1,
        parallelism: 1,
    };

    #[test]
    fn test_kdf_deterministic() {
        let salt = pseudonym("alice");
        let k1 = derive_password_key("hunter2", &salt, &FAST).unwrap();
        let k2 = derive_password_key("hunter2", &salt, &FAST).unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_kdf_different_passwords() {
        let salt = pseudonym("alice");
        let k1 = derive_password_key("password-a", &salt, &FAST).unwrap();
        let k2 = derive_password_key("password-b", &salt, &FAST).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_kdf_salt_bound_to_username() {
        let k1 = derive_password_key("same", &pseudonym("alice"), &FAST).unwrap();
        let k2 = derive_password_key("same", &pseudonym("bob"), &FAST).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = KdfParams {
            mem_cost_kib: 1,
            time_cost: 0,
            parallelism: 1,
        };
        assert!(params.validate().is_err());
        assert!(matches!(
            derive_password_key("pw", &pseudonym("alice"), &params),
            Err(CoreError::Kdf(_))
        ));
    }

    #[test]
    fn test_default_params_valid() {
        KdfParams::default().validate().unwrap();
    }

    #[test]
    fn test_params_from_json() {
        let params: KdfParams =
            serde_json::from_str(r#"{"mem_cost_kib":64,"time_cost":1,"parallelism":1}"#).unwrap();
        assert_eq!(params, FAST);
    }
}
