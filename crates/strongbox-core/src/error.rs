//! Error types for Strongbox Core.

use thiserror::Error;

/// Errors produced by the core primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// MAC verification failed, the blob was truncated, or a verified
    /// plaintext did not decode. Never accompanied by partial plaintext.
    #[error("integrity check failed")]
    Integrity,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Password key derivation rejected its parameters or inputs.
    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
