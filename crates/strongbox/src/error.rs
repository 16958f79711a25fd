//! Error types for the client API.

use strongbox_core::CoreError;
use strongbox_files::FilesError;
use strongbox_share::ShareError;
use strongbox_store::StoreError;
use thiserror::Error;

/// Coarse classification of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad credentials, or a token that did not verify or decrypt.
    Authentication,
    /// A stored blob was modified.
    Integrity,
    /// Something the operation needed is absent, including access that
    /// has been revoked.
    NotFound,
    /// The request conflicts with existing state.
    Policy,
    /// The backend failed.
    Store,
    /// The vault configuration is unusable.
    Config,
    /// Local key material was malformed or a value failed to encode.
    /// Raised on the write path too, so it says nothing about the store.
    Crypto,
}

/// Errors returned by [`Vault`](crate::Vault) and [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("integrity check failed")]
    Integrity,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("policy violation: {0}")]
    Policy(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed key material or an encoding failure.
    #[error("crypto error: {0}")]
    Crypto(CoreError),
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Authentication(_) => ErrorKind::Authentication,
            VaultError::Integrity => ErrorKind::Integrity,
            VaultError::NotFound(_) => ErrorKind::NotFound,
            VaultError::Policy(_) => ErrorKind::Policy,
            VaultError::Store(_) => ErrorKind::Store,
            VaultError::Config(_) => ErrorKind::Config,
            VaultError::Crypto(_) => ErrorKind::Crypto,
        }
    }
}

impl From<CoreError> for VaultError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Integrity => VaultError::Integrity,
            CoreError::Kdf(msg) => VaultError::Config(msg),
            CoreError::InvalidSignature | CoreError::InvalidPublicKey => {
                VaultError::Authentication(e.to_string())
            }
            other => VaultError::Crypto(other),
        }
    }
}

impl From<FilesError> for VaultError {
    fn from(e: FilesError) -> Self {
        match e {
            FilesError::NotFound(what) => VaultError::NotFound(what),
            FilesError::Integrity => VaultError::Integrity,
            FilesError::Store(e) => VaultError::Store(e),
            FilesError::Core(e) => e.into(),
        }
    }
}

impl From<ShareError> for VaultError {
    fn from(e: ShareError) -> Self {
        match e {
            ShareError::NotFound(what) => VaultError::NotFound(what),
            ShareError::Authentication(why) => VaultError::Authentication(why),
            ShareError::Policy(why) => VaultError::Policy(why),
            ShareError::Integrity => VaultError::Integrity,
            ShareError::Store(e) => VaultError::Store(e),
            ShareError::Core(e) => e.into(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_layer_errors() {
        let cases: Vec<(VaultError, ErrorKind)> = vec![
            (FilesError::NotFound("x".into()).into(), ErrorKind::NotFound),
            (FilesError::Integrity.into(), ErrorKind::Integrity),
            (ShareError::Policy("x".into()).into(), ErrorKind::Policy),
            (
                ShareError::Authentication("x".into()).into(),
                ErrorKind::Authentication,
            ),
            (CoreError::Kdf("bad".into()).into(), ErrorKind::Config),
            (CoreError::InvalidSignature.into(), ErrorKind::Authentication),
            (CoreError::Integrity.into(), ErrorKind::Integrity),
            (CoreError::Encoding("cbor".into()).into(), ErrorKind::Crypto),
            (
                FilesError::Core(CoreError::InvalidKey("short".into())).into(),
                ErrorKind::Crypto,
            ),
            (
                StoreError::LabelTaken("alice/encryption".into()).into(),
                ErrorKind::Store,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{}", err);
        }
    }
}
