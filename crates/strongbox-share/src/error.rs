//! Error types for sharing and revocation.

use strongbox_core::CoreError;
use strongbox_files::FilesError;
use strongbox_store::StoreError;
use thiserror::Error;

/// Errors that can occur while inviting, accepting or revoking.
#[derive(Debug, Error)]
pub enum ShareError {
    /// A token, handle, delegation map or chain is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A token's signature or sealed secret did not verify.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The operation is not allowed in the current state.
    #[error("policy violation: {0}")]
    Policy(String),

    /// A stored blob failed authentication.
    #[error("integrity check failed")]
    Integrity,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("core error: {0}")]
    Core(CoreError),
}

impl From<CoreError> for ShareError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Integrity => ShareError::Integrity,
            other => ShareError::Core(other),
        }
    }
}

impl From<FilesError> for ShareError {
    fn from(e: FilesError) -> Self {
        match e {
            FilesError::NotFound(what) => ShareError::NotFound(what),
            FilesError::Integrity => ShareError::Integrity,
            FilesError::Store(e) => ShareError::Store(e),
            FilesError::Core(e) => ShareError::Core(e),
        }
    }
}

/// Result type for sharing operations.
pub type Result<T> = std::result::Result<T, ShareError>;
