//! Error types for the file access layer.

use strongbox_core::CoreError;
use strongbox_store::StoreError;
use thiserror::Error;

/// Errors that can occur while reading or writing file structures.
#[derive(Debug, Error)]
pub enum FilesError {
    /// A binding, handle, tail slot or chunk is missing from the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored blob failed authentication.
    #[error("integrity check failed")]
    Integrity,

    /// Backend failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Other core error (encoding, key material).
    #[error("core error: {0}")]
    Core(CoreError),
}

impl From<CoreError> for FilesError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Integrity => FilesError::Integrity,
            other => FilesError::Core(other),
        }
    }
}

/// Result type for file access operations.
pub type Result<T> = std::result::Result<T, FilesError>;
