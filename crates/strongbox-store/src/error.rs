//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store and directory operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A directory label was already published.
    #[error("directory label already taken: {0}")]
    LabelTaken(String),

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("backend lock poisoned: {0}")]
    Poisoned(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
