//! # Strongbox Store
//!
//! The two untrusted collaborators Strongbox runs on top of, expressed as
//! traits with simple atomic verbs:
//!
//! - [`BlobStore`] - a key-value store of opaque blobs addressed by
//!   128-bit [`BlobId`](strongbox_core::BlobId)s: `put`, `get`, `delete`
//! - [`KeyDirectory`] - a public, write-once map from labels to public
//!   keys: `publish`, `lookup`
//!
//! Two backends are provided: [`MemoryBlobStore`] / [`MemoryDirectory`]
//! for tests (with write accounting), and [`SqliteStore`], which implements
//! both traits over a single SQLite database.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strongbox_core::BlobId;
//! use strongbox_store::{BlobStore, KeyDirectory, SqliteStore};
//!
//! let store = SqliteStore::open("strongbox.db").unwrap();
//!
//! let id = BlobId::random();
//! store.put(&id, b"opaque bytes").unwrap();
//! assert!(store.get(&id).unwrap().is_some());
//!
//! store.publish("alice/verification", &[0u8; 32]).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Last write wins**: `put` overwrites unconditionally.
//! - **Idempotent delete**: deleting a missing blob is not an error.
//! - **First publish wins**: a taken directory label returns `LabelTaken`.
//! - **No trust**: backends see only sealed bytes and random-looking ids.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{MemoryBlobStore, MemoryDirectory};
pub use sqlite::SqliteStore;
pub use traits::{BlobStore, KeyDirectory};
