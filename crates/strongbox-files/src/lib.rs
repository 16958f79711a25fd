//! # Strongbox Files
//!
//! The file access layer: maps a user-local filename to a versioned,
//! appendable byte sequence through an indirection object, the [`Handle`].
//!
//! ## Layout in the Store
//!
//! ```text
//! DeriveId(rootKey, filename)      --seal(rootKey)-->      AccessSecret
//! DeriveId(accessSecret, "handle") --seal(accessSecret)--> Handle { tailSlot, chunkKey }
//! tailSlot                         --seal(chunkKey)-->     newest chunk id
//! chunk id                         --seal(chunkKey)-->     Chunk { content, prev }
//! ```
//!
//! Chunks form a backward linked list ending at [`BlobId::NIL`]. Appending
//! writes one chunk and rewrites the tail slot, so the cost of an append is
//! a function of the appended bytes only.
//!
//! There is no access check anywhere in this crate: a holder either can
//! derive and open the blobs above, or gets [`FilesError::NotFound`].
//!
//! [`BlobId::NIL`]: strongbox_core::BlobId::NIL

pub mod binding;
pub mod chain;
pub mod error;
pub mod handle;
mod sealed;
pub mod secret;

pub use binding::NameBindings;
pub use chain::{Chain, ChainContents, Chunk};
pub use error::{FilesError, Result};
pub use handle::Handle;
pub use secret::AccessSecret;
