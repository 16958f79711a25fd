//! # Strongbox
//!
//! Encrypted file storage and revocable sharing over a blob store that sees
//! everything and is trusted with nothing.
//!
//! ## Overview
//!
//! - **Register / login**: every key a user owns is recovered from their
//!   username and password. The public halves are published once to a
//!   write-once key directory.
//! - **Store / append / load**: files are chains of sealed chunks. An
//!   append costs only the bytes appended.
//! - **Invite / accept / revoke**: access is granted with signed, sealed
//!   tokens and withdrawn by re-keying the file for everyone except the
//!   revoked branch.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use strongbox::{MemoryBlobStore, MemoryDirectory, Vault, VaultConfig};
//!
//! fn example() -> strongbox::Result<()> {
//!     let vault = Vault::new(MemoryBlobStore::new(), MemoryDirectory::new(), VaultConfig::default())?;
//!
//!     let alice = vault.register("alice", "correct horse")?;
//!     let bob = vault.register("bob", "battery staple")?;
//!
//!     alice.store_file("notes.txt", b"hello")?;
//!     alice.append_to_file("notes.txt", b", world")?;
//!
//!     let token = alice.create_invitation("notes.txt", "bob")?;
//!     bob.accept_invitation("alice", &token, "from-alice.txt")?;
//!     assert_eq!(bob.load_file("from-alice.txt")?, b"hello, world");
//!
//!     alice.revoke_access("notes.txt", "bob")?;
//!     assert!(bob.load_file("from-alice.txt").is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `strongbox::core` - identifiers, keys, the sealed envelope, password KDF
//! - `strongbox::store` - blob store and key directory traits and backends
//! - `strongbox::files` - handles, chunk chains, name bindings
//! - `strongbox::share` - invitations, delegation maps, revocation

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod vault;

pub use strongbox_core as core;
pub use strongbox_files as files;
pub use strongbox_share as share;
pub use strongbox_store as store;

pub use config::VaultConfig;
pub use error::{ErrorKind, Result, VaultError};
pub use identity::Identity;
pub use session::Session;
pub use vault::Vault;

pub use strongbox_core::{BlobId, Ed25519PublicKey, KdfParams};
pub use strongbox_share::{RevocationReport, X25519PublicKey};
pub use strongbox_store::{BlobStore, KeyDirectory, MemoryBlobStore, MemoryDirectory, SqliteStore};
