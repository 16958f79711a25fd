//! # Strongbox Core
//!
//! Pure primitives for Strongbox: storage identifiers, symmetric and
//! signing keys, the sealed envelope, and password-hardened key derivation.
//!
//! This crate contains no I/O, no storage, no networking. Everything that
//! touches the untrusted blob store goes through [`envelope::seal`] and
//! [`envelope::open`], and every location is either random or produced by
//! [`SecretKey::derive_id`].
//!
//! ## Key Types
//!
//! - [`BlobId`] - 128-bit identifier of a blob in the store
//! - [`SecretKey`] - 256-bit symmetric secret, zeroized on drop
//! - [`Keypair`] - Ed25519 signing key
//! - [`KdfParams`] - Argon2id cost parameters
//!
//! ## Envelope Layout
//!
//! ```text
//! MAC (32) || nonce (12) || ChaCha20-Poly1305 ciphertext
//! ```
//!
//! The MAC is a BLAKE3 keyed hash over `nonce || ciphertext` under a MAC
//! sub-key; the cipher runs under an independent encryption sub-key. Both
//! sub-keys are derived from the caller's key.

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod types;

pub use crypto::{Blake3Hash, Ed25519PublicKey, Ed25519Signature, Keypair, SecretKey};
pub use envelope::{open, open_value, seal, seal_value};
pub use error::{CoreError, Result};
pub use kdf::{derive_password_key, pseudonym, KdfParams};
pub use types::BlobId;
