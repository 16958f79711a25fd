//! # Strongbox Testkit
//!
//! Testing utilities for Strongbox.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Derivation vectors**: fixed inputs and outputs for every derived
//!   location and sub-key, so a change to the persisted-data contract is
//!   caught immediately
//! - **Generators**: proptest strategies for usernames, filenames and
//!   content
//! - **Fixtures**: in-memory vaults with cheap KDF parameters and helpers
//!   for tampering with stored blobs
//!
//! ## Derivation Vectors
//!
//! ```rust
//! use strongbox_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use strongbox_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let alice = fixture.user("alice");
//! alice.store_file("notes.txt", b"hello").unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fast_config, flip_bit, TestFixture, FAST_KDF};
pub use generators::{content, content_parts, filename, username};
pub use vectors::{all_vectors, verify_all_vectors, DerivationVector};
