//! # Strongbox Share
//!
//! Sharing and revocation on top of the file access layer.
//!
//! ## Overview
//!
//! Access to a file is a tree of [`AccessSecret`]s. The creator holds the
//! root; every invitation mints a new secret for the recipient whose
//! handle is a copy of the inviter's, and records it in the inviter's
//! [`DelegationMap`]. Invitations travel as signed, sealed tokens at random
//! store locations.
//!
//! Revocation cannot rely on anyone deleting a secret they already hold.
//! Instead the revoker re-encrypts the file under a fresh chunk key and
//! tail slot, deletes the old chain, and rewrites the handle of every
//! active grant below itself. The revoked branch is left pointing at a
//! chain that no longer exists.
//!
//! [`AccessSecret`]: strongbox_files::AccessSecret

pub mod crypto;
pub mod delegation;
pub mod error;
pub mod exchange;
pub mod invitation;
pub mod revocation;

pub use crypto::{SealedBox, X25519PublicKey, X25519StaticSecret};
pub use delegation::{DelegationMap, Grant};
pub use error::{Result, ShareError};
pub use exchange::{accept_invitation, create_invitation};
pub use invitation::Invitation;
pub use revocation::{revoke, RevocationReport, RevokedGrants};
