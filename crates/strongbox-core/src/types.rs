//! Strong type definitions for Strongbox.
//!
//! Blob identifiers are newtypes to prevent mixing them up with key
//! material at compile time.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit blob identifier.
///
/// Every identifier is either drawn from a CSPRNG ([`BlobId::random`]) or
/// derived with [`crate::SecretKey::derive_id`]. Identifiers are never built
/// from user input directly, so an adversary cannot choose collisions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobId(#[serde(with = "serde_bytes")] pub [u8; 16]);

impl BlobId {
    /// Length of an identifier in bytes.
    pub const LEN: usize = 16;

    /// The nil identifier. Used as the back-pointer of the oldest chunk.
    pub const NIL: Self = Self([0u8; 16]);

    /// Create a new BlobId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh identifier from the thread-local CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Whether this is the nil sentinel.
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != Self::LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for BlobId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for BlobId {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for BlobId {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 16] = slice.try_into()?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_id_hex_roundtrip() {
        let id = BlobId::from_bytes([0x42; 16]);
        let recovered = BlobId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_blob_id_rejects_wrong_length() {
        assert!(BlobId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_random_ids_differ_from_nil() {
        let a = BlobId::random();
        let b = BlobId::random();
        assert_ne!(a, b);
        assert!(!a.is_nil());
        assert!(BlobId::NIL.is_nil());
    }

    #[test]
    fn test_blob_id_debug() {
        let id = BlobId::from_bytes([0xcd; 16]);
        assert_eq!(format!("{:?}", id), "BlobId(cdcdcdcdcdcd)");
    }

    #[test]
    fn test_cbor_size_independent_of_value() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        ciborium::into_writer(&BlobId::NIL, &mut a).unwrap();
        ciborium::into_writer(&BlobId::from_bytes([0xff; 16]), &mut b).unwrap();
        assert_eq!(a.len(), b.len());
    }
}
