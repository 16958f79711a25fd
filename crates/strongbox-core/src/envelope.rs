//! The sealed envelope: authenticated encryption for everything persisted.
//!
//! `seal` derives an encryption sub-key and a MAC sub-key from the caller's
//! key, encrypts under a fresh random nonce, and prefixes a BLAKE3 keyed
//! MAC over `nonce || ciphertext`. `open` checks the MAC in constant time
//! before it touches the ciphertext.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};

use crate::crypto::SecretKey;
use crate::error::{CoreError, Result};

/// Length of the MAC prefix.
pub const MAC_LEN: usize = 32;

/// Length of the cipher nonce.
pub const NONCE_LEN: usize = 12;

/// Length of the Poly1305 tag appended by the cipher.
pub const TAG_LEN: usize = 16;

/// Bytes added by `seal` on top of the plaintext length.
pub const OVERHEAD: usize = MAC_LEN + NONCE_LEN + TAG_LEN;

const ENCRYPTION_CONTEXT: &str = "strongbox v1 envelope encryption key";
const MAC_CONTEXT: &str = "strongbox v1 envelope mac key";

/// Encrypt and authenticate `plaintext` under `key`.
pub fn seal(key: &SecretKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let enc_key = key.derive_subkey(ENCRYPTION_CONTEXT);
    let mac_key = key.derive_subkey(MAC_CONTEXT);

    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let cipher = ChaCha20Poly1305::new_from_slice(enc_key.as_bytes())
        .map_err(|e| CoreError::Encryption(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CoreError::Encryption(e.to_string()))?;

    let mac = compute_mac(&mac_key, &nonce, &ciphertext);

    let mut blob = Vec::with_capacity(MAC_LEN + NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(mac.as_bytes());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Verify and decrypt a blob produced by [`seal`].
///
/// Any failure, including a blob too short to hold a MAC, nonce and tag,
/// is reported as [`CoreError::Integrity`].
pub fn open(key: &SecretKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < OVERHEAD {
        return Err(CoreError::Integrity);
    }

    let (mac_bytes, rest) = blob.split_at(MAC_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let mac_key = key.derive_subkey(MAC_CONTEXT);
    let expected = compute_mac(&mac_key, nonce, ciphertext);

    let mut received = [0u8; MAC_LEN];
    received.copy_from_slice(mac_bytes);
    // blake3::Hash equality is constant-time.
    if expected != blake3::Hash::from(received) {
        return Err(CoreError::Integrity);
    }

    let enc_key = key.derive_subkey(ENCRYPTION_CONTEXT);
    let cipher = ChaCha20Poly1305::new_from_slice(enc_key.as_bytes())
        .map_err(|_| CoreError::Integrity)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CoreError::Integrity)
}

/// Encode `value` as CBOR and seal it.
pub fn seal_value<T: Serialize>(key: &SecretKey, value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CoreError::Encoding(e.to_string()))?;
    seal(key, &buf)
}

/// Open a blob and decode its CBOR contents.
///
/// A plaintext that authenticates but does not decode is treated as an
/// integrity failure.
pub fn open_value<T: DeserializeOwned>(key: &SecretKey, blob: &[u8]) -> Result<T> {
    let plaintext = open(key, blob)?;
    ciborium::from_reader(plaintext.as_slice()).map_err(|_| CoreError::Integrity)
}

fn compute_mac(mac_key: &SecretKey, nonce: &[u8], ciphertext: &[u8]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_keyed(mac_key.as_bytes());
    hasher.update(nonce);
    hasher.update(ciphertext);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[test]
    fn test_seal_open_roundtrip() {
        let key = SecretKey::generate();
        let blob = seal(&key, b"hello, sealed world!").unwrap();

        assert_eq!(blob.len(), OVERHEAD + 20);
        assert_eq!(open(&key, &blob).unwrap(), b"hello, sealed world!");
    }

    #[test]
    fn test_seal_uses_fresh_nonce() {
        let key = SecretKey::generate();
        let a = seal(&key, b"same").unwrap();
        let b = seal(&key, b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = SecretKey::generate();
        let key2 = SecretKey::generate();
        let blob = seal(&key1, b"secret").unwrap();

        assert!(matches!(open(&key2, &blob), Err(CoreError::Integrity)));
    }

    #[test]
    fn test_truncated_blob_fails() {
        let key = SecretKey::generate();
        let blob = seal(&key, b"secret").unwrap();

        assert!(matches!(open(&key, &blob[..OVERHEAD - 1]), Err(CoreError::Integrity)));
        assert!(matches!(open(&key, &[]), Err(CoreError::Integrity)));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = SecretKey::generate();
        let blob = seal(&key, b"").unwrap();
        assert_eq!(blob.len(), OVERHEAD);
        assert!(open(&key, &blob).unwrap().is_empty());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    }

    #[test]
    fn test_value_roundtrip() {
        let key = SecretKey::generate();
        let record = Record {
            name: "notes.txt".to_string(),
            data: vec![1, 2, 3],
        };

        let blob = seal_value(&key, &record).unwrap();
        let recovered: Record = open_value(&key, &blob).unwrap();
        assert_eq!(recovered, record);
    }

    #[test]
    fn test_authentic_garbage_is_integrity_error() {
        let key = SecretKey::generate();
        let blob = seal(&key, &[0xff, 0xff, 0xff]).unwrap();
        let result: Result<Record> = open_value(&key, &blob);
        assert!(matches!(result, Err(CoreError::Integrity)));
    }

    proptest! {
        #[test]
        fn prop_any_bit_flip_is_detected(
            plaintext in prop::collection::vec(any::<u8>(), 0..256),
            position in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let key = SecretKey::generate();
            let mut blob = seal(&key, &plaintext).unwrap();
            let i = position.index(blob.len());
            blob[i] ^= 1 << bit;

            prop_assert!(matches!(open(&key, &blob), Err(CoreError::Integrity)));
        }

        #[test]
        fn prop_roundtrip(plaintext in prop::collection::vec(any::<u8>(), 0..1024)) {
            let key = SecretKey::generate();
            let blob = seal(&key, &plaintext).unwrap();
            prop_assert_eq!(open(&key, &blob).unwrap(), plaintext);
        }
    }
}
