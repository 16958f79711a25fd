//! Signed invitation tokens.
//!
//! Token layout in the store:
//!
//! ```text
//! Ed25519 signature (64) || CBOR(SealedBox { ephemeral_public, nonce, ciphertext })
//! ```
//!
//! The signature covers the encoded sealed box. The recipient checks it
//! against the sender's published verification key before decrypting.

use strongbox_core::{CoreError, Ed25519PublicKey, Ed25519Signature, Keypair, SecretKey};
use strongbox_files::AccessSecret;

use crate::crypto::{SealedBox, X25519PublicKey, X25519StaticSecret};
use crate::error::{Result, ShareError};

/// An access secret, encrypted to one recipient and signed by the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    signature: Ed25519Signature,
    sealed: Vec<u8>,
}

impl Invitation {
    /// Encrypt `secret` to `recipient` and sign the result.
    pub fn create(
        secret: &AccessSecret,
        recipient: &X25519PublicKey,
        signer: &Keypair,
    ) -> Result<Self> {
        let sealed_box = SealedBox::seal(secret.key().as_bytes(), recipient)?;
        let mut sealed = Vec::new();
        ciborium::into_writer(&sealed_box, &mut sealed)
            .map_err(|e| ShareError::Core(CoreError::Encoding(e.to_string())))?;
        let signature = signer.sign(&sealed);
        Ok(Self { signature, sealed })
    }

    /// Verify the sender's signature, then decrypt the secret.
    ///
    /// Either failure is `Authentication`.
    pub fn open(
        &self,
        sender: &Ed25519PublicKey,
        recipient: &X25519StaticSecret,
    ) -> Result<AccessSecret> {
        sender
            .verify(&self.sealed, &self.signature)
            .map_err(|_| ShareError::Authentication("invitation signature mismatch".into()))?;

        let sealed_box: SealedBox = ciborium::from_reader(self.sealed.as_slice())
            .map_err(|_| ShareError::Authentication("malformed invitation".into()))?;
        let plaintext = sealed_box.open(recipient)?;
        let key = SecretKey::from_slice(&plaintext)
            .map_err(|_| ShareError::Authentication("malformed access secret".into()))?;
        Ok(AccessSecret::from_key(key))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Ed25519Signature::LEN + self.sealed.len());
        out.extend_from_slice(self.signature.as_bytes());
        out.extend_from_slice(&self.sealed);
        out
    }

    /// Split a stored token. A token too short to hold a signature cannot
    /// be authenticated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() <= Ed25519Signature::LEN {
            return Err(ShareError::Authentication("invitation token truncated".into()));
        }
        let (sig, sealed) = bytes.split_at(Ed25519Signature::LEN);
        let signature = Ed25519Signature::try_from(sig)
            .map_err(|_| ShareError::Authentication("invitation token truncated".into()))?;
        Ok(Self {
            signature,
            sealed: sealed.to_vec(),
        })
    }
}
