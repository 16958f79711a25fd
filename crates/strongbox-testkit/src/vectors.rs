//! Derivation vectors for the persisted-data contract.
//!
//! Every location a client reads is derived, not stored. If any of these
//! change, existing stores become unreadable, so they are pinned here.

use strongbox_core::{pseudonym, SecretKey};

/// What a vector derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// `BLAKE3(username)`.
    Pseudonym,
    /// `DeriveId(key, label)`, 16 bytes.
    BlobId,
    /// `derive_key(context, key)`, 32 bytes.
    SubKey,
}

/// A single derivation vector.
#[derive(Debug, Clone)]
pub struct DerivationVector {
    pub name: &'static str,
    pub derivation: Derivation,
    /// Key bytes, all set to this value. Unused for pseudonyms.
    pub key_byte: u8,
    /// Label, context string or username.
    pub input: &'static str,
    /// Expected output (hex).
    pub expected: &'static str,
}

impl DerivationVector {
    /// Compute this vector's output (hex).
    pub fn compute(&self) -> String {
        let key = SecretKey::from_bytes([self.key_byte; 32]);
        match self.derivation {
            Derivation::Pseudonym => pseudonym(self.input).to_hex(),
            Derivation::BlobId => key.derive_id(self.input).to_hex(),
            Derivation::SubKey => hex::encode(key.derive_subkey(self.input).as_bytes()),
        }
    }
}

/// Get all derivation vectors.
pub fn all_vectors() -> Vec<DerivationVector> {
    vec![
        DerivationVector {
            name: "pseudonym of alice",
            derivation: Derivation::Pseudonym,
            key_byte: 0,
            input: "alice",
            expected: "71b278f3dc434447fc620500e47b6a80b0cb0df76a1051119fe19ed4953242df",
        },
        DerivationVector {
            name: "pseudonym of bob",
            derivation: Derivation::Pseudonym,
            key_byte: 0,
            input: "bob",
            expected: "e476f1b379438de7a1acfd567a94a8c53f08b9714042f7f17e5791645afc3176",
        },
        DerivationVector {
            name: "pseudonym of empty username",
            derivation: Derivation::Pseudonym,
            key_byte: 0,
            input: "",
            expected: "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        },
        DerivationVector {
            name: "identity location",
            derivation: Derivation::BlobId,
            key_byte: 0x00,
            input: "identity",
            expected: "65652bf7690ebb4d944a8922f7b0d59c",
        },
        DerivationVector {
            name: "handle location",
            derivation: Derivation::BlobId,
            key_byte: 0x42,
            input: "handle",
            expected: "bbfbdd7de075faea7dfdccfbed2d91bb",
        },
        DerivationVector {
            name: "delegation map location",
            derivation: Derivation::BlobId,
            key_byte: 0x42,
            input: "delegations",
            expected: "108bfc20abd11055a1a49cf5b2beddce",
        },
        DerivationVector {
            name: "name binding location",
            derivation: Derivation::BlobId,
            key_byte: 0x07,
            input: "notes.txt",
            expected: "8f3df1bd90590484e86f44f54b138b20",
        },
        DerivationVector {
            name: "name binding for empty filename",
            derivation: Derivation::BlobId,
            key_byte: 0x07,
            input: "",
            expected: "2e68de3d3569ad8eb764ca87af476ec5",
        },
        DerivationVector {
            name: "envelope encryption sub-key",
            derivation: Derivation::SubKey,
            key_byte: 0x42,
            input: "strongbox v1 envelope encryption key",
            expected: "47eb2aa6d4b276af65f131c65ac6d2d3f9816465cbbb78b46d56d895ce376989",
        },
        DerivationVector {
            name: "envelope MAC sub-key",
            derivation: Derivation::SubKey,
            key_byte: 0x42,
            input: "strongbox v1 envelope mac key",
            expected: "a954820a9bb5be908145d2abe1233fa21f88b0882b3945502e9f58f2c2506d23",
        },
    ]
}

/// Check every vector, returning the names of those that do not match.
pub fn verify_all_vectors() -> Result<(), Vec<String>> {
    let failures: Vec<String> = all_vectors()
        .iter()
        .filter_map(|v| {
            let actual = v.compute();
            (actual != v.expected).then(|| format!("{}: expected {}, got {}", v.name, v.expected, actual))
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}
