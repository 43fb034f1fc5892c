// ============================================
// File: crates/tessera-core/src/crypto/digest.rs
// ============================================
//! # Payload Digests
//!
//! ## Creation Reason
//! Transaction hashes are a digest of the payload cipher text. Nodes
//! that predate SHA3 use SHA-512/256, so the digest is pluggable.
//!
//! ## Main Functionality
//! - `PayloadDigest`: Digest capability
//! - `Sha3Digest` (default, 64 bytes) and `Sha512_256Digest` (legacy, 32 bytes)
//! - `DigestAlgorithm`: Config-facing selector
//! - `sha3_512` / `keccak256`: Free helpers used by the enclave and
//!   the privacy group id
//!
//! ## ⚠️ Important Note for Next Developer
//! - SHA3-512 and Keccak-256 differ in padding; do not swap them
//! - Changing the default digest changes every transaction hash
//!
//! ## Last Modified
//! v0.1.0 - Initial digest implementations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};
use tiny_keccak::{Hasher, Keccak, Sha3};

use tessera_common::CommonError;

use crate::error::{CoreError, Result};
use crate::payload::{EncodedPayload, TxHash};

// ============================================
// Hash Helpers
// ============================================

/// SHA3-512 of the concatenation of `parts`.
#[must_use]
pub fn sha3_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha3::v512();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 64];
    hasher.finalize(&mut output);
    output
}

/// Keccak-256 (pre-standard SHA3 padding) of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

// ============================================
// PayloadDigest Trait
// ============================================

/// Content hash applied to payload cipher texts.
pub trait PayloadDigest: Send + Sync {
    /// Hashes `cipher_text`.
    fn digest(&self, cipher_text: &[u8]) -> Vec<u8>;

    /// Returns the transaction hash of `payload`.
    fn transaction_hash(&self, payload: &EncodedPayload) -> TxHash {
        TxHash::new(self.digest(payload.cipher_text()))
    }
}

/// SHA3-512 digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha3Digest;

impl PayloadDigest for Sha3Digest {
    fn digest(&self, cipher_text: &[u8]) -> Vec<u8> {
        sha3_512(&[cipher_text]).to_vec()
    }
}

/// SHA-512/256 digest for legacy deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512_256Digest;

impl PayloadDigest for Sha512_256Digest {
    fn digest(&self, cipher_text: &[u8]) -> Vec<u8> {
        Sha512_256::digest(cipher_text).to_vec()
    }
}

// ============================================
// DigestAlgorithm
// ============================================

/// Digest selection as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA3-512 (default)
    #[default]
    #[serde(rename = "sha3-512")]
    Sha3_512,
    /// SHA-512/256 (legacy)
    #[serde(rename = "sha512-256")]
    Sha512_256,
}

impl DigestAlgorithm {
    /// Returns a boxed digest implementation.
    #[must_use]
    pub fn create(self) -> Box<dyn PayloadDigest> {
        match self {
            Self::Sha3_512 => Box::new(Sha3Digest),
            Self::Sha512_256 => Box::new(Sha512_256Digest),
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha3_512 => "sha3-512",
            Self::Sha512_256 => "sha512-256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha3-512" | "sha3_512" => Ok(Self::Sha3_512),
            "sha512-256" | "sha512_256" => Ok(Self::Sha512_256),
            other => Err(CommonError::invalid_input(
                "digest",
                format!("unknown digest algorithm '{other}'"),
            )
            .into()),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_512_empty_vector() {
        let expected = "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
                        15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26";
        assert_eq!(hex::encode(sha3_512(&[])), expected);
        assert_eq!(hex::encode(Sha3Digest.digest(b"")), expected);
    }

    #[test]
    fn test_sha3_512_parts_are_concatenated() {
        assert_eq!(
            sha3_512(&[b"ab".as_slice(), b"c".as_slice()]),
            sha3_512(&[b"abc".as_slice()])
        );
    }

    #[test]
    fn test_keccak256_empty_vector() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha512_256_abc_vector() {
        assert_eq!(
            hex::encode(Sha512_256Digest.digest(b"abc")),
            "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"
        );
    }

    #[test]
    fn test_digest_sizes() {
        assert_eq!(DigestAlgorithm::Sha3_512.create().digest(b"x").len(), 64);
        assert_eq!(DigestAlgorithm::Sha512_256.create().digest(b"x").len(), 32);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha3_512);
        assert_eq!("SHA512-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512_256);
        assert_eq!(DigestAlgorithm::Sha3_512.to_string(), "sha3-512");
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }

    #[test]
    fn test_transaction_hash_covers_cipher_text() {
        let payload = EncodedPayload::builder()
            .sender_key(tessera_common::PublicKey::new([1u8; 32]))
            .cipher_text(b"cipher".to_vec())
            .build()
            .unwrap();

        let hash = Sha3Digest.transaction_hash(&payload);
        assert_eq!(hash.as_bytes(), Sha3Digest.digest(b"cipher").as_slice());
    }
}
