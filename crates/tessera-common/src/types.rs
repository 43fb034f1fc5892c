// ============================================
// File: crates/tessera-common/src/types.rs
// ============================================
//! # Key and Nonce Types
//!
//! ## Creation Reason
//! Centralizes the byte-level key types shared by the enclave, the
//! payload codecs and the configuration layer, so every crate agrees
//! on size, equality and textual representation.
//!
//! ## Main Functionality
//! - `PublicKey`: 32-byte static public key, value-ordered
//! - `PrivateKey`: 32-byte private key, zeroized on drop, never displayed
//! - `Nonce`: Nonce bytes as carried on the wire
//! - Base64 `Display`/`FromStr` and serde support
//!
//! ## Textual Representation
//! ```text
//! PublicKey  → Base64 (standard alphabet, padded)
//! Nonce      → Base64
//! PrivateKey → never rendered; Debug shows [REDACTED]
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `PublicKey` ordering is plain byte order. Privacy group ids depend on it
//! - `Nonce` keeps whatever length the wire carried; the encryptor checks size
//! - `PrivateKey` must never gain `Display` or `Serialize`
//!
//! ## Last Modified
//! v0.1.0 - Initial key types

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CommonError, Result};

// ============================================
// Constants
// ============================================

/// Size of a public or private key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a nonce produced by the encryptor.
pub const NONCE_SIZE: usize = 24;

/// Decodes Base64 text after trimming surrounding whitespace.
///
/// # Errors
/// Returns `Decoding` if the text is not valid Base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    Ok(BASE64.decode(text.trim())?)
}

/// Encodes bytes as standard Base64.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

fn to_key_array(bytes: &[u8]) -> Result<[u8; KEY_SIZE]> {
    <[u8; KEY_SIZE]>::try_from(bytes).map_err(|_| CommonError::invalid_length(KEY_SIZE, bytes.len()))
}

// ============================================
// PublicKey
// ============================================

/// Static public key identifying a participant.
///
/// # Example
/// ```
/// use tessera_common::types::PublicKey;
///
/// let key = PublicKey::from_bytes(&[7u8; 32]).unwrap();
/// let text = key.to_string();
/// let parsed: PublicKey = text.parse().unwrap();
/// assert_eq!(key, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; KEY_SIZE]);

impl PublicKey {
    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    /// Returns `InvalidLength` unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        to_key_array(bytes).map(Self)
    }

    /// Creates a public key from a fixed-size array.
    #[must_use]
    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a Base64 encoded public key.
    ///
    /// # Errors
    /// Returns `Decoding` or `InvalidLength`.
    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&decode_base64(text)?)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Returns the key as Base64 text.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base64())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl FromStr for PublicKey {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base64(s)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base64())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::from_bytes(&bytes)
                .map_err(|_| serde::de::Error::invalid_length(bytes.len(), &"32 bytes"))
        }
    }
}

// ============================================
// PrivateKey
// ============================================

/// Private half of a static key pair.
///
/// # Security
/// - Zeroed on drop
/// - No `Display`, no `Serialize`
/// - `Debug` never prints the bytes
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_SIZE]);

impl PrivateKey {
    /// Creates a private key from raw bytes.
    ///
    /// # Errors
    /// Returns `InvalidLength` unless exactly 32 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        to_key_array(bytes).map(Self)
    }

    /// Creates a private key from a fixed-size array.
    #[must_use]
    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a Base64 encoded private key. The decoded buffer is wiped.
    ///
    /// # Errors
    /// Returns `Decoding` or `InvalidLength`.
    pub fn from_base64(text: &str) -> Result<Self> {
        let mut bytes = decode_base64(text)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Returns the raw key bytes.
    ///
    /// # Security Warning
    /// Do not log or persist the returned bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

// ============================================
// Nonce
// ============================================

/// Nonce bytes used to seal a cipher text or a recipient box.
///
/// Encrypted payloads carry the nonce verbatim; the encryptor
/// rejects nonces that are not [`NONCE_SIZE`] bytes long.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    /// Creates a nonce from raw bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the raw nonce bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the nonce length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the nonce has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", BASE64.encode(&self.0))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BASE64.encode(&self.0))
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Nonce {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Nonce {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

// ============================================
// Tests
// ============================================
