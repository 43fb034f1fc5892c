// ============================================
// File: crates/tessera-core/src/crypto/keys.rs
// ============================================
//! # Symmetric Key Types and Key Pairs
//!
//! ## Creation Reason
//! Defines the key types the enclave juggles while sealing a payload,
//! with zeroize-on-drop and redacted debug output.
//!
//! ## Main Functionality
//! - `MasterKey`: Per-transaction key that seals the payload
//! - `SharedKey`: Sender/recipient key that seals the master key
//! - `SymmetricKey`: Common view used by the encryptor
//! - `KeyPair`: Static public/private key pair
//!
//! ## Key Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  KeyPair (Static)                                          │
//! │  ├─ Loaded once from configuration or a key vault          │
//! │  └─ Private half only read through the KeyManager          │
//! │                                                            │
//! │  MasterKey (Per-transaction)                               │
//! │  ├─ Fresh random 32 bytes for every encryption             │
//! │  ├─ Seals the payload                                      │
//! │  └─ Itself sealed once per recipient                       │
//! │                                                            │
//! │  SharedKey (Per sender/recipient pair)                     │
//! │  ├─ X25519 + HKDF-SHA256                                   │
//! │  └─ Seals the master key into a recipient box              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL key types MUST implement Zeroize
//! - Never add Display or Serialize to secret key types
//!
//! ## Last Modified
//! v0.1.0 - Initial key type definitions

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use tessera_common::{PrivateKey, PublicKey};

use super::SYMMETRIC_KEY_SIZE;
use crate::error::{CoreError, Result};

// ============================================
// SymmetricKey
// ============================================

/// A 32-byte key usable for sealing and opening.
pub trait SymmetricKey {
    /// Returns the raw key bytes.
    fn key_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE];
}

fn to_symmetric(bytes: &[u8]) -> Result<[u8; SYMMETRIC_KEY_SIZE]> {
    <[u8; SYMMETRIC_KEY_SIZE]>::try_from(bytes).map_err(|_| CoreError::InvalidKeyLength {
        expected: SYMMETRIC_KEY_SIZE,
        actual: bytes.len(),
    })
}

// ============================================
// MasterKey
// ============================================

/// Per-transaction key sealing the payload cipher text.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; SYMMETRIC_KEY_SIZE]);

impl MasterKey {
    /// Creates a master key from a fixed-size array.
    #[must_use]
    pub const fn new(bytes: [u8; SYMMETRIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates a master key from opened box contents.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` unless exactly 32 bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_symmetric(bytes).map(Self)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

impl SymmetricKey for MasterKey {
    fn key_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey([REDACTED])")
    }
}

// ============================================
// SharedKey
// ============================================

/// Key shared by a sender and a recipient.
///
/// # Derivation
/// ```text
/// dh         = X25519(private_a, public_b)
/// shared_key = HKDF-SHA256(ikm: dh, salt: HKDF_SALT, info: HKDF_INFO)
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey([u8; SYMMETRIC_KEY_SIZE]);

impl SharedKey {
    /// Creates a shared key from a fixed-size array.
    #[must_use]
    pub const fn new(bytes: [u8; SYMMETRIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

impl SymmetricKey for SharedKey {
    fn key_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedKey([REDACTED])")
    }
}

// ============================================
// KeyPair
// ============================================

/// Static key pair managed by the enclave.
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Pairs a public key with its private key.
    #[must_use]
    pub const fn new(public: PublicKey, private: PrivateKey) -> Self {
        Self { public, private }
    }

    /// Returns the public key.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Returns the private key.
    #[must_use]
    pub const fn private_key(&self) -> &PrivateKey {
        &self.private
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_key_from_slice() {
        let key = MasterKey::from_slice(&[7u8; 32]).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; 32]);

        assert!(matches!(
            MasterKey::from_slice(&[7u8; 16]),
            Err(CoreError::InvalidKeyLength { expected: 32, actual: 16 })
        ));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let master = MasterKey::new([0xAB; 32]);
        let shared = SharedKey::new([0xCD; 32]);
        assert_eq!(format!("{master:?}"), "MasterKey([REDACTED])");
        assert_eq!(format!("{shared:?}"), "SharedKey([REDACTED])");

        let pair = KeyPair::new(PublicKey::new([1u8; 32]), PrivateKey::new([2u8; 32]));
        let debug = format!("{pair:?}");
        assert!(debug.contains("public"));
        assert!(!debug.contains("private"));
    }

    #[test]
    fn test_symmetric_key_view() {
        let master = MasterKey::new([3u8; 32]);
        let as_symmetric: &dyn SymmetricKey = &master;
        assert_eq!(as_symmetric.key_bytes(), master.as_bytes());
    }
}
