// ============================================
// File: crates/tessera-core/src/enclave/key_manager.rs
// ============================================
//! # Key Manager
//!
//! ## Creation Reason
//! Owns the node's static key pairs and resolves public keys to their
//! private halves. It is the only holder of private keys.
//!
//! ## Main Functionality
//! - `KeyManager`: Lookup capability consumed by the enclave
//! - `InMemoryKeyManager`: Table built once from decrypted key pairs
//!
//! ## Key Table
//! ```text
//! ┌──────────────────────────┬───────────────────────────┐
//! │ Public key (Base64)      │ Private key               │
//! ├──────────────────────────┼───────────────────────────┤
//! │ first configured  ◄──────┼── default key             │
//! │ ...                      │                           │
//! └──────────────────────────┴───────────────────────────┘
//! forwarding keys: public keys copied on every transaction
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The table is immutable after construction; rotation means a new
//!   manager
//! - Never log private keys
//!
//! ## Last Modified
//! v0.1.0 - Initial key manager

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use tessera_common::{CommonError, PrivateKey, PublicKey};

use crate::crypto::KeyPair;
use crate::error::{CoreError, Result};

// ============================================
// KeyManager Trait
// ============================================

/// Read-only key lookup capability.
pub trait KeyManager: Send + Sync {
    /// Returns the private key paired with `public`.
    ///
    /// # Errors
    /// `KeyNotFound` if `public` is not managed here.
    fn private_key_for(&self, public: &PublicKey) -> Result<&PrivateKey>;

    /// Returns the default sender key.
    fn default_public_key(&self) -> PublicKey;

    /// Returns keys that receive a copy of every transaction.
    fn forwarding_keys(&self) -> BTreeSet<PublicKey>;

    /// Returns every managed public key.
    fn public_keys(&self) -> BTreeSet<PublicKey>;

    /// Returns `true` if `key` is managed here.
    fn is_managed(&self, key: &PublicKey) -> bool {
        self.private_key_for(key).is_ok()
    }
}

// ============================================
// InMemoryKeyManager
// ============================================

/// Key manager backed by an in-memory table.
pub struct InMemoryKeyManager {
    keys: BTreeMap<PublicKey, KeyPair>,
    default_key: PublicKey,
    forwarding_keys: BTreeSet<PublicKey>,
}

impl InMemoryKeyManager {
    /// Builds the table. The first pair becomes the default key.
    ///
    /// # Errors
    /// - `InvalidInput`: no key pairs were given
    /// - `AlreadyExists`: a public key appears twice
    pub fn new(
        key_pairs: Vec<KeyPair>,
        forwarding_keys: impl IntoIterator<Item = PublicKey>,
    ) -> Result<Self> {
        let default_key = *key_pairs
            .first()
            .ok_or_else(|| {
                CoreError::from(CommonError::invalid_input(
                    "keys",
                    "at least one key pair is required",
                ))
            })?
            .public_key();

        let mut keys = BTreeMap::new();
        for pair in key_pairs {
            let public = *pair.public_key();
            if keys.insert(public, pair).is_some() {
                return Err(CommonError::already_exists("key pair", public.to_base64()).into());
            }
        }

        let forwarding_keys: BTreeSet<PublicKey> = forwarding_keys.into_iter().collect();

        info!(
            managed = keys.len(),
            forwarding = forwarding_keys.len(),
            default_key = %default_key,
            "Key manager initialized"
        );

        Ok(Self {
            keys,
            default_key,
            forwarding_keys,
        })
    }

    /// Returns the number of managed key pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; construction requires at least one key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyManager for InMemoryKeyManager {
    fn private_key_for(&self, public: &PublicKey) -> Result<&PrivateKey> {
        self.keys
            .get(public)
            .map(KeyPair::private_key)
            .ok_or(CoreError::KeyNotFound { key: *public })
    }

    fn default_public_key(&self) -> PublicKey {
        self.default_key
    }

    fn forwarding_keys(&self) -> BTreeSet<PublicKey> {
        self.forwarding_keys.clone()
    }

    fn public_keys(&self) -> BTreeSet<PublicKey> {
        self.keys.keys().copied().collect()
    }

    fn is_managed(&self, key: &PublicKey) -> bool {
        self.keys.contains_key(key)
    }
}

impl std::fmt::Debug for InMemoryKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyManager")
            .field("public_keys", &self.keys.keys().collect::<Vec<_>>())
            .field("default_key", &self.default_key)
            .field("forwarding_keys", &self.forwarding_keys)
            .finish()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(byte: u8) -> KeyPair {
        KeyPair::new(PublicKey::new([byte; 32]), PrivateKey::new([byte + 100; 32]))
    }

    #[test]
    fn test_lookup() {
        let manager = InMemoryKeyManager::new(vec![pair(1), pair(2)], []).unwrap();

        let private = manager.private_key_for(&PublicKey::new([2u8; 32])).unwrap();
        assert_eq!(private.as_bytes(), &[102u8; 32]);
        assert!(manager.is_managed(&PublicKey::new([1u8; 32])));
        assert_eq!(manager.len(), 2);
        assert!(!manager.is_empty());
    }

    #[test]
    fn test_unknown_key() {
        let manager = InMemoryKeyManager::new(vec![pair(1)], []).unwrap();
        let result = manager.private_key_for(&PublicKey::new([9u8; 32]));
        assert!(matches!(result, Err(CoreError::KeyNotFound { .. })));
        assert!(!manager.is_managed(&PublicKey::new([9u8; 32])));
    }

    #[test]
    fn test_first_key_is_default() {
        let manager = InMemoryKeyManager::new(vec![pair(5), pair(1)], []).unwrap();
        assert_eq!(manager.default_public_key(), PublicKey::new([5u8; 32]));
        assert_eq!(manager.public_keys().len(), 2);
    }

    #[test]
    fn test_forwarding_keys() {
        let forwarding = [PublicKey::new([7u8; 32]), PublicKey::new([7u8; 32])];
        let manager = InMemoryKeyManager::new(vec![pair(1)], forwarding).unwrap();
        assert_eq!(manager.forwarding_keys().len(), 1);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(InMemoryKeyManager::new(Vec::new(), []).is_err());

        let result = InMemoryKeyManager::new(vec![pair(1), pair(1)], []);
        assert!(matches!(result, Err(CoreError::Common(_))));
    }

    #[test]
    fn test_debug_has_no_private_keys() {
        let manager = InMemoryKeyManager::new(vec![pair(1)], []).unwrap();
        let debug = format!("{manager:?}");
        assert!(!debug.contains("PrivateKey"));
    }
}
