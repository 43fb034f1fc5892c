// ============================================
// File: crates/tessera-core/src/crypto/encryptor.rs
// ============================================
//! # Box Encryption
//!
//! ## Creation Reason
//! Provides the authenticated-encryption capability the enclave is built
//! on: master key and nonce generation, shared key computation, and
//! sealing/opening with a precomputed key.
//!
//! ## Main Functionality
//! - `Encryptor`: Capability trait consumed by the enclave
//! - `XChaChaEncryptor`: X25519 + HKDF-SHA256 + XChaCha20-Poly1305
//! - `seal` / `open`: Convenience functions using the default encryptor
//!
//! ## Box Construction
//! ```text
//! shared_key = HKDF-SHA256(X25519(private_a, public_b))
//!
//! ┌─────────────────────────────────────────────┐
//! │ XChaCha20 cipher text (len = message len)   │
//! ├─────────────────────────────────────────────┤
//! │ Poly1305 tag (16 bytes)                     │
//! └─────────────────────────────────────────────┘
//! nonce: 24 random bytes, carried next to the box
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every seal needs a fresh random nonce from `random_nonce`
//! - Never reuse a (key, nonce) pair
//! - Open failures are never retried inside the enclave
//!
//! ## Last Modified
//! v0.1.0 - Initial encryptor implementation

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use tessera_common::{Nonce, PrivateKey, PublicKey};

use super::kdf::derive_shared_key;
use super::keys::{KeyPair, MasterKey, SharedKey, SymmetricKey};
use super::{NONCE_SIZE, POLY1305_TAG_SIZE, SYMMETRIC_KEY_SIZE};
use crate::error::{CoreError, Result};

// ============================================
// Encryptor Trait
// ============================================

/// Authenticated-encryption capability used by the enclave.
///
/// # Purpose
/// Abstracts the box construction to allow:
/// - Testing with deterministic implementations
/// - Alternative cipher suites
pub trait Encryptor: Send + Sync {
    /// Generates a fresh random master key.
    fn create_master_key(&self) -> MasterKey;

    /// Generates a fresh random nonce.
    fn random_nonce(&self) -> Nonce;

    /// Generates a new static key pair.
    fn generate_key_pair(&self) -> KeyPair;

    /// Computes the key shared between the owner of `private` and the
    /// owner of `public`.
    ///
    /// # Errors
    /// - `KeyExchange`: if the Diffie-Hellman output is degenerate
    fn compute_shared_key(&self, public: &PublicKey, private: &PrivateKey) -> Result<SharedKey>;

    /// Seals `message` under `key` and `nonce`.
    ///
    /// # Errors
    /// - `InvalidNonceLength`: nonce is not 24 bytes
    /// - `Encryption`: cipher failure
    fn seal_after_precomputation(
        &self,
        message: &[u8],
        nonce: &Nonce,
        key: &dyn SymmetricKey,
    ) -> Result<Vec<u8>>;

    /// Opens a box sealed by [`Encryptor::seal_after_precomputation`].
    ///
    /// # Errors
    /// - `InvalidNonceLength`: nonce is not 24 bytes
    /// - `CryptoOpenFailure`: wrong key or tampered data
    fn open_after_precomputation(
        &self,
        cipher_text: &[u8],
        nonce: &Nonce,
        key: &dyn SymmetricKey,
    ) -> Result<Vec<u8>>;
}

// ============================================
// XChaChaEncryptor
// ============================================

/// Default implementation using X25519 and XChaCha20-Poly1305.
#[derive(Debug, Default, Clone)]
pub struct XChaChaEncryptor;

impl XChaChaEncryptor {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn cipher(key: &dyn SymmetricKey) -> Result<XChaCha20Poly1305> {
        XChaCha20Poly1305::new_from_slice(key.key_bytes()).map_err(|_| CoreError::InvalidKeyLength {
            expected: SYMMETRIC_KEY_SIZE,
            actual: key.key_bytes().len(),
        })
    }

    fn check_nonce(nonce: &Nonce) -> Result<&XNonce> {
        if nonce.len() != NONCE_SIZE {
            return Err(CoreError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: nonce.len(),
            });
        }
        Ok(XNonce::from_slice(nonce.as_bytes()))
    }
}

impl Encryptor for XChaChaEncryptor {
    fn create_master_key(&self) -> MasterKey {
        let mut bytes = [0u8; SYMMETRIC_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        MasterKey::new(bytes)
    }

    fn random_nonce(&self) -> Nonce {
        let mut bytes = vec![0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Nonce::new(bytes)
    }

    fn generate_key_pair(&self) -> KeyPair {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = X25519PublicKey::from(&secret);
        KeyPair::new(
            PublicKey::new(public.to_bytes()),
            PrivateKey::new(secret.to_bytes()),
        )
    }

    fn compute_shared_key(&self, public: &PublicKey, private: &PrivateKey) -> Result<SharedKey> {
        let secret = StaticSecret::from(*private.as_bytes());
        let peer = X25519PublicKey::from(*public.as_bytes());

        let dh = secret.diffie_hellman(&peer);
        if !dh.was_contributory() {
            return Err(CoreError::key_exchange(format!(
                "low-order public key {public}"
            )));
        }

        derive_shared_key(dh.as_bytes())
    }

    fn seal_after_precomputation(
        &self,
        message: &[u8],
        nonce: &Nonce,
        key: &dyn SymmetricKey,
    ) -> Result<Vec<u8>> {
        let xnonce = Self::check_nonce(nonce)?;
        Self::cipher(key)?
            .encrypt(xnonce, message)
            .map_err(|_| CoreError::encryption("XChaCha20-Poly1305 encryption failed"))
    }

    fn open_after_precomputation(
        &self,
        cipher_text: &[u8],
        nonce: &Nonce,
        key: &dyn SymmetricKey,
    ) -> Result<Vec<u8>> {
        let xnonce = Self::check_nonce(nonce)?;
        if cipher_text.len() < POLY1305_TAG_SIZE {
            return Err(CoreError::open_failure("sealed data shorter than tag"));
        }
        Self::cipher(key)?
            .decrypt(xnonce, cipher_text)
            .map_err(|_| CoreError::open_failure("authentication failed"))
    }
}

// ============================================
// Convenience Functions
// ============================================

/// Seals data using the default encryptor.
///
/// # Errors
/// See [`Encryptor::seal_after_precomputation`].
pub fn seal(message: &[u8], nonce: &Nonce, key: &dyn SymmetricKey) -> Result<Vec<u8>> {
    XChaChaEncryptor::new().seal_after_precomputation(message, nonce, key)
}

/// Opens data using the default encryptor.
///
/// # Errors
/// See [`Encryptor::open_after_precomputation`].
pub fn open(cipher_text: &[u8], nonce: &Nonce, key: &dyn SymmetricKey) -> Result<Vec<u8>> {
    XChaChaEncryptor::new().open_after_precomputation(cipher_text, nonce, key)
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> MasterKey {
        MasterKey::new([0x42u8; 32])
    }

    fn test_nonce() -> Nonce {
        Nonce::new(vec![0x01u8; NONCE_SIZE])
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let plaintext = b"private transaction";

        let sealed = seal(plaintext, &test_nonce(), &test_key()).unwrap();
        assert_eq!(sealed.len(), plaintext.len() + POLY1305_TAG_SIZE);

        let opened = open(&sealed, &test_nonce(), &test_key()).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_wrong_key_fails_open() {
        let sealed = seal(b"data", &test_nonce(), &test_key()).unwrap();
        let other = MasterKey::new([0x43u8; 32]);

        let result = open(&sealed, &test_nonce(), &other);
        assert!(matches!(result, Err(CoreError::CryptoOpenFailure { .. })));
    }

    #[test]
    fn test_tampered_data_fails_open() {
        let mut sealed = seal(b"data", &test_nonce(), &test_key()).unwrap();
        sealed[0] ^= 0xFF;

        let result = open(&sealed, &test_nonce(), &test_key());
        assert!(matches!(result, Err(CoreError::CryptoOpenFailure { .. })));
    }

    #[test]
    fn test_wrong_nonce_length_rejected() {
        let short = Nonce::new(vec![0u8; 12]);
        let result = seal(b"data", &short, &test_key());
        assert!(matches!(
            result,
            Err(CoreError::InvalidNonceLength { expected: 24, actual: 12 })
        ));
    }

    #[test]
    fn test_short_cipher_text_fails_open() {
        let result = open(&[0u8; 4], &test_nonce(), &test_key());
        assert!(matches!(result, Err(CoreError::CryptoOpenFailure { .. })));
    }

    #[test]
    fn test_shared_key_is_symmetric() {
        let encryptor = XChaChaEncryptor::new();
        let alice = encryptor.generate_key_pair();
        let bob = encryptor.generate_key_pair();

        let from_alice = encryptor
            .compute_shared_key(bob.public_key(), alice.private_key())
            .unwrap();
        let from_bob = encryptor
            .compute_shared_key(alice.public_key(), bob.private_key())
            .unwrap();

        assert_eq!(from_alice, from_bob);
    }

    #[test]
    fn test_self_shared_key_roundtrip() {
        let encryptor = XChaChaEncryptor::new();
        let pair = encryptor.generate_key_pair();
        let key = encryptor
            .compute_shared_key(pair.public_key(), pair.private_key())
            .unwrap();

        let nonce = encryptor.random_nonce();
        let sealed = encryptor
            .seal_after_precomputation(b"self", &nonce, &key)
            .unwrap();
        let opened = encryptor
            .open_after_precomputation(&sealed, &nonce, &key)
            .unwrap();
        assert_eq!(opened, b"self");
    }

    #[test]
    fn test_low_order_public_key_rejected() {
        let encryptor = XChaChaEncryptor::new();
        let pair = encryptor.generate_key_pair();
        let zero = PublicKey::new([0u8; 32]);

        let result = encryptor.compute_shared_key(&zero, pair.private_key());
        assert!(matches!(result, Err(CoreError::KeyExchange { .. })));
    }

    #[test]
    fn test_fresh_randomness() {
        let encryptor = XChaChaEncryptor::new();
        assert_ne!(encryptor.random_nonce(), encryptor.random_nonce());
        assert_ne!(encryptor.create_master_key(), encryptor.create_master_key());
        assert_eq!(encryptor.random_nonce().len(), NONCE_SIZE);
    }
}
