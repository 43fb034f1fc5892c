// ============================================
// File: crates/tessera-core/src/crypto/kdf.rs
// ============================================
//! # Key Derivation Functions
//!
//! ## Creation Reason
//! Turns the raw X25519 output of a sender/recipient pair into the
//! symmetric key that seals recipient boxes.
//!
//! ## Main Functionality
//! - `derive_shared_key`: HKDF-SHA256 over the Diffie-Hellman output
//! - Domain separation via fixed salt and info labels
//!
//! ## ⚠️ Important Note for Next Developer
//! - The derivation must stay symmetric: no public keys in `info`,
//!   otherwise sender and recipient derive different keys
//! - Changing the labels breaks every stored payload
//!
//! ## Last Modified
//! v0.1.0 - Shared key derivation

use hkdf::Hkdf;
use sha2::Sha256;

use super::keys::SharedKey;
use super::{HKDF_INFO, HKDF_SALT, SYMMETRIC_KEY_SIZE};
use crate::error::{CoreError, Result};

// ============================================
// Key Derivation
// ============================================

/// Derives a shared key from an X25519 Diffie-Hellman output.
///
/// # Arguments
/// * `dh_output` - 32-byte X25519 shared secret
///
/// # Errors
/// Returns `KeyExchange` if HKDF expansion fails.
pub fn derive_shared_key(dh_output: &[u8; 32]) -> Result<SharedKey> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), dh_output);

    let mut key_bytes = [0u8; SYMMETRIC_KEY_SIZE];
    hk.expand(HKDF_INFO, &mut key_bytes)
        .map_err(|_| CoreError::key_exchange("HKDF expansion failed"))?;

    Ok(SharedKey::new(key_bytes))
}

// ============================================
// Tests
// ============================================
