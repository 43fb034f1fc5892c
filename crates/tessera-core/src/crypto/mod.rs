// ============================================
// File: crates/tessera-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes all cryptographic primitives used by the enclave, built on
//! audited RustCrypto and dalek implementations.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`keys`]: Master, shared and static key types
//! - [`kdf`]: Shared key derivation (HKDF-SHA256)
//! - [`encryptor`]: Box construction (X25519 + XChaCha20-Poly1305)
//! - [`digest`]: Payload digests, SHA3-512 and Keccak-256 helpers
//!
//! ## Cryptographic Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Encrypt Phase                            │
//! │                                                             │
//! │   random MasterKey + Nonce ──► XChaCha20-Poly1305 ──► cipher│
//! │                                                             │
//! │   For each recipient:                                       │
//! │     X25519(sender_priv, recipient_pub)                      │
//! │              │                                              │
//! │              ▼                                              │
//! │       HKDF-SHA256 ─────► SharedKey                          │
//! │              │                                              │
//! │              ▼                                              │
//! │   seal(MasterKey, recipient_nonce, SharedKey) ──► box       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER roll your own crypto
//! - ALL sensitive keys implement Zeroize
//! - Test vectors should match RFC 7748 and the XChaCha20 draft
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod digest;
pub mod encryptor;
pub mod kdf;
pub mod keys;

// Re-export primary types at module level
pub use digest::{DigestAlgorithm, PayloadDigest, Sha3Digest, Sha512_256Digest};
pub use encryptor::{Encryptor, XChaChaEncryptor};
pub use keys::{KeyPair, MasterKey, SharedKey, SymmetricKey};

// ============================================
// Constants
// ============================================

/// Size of master and shared keys in bytes.
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Size of an XChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = tessera_common::NONCE_SIZE;

/// Size of Poly1305 authentication tag in bytes.
pub const POLY1305_TAG_SIZE: usize = 16;

/// HKDF salt for shared key derivation.
pub const HKDF_SALT: &[u8] = b"tessera-box-v1";

/// HKDF info label for shared key derivation.
pub const HKDF_INFO: &[u8] = b"tessera-shared-key";
