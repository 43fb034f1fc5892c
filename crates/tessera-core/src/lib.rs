// ============================================
// File: crates/tessera-core/src/lib.rs
// ============================================
//! # Tessera Core - Enclave & Payload Codec Library
//!
//! ## Creation Reason
//! Performs every key-bearing operation of the private transaction
//! manager and defines the wire representation of encrypted payloads.
//! Nothing outside this crate touches a private key.
//!
//! ## Main Functionality
//!
//! ### Enclave Module ([`enclave`])
//! - `Enclave` / `EnclaveImpl`: encrypt, decrypt, reseal
//! - `KeyManager` / `InMemoryKeyManager`: static key table
//! - `PrivacyMetadata`: privacy settings for one encryption
//!
//! ### Payload Module ([`payload`])
//! - `EncodedPayload` and its builder
//! - `RawTransaction`, `PrivacyMode`, hash and box value types
//!
//! ### Codec Module ([`codec`])
//! - Legacy length-prefixed and CBOR encoders
//! - Recipient views (`for_recipient`, `with_recipient`)
//! - Codec negotiation by peer version
//!
//! ### Privacy Group Module ([`privacy_group`])
//! - Deterministic group id derivation (RLP + Keccak-256)
//! - Group binary encoding
//!
//! ### Crypto Module ([`crypto`])
//! - X25519 + HKDF-SHA256 + XChaCha20-Poly1305 box construction
//! - SHA3-512 and Keccak-256 digests
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              tessera-enclave                        │
//! │                    │                                │
//! │                    ▼                                │
//! │              tessera-core  ◄── You are here        │
//! │                    │                                │
//! │                    ▼                                │
//! │             tessera-common                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every operation is synchronous and stateless per call
//! - ALL keys MUST implement Zeroize for secure cleanup
//! - Wire formats are shared with other nodes; never change them silently
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod crypto;
pub mod enclave;
pub mod error;
pub mod payload;
pub mod privacy_group;

// Re-export commonly used items
pub use codec::{
    decode_any, detect_codec, for_recipient, with_recipient, EncodedPayloadCodec, PayloadEncoder,
};
pub use crypto::{Encryptor, KeyPair, MasterKey, XChaChaEncryptor};
pub use enclave::{
    Enclave, EnclaveImpl, InMemoryKeyManager, KeyManager, PrivacyMetadata, Status,
};
pub use error::{CoreError, Result};
pub use payload::{
    EncodedPayload, EncodedPayloadBuilder, PrivacyMode, RawTransaction, RecipientBox,
    SecurityHash, TxHash,
};
pub use privacy_group::{DefaultPrivacyGroupUtil, PrivacyGroup, PrivacyGroupId, PrivacyGroupUtil};
