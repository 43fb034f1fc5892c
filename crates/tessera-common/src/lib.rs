// ============================================
// File: crates/tessera-common/src/lib.rs
// ============================================
//! # Tessera Common - Shared Types Library
//!
//! ## Creation Reason
//! Provides the key types and error definitions shared by every Tessera
//! crate, so keys are parsed, compared and rendered the same way in the
//! enclave, the payload codecs and the configuration layer.
//!
//! ## Main Functionality
//! - [`types`]: `PublicKey`, `PrivateKey`, `Nonce` and Base64 helpers
//! - [`error`]: Common error types and result aliases
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              tessera-enclave                        │
//! │                    │                                │
//! │                    ▼                                │
//! │              tessera-core                           │
//! │                    │                                │
//! │                    ▼                                │
//! │             tessera-common  ◄── You are here       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - Keep dependencies minimal
//! - Security-sensitive types must implement Zeroize
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use types::{Nonce, PrivateKey, PublicKey, KEY_SIZE, NONCE_SIZE};
