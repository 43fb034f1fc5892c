// ============================================
// File: crates/tessera-core/src/enclave/mod.rs
// ============================================
//! # Enclave Module
//!
//! ## Main Functionality
//! - [`enclave`]: `Enclave` capability and `EnclaveImpl`
//! - [`key_manager`]: Static key table
//! - [`metadata`]: Privacy settings passed into encryption
//!
//! ## Last Modified
//! v0.1.0 - Initial enclave module

#[allow(clippy::module_inception)]
pub mod enclave;
pub mod key_manager;
pub mod metadata;

pub use enclave::{Enclave, EnclaveImpl, Status};
pub use key_manager::{InMemoryKeyManager, KeyManager};
pub use metadata::{PrivacyMetadata, PrivacyMetadataBuilder};
