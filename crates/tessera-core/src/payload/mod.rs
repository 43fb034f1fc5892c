// ============================================
// File: crates/tessera-core/src/payload/mod.rs
// ============================================
//! # Payload Data Model
//!
//! ## Creation Reason
//! Holds the types that describe an encrypted transaction independent of
//! how it is serialized.
//!
//! ## Main Functionality
//! - [`encoded`]: `EncodedPayload` and its builder
//! - [`privacy_mode`]: `PrivacyMode` and wire flags
//! - [`raw`]: `RawTransaction` staged without recipients
//! - [`values`]: `TxHash`, `SecurityHash`, `RecipientBox`
//!
//! ## Last Modified
//! v0.1.0 - Initial payload model

pub mod encoded;
pub mod privacy_mode;
pub mod raw;
pub mod values;

pub use encoded::{EncodedPayload, EncodedPayloadBuilder};
pub(crate) use encoded::validate_mode;
pub use privacy_mode::PrivacyMode;
pub use raw::RawTransaction;
pub use values::{RecipientBox, SecurityHash, TxHash};
