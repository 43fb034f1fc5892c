// ============================================
// File: crates/tessera-core/src/codec/mod.rs
// ============================================
//! # Payload Codecs
//!
//! ## Creation Reason
//! Serializes `EncodedPayload` for the wire in either of the two formats
//! deployed peers understand, and detects which one incoming bytes use.
//!
//! ## Main Functionality
//! - [`PayloadEncoder`]: Encode/decode capability with recipient views
//! - [`legacy`]: Length-prefixed binary codec
//! - [`cbor`]: CBOR map codec
//! - [`version`]: Codec tags and peer version negotiation
//! - [`binary`]: Field primitives shared with privacy group encoding
//! - [`create`], [`detect_codec`], [`decode_any`]: Codec selection
//!
//! ## Detection
//! ```text
//! first byte 0xA0..=0xBF  ──►  CBOR map header
//! first byte 0x00         ──►  high byte of a legacy length prefix
//! anything else           ──►  MalformedPayload
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Encoders are stateless; share one instance freely across threads
//! - Recipient views are codec independent and live in [`recipient`]
//!
//! ## Last Modified
//! v0.1.0 - Initial codec module

pub mod binary;
pub mod cbor;
pub mod legacy;
pub mod recipient;
pub mod version;

pub use cbor::CborPayloadEncoder;
pub use legacy::LegacyPayloadEncoder;
pub use recipient::{for_recipient, with_recipient};
pub use version::EncodedPayloadCodec;

use tessera_common::PublicKey;

use crate::error::{CoreError, Result};
use crate::payload::EncodedPayload;

// ============================================
// PayloadEncoder Trait
// ============================================

/// Wire codec for encoded payloads.
pub trait PayloadEncoder: Send + Sync {
    /// Serializes `payload`.
    ///
    /// # Errors
    /// Returns an encoding error if the serializer fails.
    fn encode(&self, payload: &EncodedPayload) -> Result<Vec<u8>>;

    /// Parses bytes produced by [`PayloadEncoder::encode`] or by an older
    /// release of the same format.
    ///
    /// # Errors
    /// Returns `MalformedPayload` for truncated or invalid input.
    fn decode(&self, bytes: &[u8]) -> Result<EncodedPayload>;

    /// Returns the codec tag of this encoder.
    fn codec(&self) -> EncodedPayloadCodec;

    /// Strips `payload` to what `recipient` needs. See [`for_recipient`].
    ///
    /// # Errors
    /// Returns `InvalidRecipient` if `recipient` is not a recipient.
    fn for_recipient(&self, payload: &EncodedPayload, recipient: &PublicKey) -> Result<EncodedPayload> {
        for_recipient(payload, recipient)
    }

    /// Tags a recipient-less payload. See [`with_recipient`].
    fn with_recipient(&self, payload: &EncodedPayload, recipient: &PublicKey) -> EncodedPayload {
        with_recipient(payload, recipient)
    }
}

// ============================================
// Codec Selection
// ============================================

/// Returns the encoder for `codec`.
#[must_use]
pub fn create(codec: EncodedPayloadCodec) -> Box<dyn PayloadEncoder> {
    match codec {
        EncodedPayloadCodec::Legacy => Box::new(LegacyPayloadEncoder::new()),
        EncodedPayloadCodec::Cbor => Box::new(CborPayloadEncoder::new()),
    }
}

/// Identifies the codec of `bytes` from its first byte.
///
/// # Errors
/// Returns `MalformedPayload` for empty input or an unknown leading byte.
pub fn detect_codec(bytes: &[u8]) -> Result<EncodedPayloadCodec> {
    match bytes.first() {
        Some(0xA0..=0xBF) => Ok(EncodedPayloadCodec::Cbor),
        Some(0x00) => Ok(EncodedPayloadCodec::Legacy),
        Some(other) => Err(CoreError::malformed(format!(
            "unrecognised payload header byte 0x{other:02x}"
        ))),
        None => Err(CoreError::malformed("empty payload")),
    }
}

/// Decodes `bytes` with whichever codec produced them.
///
/// # Errors
/// Returns `MalformedPayload` if the codec cannot be detected or the
/// bytes do not decode.
pub fn decode_any(bytes: &[u8]) -> Result<EncodedPayload> {
    let codec = detect_codec(bytes)?;
    create(codec).decode(bytes)
}

// ============================================
// Tests
// ============================================
