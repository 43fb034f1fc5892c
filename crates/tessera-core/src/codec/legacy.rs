// ============================================
// File: crates/tessera-core/src/codec/legacy.rs
// ============================================
//! # Legacy Binary Codec
//!
//! ## Creation Reason
//! The original payload format, still spoken by every deployed peer.
//! Newer releases appended optional sections to its tail, so the decoder
//! must accept every shorter historical shape.
//!
//! ## Wire Format
//! ```text
//! sender | cipher_text | nonce | boxes[] | recipient_nonce
//!   ── end of oldest format ──
//! recipient_keys[]
//!   ── end of pre-privacy format ──
//! privacy_flag (1-byte field) | affected: count, (tx, sec)*
//! exec_hash              (only when non-empty)
//! mandatory_recipients[] (only for MANDATORY_RECIPIENTS)
//! privacy_group_id       (only when present)
//! ```
//!
//! ## Decode Tolerance
//! After the recipient nonce each section is read only if bytes remain.
//! The exec hash is read only for private state validation payloads and
//! the mandatory list only for mandatory recipients payloads. Whatever
//! is left after that is the privacy group id.
//!
//! ## ⚠️ Important Note for Next Developer
//! - This layout is consensus-critical; never reorder sections
//! - Older peers stop reading after the sections they know about
//!
//! ## Last Modified
//! v0.1.0 - Initial legacy codec

use std::collections::BTreeMap;

use tessera_common::PublicKey;

use super::binary::{FieldReader, FieldWriter};
use super::{EncodedPayloadCodec, PayloadEncoder};
use crate::error::{CoreError, Result};
use crate::payload::{EncodedPayload, PrivacyMode, RecipientBox, SecurityHash, TxHash};
use crate::privacy_group::PrivacyGroupId;

/// Length-prefixed binary payload codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyPayloadEncoder;

impl LegacyPayloadEncoder {
    /// Creates a new legacy codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn to_public_key(bytes: &[u8], what: &str) -> Result<PublicKey> {
    PublicKey::from_bytes(bytes)
        .map_err(|e| CoreError::malformed(format!("invalid {what}: {e}")))
}

fn to_public_keys(fields: Vec<Vec<u8>>, what: &str) -> Result<Vec<PublicKey>> {
    fields.iter().map(|f| to_public_key(f, what)).collect()
}

impl PayloadEncoder for LegacyPayloadEncoder {
    fn encode(&self, payload: &EncodedPayload) -> Result<Vec<u8>> {
        let mut writer = FieldWriter::with_capacity(256 + payload.cipher_text().len());

        writer.put_field(payload.sender_key().as_bytes());
        writer.put_field(payload.cipher_text());
        writer.put_field(payload.cipher_text_nonce().as_bytes());
        writer.put_array(payload.recipient_boxes());
        writer.put_field(payload.recipient_nonce().as_bytes());
        writer.put_array(payload.recipient_keys());
        writer.put_field(&[payload.privacy_mode().flag()]);

        let affected = payload.affected_contract_transactions();
        writer.put_count(affected.len());
        for (tx_hash, security_hash) in affected {
            writer.put_field(tx_hash.as_bytes());
            writer.put_field(security_hash.as_bytes());
        }

        if !payload.exec_hash().is_empty() {
            writer.put_field(payload.exec_hash());
        }

        if payload.privacy_mode() == PrivacyMode::MandatoryRecipients {
            writer.put_array(payload.mandatory_recipients());
        }

        if let Some(group_id) = payload.privacy_group_id() {
            writer.put_field(group_id.as_bytes());
        }

        Ok(writer.finish())
    }

    fn decode(&self, bytes: &[u8]) -> Result<EncodedPayload> {
        let mut reader = FieldReader::new(bytes);

        let sender = to_public_key(&reader.read_field("sender key")?, "sender key")?;
        let cipher_text = reader.read_field("cipher text")?;
        let nonce = reader.read_field("cipher text nonce")?;
        let boxes = reader
            .read_array("recipient boxes")?
            .into_iter()
            .map(RecipientBox::new)
            .collect();
        let recipient_nonce = reader.read_field("recipient nonce")?;

        let builder = EncodedPayload::builder()
            .sender_key(sender)
            .cipher_text(cipher_text)
            .cipher_text_nonce(nonce)
            .recipient_boxes(boxes)
            .recipient_nonce(recipient_nonce);

        // Participant payloads end here.
        if !reader.has_remaining() {
            return builder.build();
        }

        let keys = to_public_keys(reader.read_array("recipient keys")?, "recipient key")?;
        let builder = builder.recipient_keys(keys);

        if !reader.has_remaining() {
            return builder.build();
        }

        let flag = reader.read_field("privacy flag")?;
        let mode = PrivacyMode::from_flag(flag.first().copied().unwrap_or(0));

        let count = reader.read_count("affected transactions")?;
        let mut affected = BTreeMap::new();
        for _ in 0..count {
            let tx_hash = TxHash::new(reader.read_field("affected transaction hash")?);
            let security_hash = SecurityHash::new(reader.read_field("security hash")?);
            affected.insert(tx_hash, security_hash);
        }

        let mut builder = builder
            .privacy_mode(mode)
            .affected_contract_transactions(affected);

        if reader.has_remaining() && mode == PrivacyMode::PrivateStateValidation {
            builder = builder.exec_hash(reader.read_field("exec hash")?);
        }

        if reader.has_remaining() && mode == PrivacyMode::MandatoryRecipients {
            let mandatory =
                to_public_keys(reader.read_array("mandatory recipients")?, "mandatory recipient")?;
            builder = builder.mandatory_recipients(mandatory);
        }

        if reader.has_remaining() {
            let group_id = reader.read_field("privacy group id")?;
            if !group_id.is_empty() {
                builder = builder.privacy_group_id(PrivacyGroupId::new(group_id));
            }
        }

        builder.build()
    }

    fn codec(&self) -> EncodedPayloadCodec {
        EncodedPayloadCodec::Legacy
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Payload written by the oldest format: no recipient key section.
    const NO_RECIPIENT_SECTION: &[i8] = &[
        0, 0, 0, 0, 0, 0, 0, 32, -51, 40, -97, 78, 121, 47, -26, -66, 10, -21, -80, -22, -33, 78,
        30, 85, -61, 56, 22, -100, 70, 124, 114, -34, -41, 36, -62, 6, 109, 63, -17, 8, 0, 0, 0,
        0, 0, 0, 0, 28, 120, 111, 63, -100, 97, -12, -103, 20, 2, -48, 37, -86, -115, -112, -75,
        -27, 55, 12, -1, 120, 13, 0, 86, 92, 52, 77, -4, 45, 0, 0, 0, 0, 0, 0, 0, 24, -115, -84,
        -58, 14, 82, 118, 4, -118, -53, 86, 3, 14, 112, 70, -4, 81, 121, 84, -24, -3, -73, -17, 6,
        124, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 48, -87, -102, 0, 95, -13, 48, 76, -115,
        -115, 62, 54, -55, -78, 125, -54, -34, -71, -11, -95, -85, 78, -24, -30, 47, 65, 5, 88,
        38, -111, -12, -41, -97, 103, -60, -101, 43, -57, -68, 68, -109, 36, 49, -63, -123, 62,
        21, 67, -28, 0, 0, 0, 0, 0, 0, 0, 24, -63, 5, 86, 42, -85, -12, -36, 16, -108, 48, 26, 36,
        44, -82, 15, -38, -19, 6, -101, 107, 110, -30, 95, 5,
    ];

    fn unsigned(bytes: &[i8]) -> Vec<u8> {
        bytes.iter().map(|b| *b as u8).collect()
    }

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    fn base() -> crate::payload::EncodedPayloadBuilder {
        EncodedPayload::builder()
            .sender_key(key(1))
            .cipher_text(b"cipher".to_vec())
            .cipher_text_nonce(vec![2u8; 24])
            .recipient_nonce(vec![3u8; 24])
    }

    #[test]
    fn test_decode_oldest_format() {
        let payload = LegacyPayloadEncoder
            .decode(&unsigned(NO_RECIPIENT_SECTION))
            .unwrap();

        assert_eq!(payload.sender_key().as_bytes()[..2], [0xCD, 0x28]);
        assert_eq!(payload.cipher_text().len(), 28);
        assert_eq!(payload.cipher_text_nonce().len(), 24);
        assert_eq!(payload.recipient_boxes().len(), 1);
        assert_eq!(payload.recipient_boxes()[0].as_bytes().len(), 48);
        assert_eq!(payload.recipient_nonce().as_bytes()[0], 0xC1);
        assert!(payload.recipient_keys().is_empty());
        assert_eq!(payload.privacy_mode(), PrivacyMode::StandardPrivate);
        assert!(payload.affected_contract_transactions().is_empty());
        assert!(payload.exec_hash().is_empty());
        assert!(payload.mandatory_recipients().is_empty());
        assert!(payload.privacy_group_id().is_none());
    }

    #[test]
    fn test_decode_empty_recipient_section() {
        let mut bytes = unsigned(NO_RECIPIENT_SECTION);
        bytes.extend_from_slice(&[0; 8]);

        let payload = LegacyPayloadEncoder.decode(&bytes).unwrap();
        assert!(payload.recipient_keys().is_empty());
        assert_eq!(payload.privacy_mode(), PrivacyMode::StandardPrivate);
    }

    #[test]
    fn test_party_protection_tail_layout() {
        let payload = base()
            .privacy_mode(PrivacyMode::PartyProtection)
            .affected_contract_transaction(
                TxHash::new(b"test".to_vec()),
                SecurityHash::new(b"test".to_vec()),
            )
            .build()
            .unwrap();

        let encoded = LegacyPayloadEncoder.encode(&payload).unwrap();
        let tail: &[u8] = &[
            0, 0, 0, 0, 0, 0, 0, 0, // no recipient keys
            0, 0, 0, 0, 0, 0, 0, 1, 1, // privacy flag
            0, 0, 0, 0, 0, 0, 0, 1, // one affected transaction
            0, 0, 0, 0, 0, 0, 0, 4, 116, 101, 115, 116, // tx hash
            0, 0, 0, 0, 0, 0, 0, 4, 116, 101, 115, 116, // security hash
        ];
        assert!(encoded.ends_with(tail));

        let decoded = LegacyPayloadEncoder.decode(&encoded).unwrap();
        assert_eq!(decoded.affected_contract_transactions().len(), 1);
        let (_, security_hash) = decoded
            .affected_contract_transactions()
            .iter()
            .next()
            .unwrap();
        assert_eq!(security_hash.as_bytes(), b"test");
    }

    #[test]
    fn test_roundtrip_every_mode() {
        let group = PrivacyGroupId::new(b"group".to_vec());
        let payloads = [
            base()
                .recipient_key(key(9))
                .recipient_box(RecipientBox::new(b"box".to_vec()))
                .build()
                .unwrap(),
            base()
                .privacy_mode(PrivacyMode::PrivateStateValidation)
                .exec_hash(b"exec".to_vec())
                .privacy_group_id(group.clone())
                .build()
                .unwrap(),
            base()
                .privacy_mode(PrivacyMode::MandatoryRecipients)
                .mandatory_recipients([key(4), key(5)])
                .privacy_group_id(group)
                .build()
                .unwrap(),
        ];

        for payload in payloads {
            let encoded = LegacyPayloadEncoder.encode(&payload).unwrap();
            assert_eq!(LegacyPayloadEncoder.decode(&encoded).unwrap(), payload);
        }
    }

    #[test]
    fn test_empty_group_id_roundtrips_as_absent() {
        let payload = base()
            .privacy_mode(PrivacyMode::PrivateStateValidation)
            .exec_hash(b"exec".to_vec())
            .privacy_group_id(PrivacyGroupId::new(Vec::new()))
            .build()
            .unwrap();
        assert!(payload.privacy_group_id().is_none());

        let encoded = LegacyPayloadEncoder.encode(&payload).unwrap();
        assert_eq!(LegacyPayloadEncoder.decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_truncated_mandatory_prefix_is_malformed() {
        let bytes = unsigned(NO_RECIPIENT_SECTION);
        let result = LegacyPayloadEncoder.decode(&bytes[..60]);
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_wrong_sender_length_is_malformed() {
        let mut writer = FieldWriter::new();
        writer.put_field(&[1u8; 16]);
        let result = LegacyPayloadEncoder.decode(&writer.finish());
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_unknown_flag_decodes_as_standard_private() {
        let payload = base().build().unwrap();
        let mut encoded = LegacyPayloadEncoder.encode(&payload).unwrap();

        // Flag byte sits just before the 8-byte affected count.
        let flag_index = encoded.len() - 9;
        encoded[flag_index] = 7;

        let decoded = LegacyPayloadEncoder.decode(&encoded).unwrap();
        assert_eq!(decoded.privacy_mode(), PrivacyMode::StandardPrivate);
    }
}
