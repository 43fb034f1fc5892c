// ============================================
// File: crates/tessera-core/src/codec/cbor.rs
// ============================================
//! # CBOR Codec
//!
//! ## Creation Reason
//! Newer peers exchange payloads as a single CBOR map keyed by field
//! name, so fields can be added without breaking older decoders.
//!
//! ## Wire Format
//! | Key              | CBOR type                       |
//! |------------------|---------------------------------|
//! | `sender`         | bytes                           |
//! | `cipherText`     | bytes                           |
//! | `nonce`          | bytes                           |
//! | `recipientNonce` | bytes                           |
//! | `recipientBoxes` | array of bytes                  |
//! | `recipients`     | array of bytes                  |
//! | `privacyFlag`    | integer                         |
//! | `affected`       | map: Base64 tx hash -> bytes    |
//! | `execHash`       | bytes                           |
//! | `mandatoryFor`   | array of bytes                  |
//! | `privacyGroupId` | bytes (empty when absent)       |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Keys are read by name; unknown keys are ignored
//! - Only the first four keys are required on decode
//!
//! ## Last Modified
//! v0.1.0 - Initial CBOR codec

use std::collections::BTreeMap;

use ciborium::value::{Integer, Value};

use tessera_common::{CommonError, PublicKey};

use super::{EncodedPayloadCodec, PayloadEncoder};
use crate::error::{CoreError, Result};
use crate::payload::{EncodedPayload, PrivacyMode, RecipientBox, SecurityHash, TxHash};
use crate::privacy_group::PrivacyGroupId;

// ============================================
// Map Keys
// ============================================

const SENDER: &str = "sender";
const CIPHER_TEXT: &str = "cipherText";
const NONCE: &str = "nonce";
const RECIPIENT_NONCE: &str = "recipientNonce";
const RECIPIENT_BOXES: &str = "recipientBoxes";
const RECIPIENTS: &str = "recipients";
const PRIVACY_FLAG: &str = "privacyFlag";
const AFFECTED: &str = "affected";
const EXEC_HASH: &str = "execHash";
const MANDATORY_FOR: &str = "mandatoryFor";
const PRIVACY_GROUP_ID: &str = "privacyGroupId";

/// CBOR map payload codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct CborPayloadEncoder;

impl CborPayloadEncoder {
    /// Creates a new CBOR codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

// ============================================
// Value Helpers
// ============================================

fn entry(key: &str, value: Value) -> (Value, Value) {
    (Value::Text(key.to_owned()), value)
}

fn byte_array<'a>(items: impl IntoIterator<Item = &'a [u8]>) -> Value {
    Value::Array(items.into_iter().map(|b| Value::Bytes(b.to_vec())).collect())
}

fn expect_bytes(value: Value, key: &str) -> Result<Vec<u8>> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(CoreError::malformed(format!(
            "'{key}' must be a byte string, got {other:?}"
        ))),
    }
}

fn expect_byte_array(value: Value, key: &str) -> Result<Vec<Vec<u8>>> {
    match value {
        Value::Array(items) => items.into_iter().map(|v| expect_bytes(v, key)).collect(),
        _ => Err(CoreError::malformed(format!("'{key}' must be an array"))),
    }
}

fn expect_keys(value: Value, key: &str) -> Result<Vec<PublicKey>> {
    expect_byte_array(value, key)?
        .iter()
        .map(|bytes| {
            PublicKey::from_bytes(bytes)
                .map_err(|e| CoreError::malformed(format!("invalid key in '{key}': {e}")))
        })
        .collect()
}

/// Field lookup over a decoded top-level map.
struct Fields(BTreeMap<String, Value>);

impl Fields {
    fn from_value(value: Value) -> Result<Self> {
        let Value::Map(entries) = value else {
            return Err(CoreError::malformed("payload is not a CBOR map"));
        };

        let fields = entries
            .into_iter()
            .filter_map(|(k, v)| match k {
                Value::Text(name) => Some((name, v)),
                _ => None,
            })
            .collect();
        Ok(Self(fields))
    }

    fn required_bytes(&mut self, key: &str) -> Result<Vec<u8>> {
        let value = self
            .0
            .remove(key)
            .ok_or_else(|| CoreError::malformed(format!("missing '{key}'")))?;
        expect_bytes(value, key)
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }
}

fn decode_affected(value: Value) -> Result<BTreeMap<TxHash, SecurityHash>> {
    let Value::Map(entries) = value else {
        return Err(CoreError::malformed(format!("'{AFFECTED}' must be a map")));
    };

    entries
        .into_iter()
        .map(|(k, v)| {
            let Value::Text(tx_hash) = k else {
                return Err(CoreError::malformed("affected transaction key must be text"));
            };
            let tx_hash = TxHash::from_base64(&tx_hash)
                .map_err(|e| CoreError::malformed(format!("affected transaction key: {e}")))?;
            Ok((tx_hash, SecurityHash::new(expect_bytes(v, AFFECTED)?)))
        })
        .collect()
}

// ============================================
// PayloadEncoder Implementation
// ============================================

impl PayloadEncoder for CborPayloadEncoder {
    fn encode(&self, payload: &EncodedPayload) -> Result<Vec<u8>> {
        let affected = payload
            .affected_contract_transactions()
            .iter()
            .map(|(tx, sec)| (Value::Text(tx.to_base64()), Value::Bytes(sec.as_bytes().to_vec())))
            .collect();

        let group_id = payload
            .privacy_group_id()
            .map(|id| id.as_bytes().to_vec())
            .unwrap_or_default();

        let map = Value::Map(vec![
            entry(SENDER, Value::Bytes(payload.sender_key().as_bytes().to_vec())),
            entry(CIPHER_TEXT, Value::Bytes(payload.cipher_text().to_vec())),
            entry(NONCE, Value::Bytes(payload.cipher_text_nonce().as_bytes().to_vec())),
            entry(RECIPIENT_NONCE, Value::Bytes(payload.recipient_nonce().as_bytes().to_vec())),
            entry(
                RECIPIENT_BOXES,
                byte_array(payload.recipient_boxes().iter().map(RecipientBox::as_bytes)),
            ),
            entry(
                RECIPIENTS,
                byte_array(payload.recipient_keys().iter().map(|k| k.as_bytes().as_slice())),
            ),
            entry(
                PRIVACY_FLAG,
                Value::Integer(Integer::from(payload.privacy_mode().flag())),
            ),
            entry(AFFECTED, Value::Map(affected)),
            entry(EXEC_HASH, Value::Bytes(payload.exec_hash().to_vec())),
            entry(
                MANDATORY_FOR,
                byte_array(
                    payload
                        .mandatory_recipients()
                        .iter()
                        .map(|k| k.as_bytes().as_slice()),
                ),
            ),
            entry(PRIVACY_GROUP_ID, Value::Bytes(group_id)),
        ]);

        let mut buffer = Vec::new();
        ciborium::into_writer(&map, &mut buffer)
            .map_err(|e| CommonError::encoding("cbor payload", e.to_string()))?;
        Ok(buffer)
    }

    fn decode(&self, bytes: &[u8]) -> Result<EncodedPayload> {
        let value: Value = ciborium::from_reader(bytes)
            .map_err(|e| CoreError::malformed(format!("invalid CBOR: {e}")))?;
        let mut fields = Fields::from_value(value)?;

        let sender = PublicKey::from_bytes(&fields.required_bytes(SENDER)?)
            .map_err(|e| CoreError::malformed(format!("invalid sender key: {e}")))?;

        let mut builder = EncodedPayload::builder()
            .sender_key(sender)
            .cipher_text(fields.required_bytes(CIPHER_TEXT)?)
            .cipher_text_nonce(fields.required_bytes(NONCE)?)
            .recipient_nonce(fields.required_bytes(RECIPIENT_NONCE)?);

        if let Some(value) = fields.take(RECIPIENT_BOXES) {
            let boxes = expect_byte_array(value, RECIPIENT_BOXES)?;
            builder = builder.recipient_boxes(boxes.into_iter().map(RecipientBox::new).collect());
        }

        if let Some(value) = fields.take(RECIPIENTS) {
            builder = builder.recipient_keys(expect_keys(value, RECIPIENTS)?);
        }

        if let Some(value) = fields.take(PRIVACY_FLAG) {
            let Value::Integer(flag) = value else {
                return Err(CoreError::malformed(format!(
                    "'{PRIVACY_FLAG}' must be an integer"
                )));
            };
            builder = builder.privacy_mode(PrivacyMode::from_wire(i128::from(flag)));
        }

        if let Some(value) = fields.take(AFFECTED) {
            builder = builder.affected_contract_transactions(decode_affected(value)?);
        }

        if let Some(value) = fields.take(EXEC_HASH) {
            builder = builder.exec_hash(expect_bytes(value, EXEC_HASH)?);
        }

        if let Some(value) = fields.take(MANDATORY_FOR) {
            builder = builder.mandatory_recipients(expect_keys(value, MANDATORY_FOR)?);
        }

        if let Some(value) = fields.take(PRIVACY_GROUP_ID) {
            let group_id = expect_bytes(value, PRIVACY_GROUP_ID)?;
            if !group_id.is_empty() {
                builder = builder.privacy_group_id(PrivacyGroupId::new(group_id));
            }
        }

        builder.build()
    }

    fn codec(&self) -> EncodedPayloadCodec {
        EncodedPayloadCodec::Cbor
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

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

    fn encode_value(value: &Value) -> Vec<u8> {
        let mut buffer = Vec::new();
        ciborium::into_writer(value, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_roundtrip_every_mode() {
        let payloads = [
            base()
                .recipient_keys(vec![key(7), key(8)])
                .recipient_boxes(vec![
                    RecipientBox::new(b"b7".to_vec()),
                    RecipientBox::new(b"b8".to_vec()),
                ])
                .build()
                .unwrap(),
            base()
                .privacy_mode(PrivacyMode::PartyProtection)
                .affected_contract_transaction(
                    TxHash::new(b"test".to_vec()),
                    SecurityHash::new(b"test".to_vec()),
                )
                .build()
                .unwrap(),
            base()
                .privacy_mode(PrivacyMode::MandatoryRecipients)
                .mandatory_recipients([key(4)])
                .build()
                .unwrap(),
            base()
                .privacy_mode(PrivacyMode::PrivateStateValidation)
                .exec_hash(b"exec".to_vec())
                .privacy_group_id(PrivacyGroupId::new(b"group".to_vec()))
                .build()
                .unwrap(),
        ];

        for payload in payloads {
            let encoded = CborPayloadEncoder.encode(&payload).unwrap();
            assert!((0xA0..=0xBF).contains(&encoded[0]));
            assert_eq!(CborPayloadEncoder.decode(&encoded).unwrap(), payload);
        }
    }

    #[test]
    fn test_empty_group_id_roundtrips_as_absent() {
        let payload = base()
            .privacy_group_id(PrivacyGroupId::new(Vec::new()))
            .build()
            .unwrap();
        assert!(payload.privacy_group_id().is_none());

        let encoded = CborPayloadEncoder.encode(&payload).unwrap();
        assert_eq!(CborPayloadEncoder.decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_missing_newer_keys_take_defaults() {
        let value = Value::Map(vec![
            entry(SENDER, Value::Bytes(vec![1u8; 32])),
            entry(CIPHER_TEXT, Value::Bytes(b"cipher".to_vec())),
            entry(NONCE, Value::Bytes(vec![2u8; 24])),
            entry(RECIPIENT_NONCE, Value::Bytes(vec![3u8; 24])),
            entry("futureField", Value::Bool(true)),
        ]);

        let payload = CborPayloadEncoder.decode(&encode_value(&value)).unwrap();
        assert_eq!(payload.privacy_mode(), PrivacyMode::StandardPrivate);
        assert!(payload.recipient_keys().is_empty());
        assert!(payload.affected_contract_transactions().is_empty());
        assert!(payload.privacy_group_id().is_none());
    }

    #[test]
    fn test_missing_core_key_is_malformed() {
        let value = Value::Map(vec![entry(SENDER, Value::Bytes(vec![1u8; 32]))]);
        let result = CborPayloadEncoder.decode(&encode_value(&value));
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_wrong_value_type_is_malformed() {
        let value = Value::Map(vec![
            entry(SENDER, Value::Bytes(vec![1u8; 32])),
            entry(CIPHER_TEXT, Value::Text("not bytes".into())),
            entry(NONCE, Value::Bytes(vec![2u8; 24])),
            entry(RECIPIENT_NONCE, Value::Bytes(vec![3u8; 24])),
        ]);
        let result = CborPayloadEncoder.decode(&encode_value(&value));
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_non_map_is_malformed() {
        let value = Value::Array(vec![Value::Bytes(vec![1u8; 32])]);
        let result = CborPayloadEncoder.decode(&encode_value(&value));
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));

        let result = CborPayloadEncoder.decode(&[0xFF, 0x00]);
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_unknown_flag_is_standard_private() {
        let value = Value::Map(vec![
            entry(SENDER, Value::Bytes(vec![1u8; 32])),
            entry(CIPHER_TEXT, Value::Bytes(b"cipher".to_vec())),
            entry(NONCE, Value::Bytes(vec![2u8; 24])),
            entry(RECIPIENT_NONCE, Value::Bytes(vec![3u8; 24])),
            entry(PRIVACY_FLAG, Value::Integer(Integer::from(42u8))),
        ]);
        let payload = CborPayloadEncoder.decode(&encode_value(&value)).unwrap();
        assert_eq!(payload.privacy_mode(), PrivacyMode::StandardPrivate);
    }
}
