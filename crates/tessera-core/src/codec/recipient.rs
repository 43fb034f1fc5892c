// ============================================
// File: crates/tessera-core/src/codec/recipient.rs
// ============================================
//! # Recipient Views
//!
//! ## Creation Reason
//! A payload is stripped down before it is pushed to a recipient, and a
//! payload received without recipients is tagged with the local key.
//! Both are pure transformations shared by every codec.
//!
//! ## ⚠️ Important Note for Next Developer
//! - No cryptography happens here; boxes are moved, never resealed
//! - Private state validation keeps every recipient key, reordered so
//!   the target recipient is first
//!
//! ## Last Modified
//! v0.1.0 - Initial recipient views

use tessera_common::PublicKey;

use crate::error::{CoreError, Result};
use crate::payload::{EncodedPayload, PrivacyMode};

/// Strips `payload` to what `recipient` needs.
///
/// Keeps only the recipient's own box. The key list becomes
/// `[recipient]`, or under private state validation the full list with
/// `recipient` moved to the front.
///
/// # Errors
/// - `InvalidRecipient`: `recipient` is not in the payload's key list
/// - `MalformedPayload`: the payload has no box at the recipient's index
pub fn for_recipient(payload: &EncodedPayload, recipient: &PublicKey) -> Result<EncodedPayload> {
    let index = payload
        .recipient_index(recipient)
        .ok_or(CoreError::InvalidRecipient { key: *recipient })?;

    let recipient_box = payload.recipient_boxes().get(index).cloned().ok_or_else(|| {
        CoreError::malformed(format!("no recipient box at index {index} for {recipient}"))
    })?;

    let keys = if payload.privacy_mode() == PrivacyMode::PrivateStateValidation {
        std::iter::once(*recipient)
            .chain(payload.recipient_keys().iter().filter(|k| *k != recipient).copied())
            .collect()
    } else {
        vec![*recipient]
    };

    Ok(payload.with_recipient_view(keys, vec![recipient_box]))
}

/// Tags a payload that has no recipient keys with `recipient`.
///
/// A payload that already has recipient keys is returned unchanged.
#[must_use]
pub fn with_recipient(payload: &EncodedPayload, recipient: &PublicKey) -> EncodedPayload {
    if payload.recipient_keys().is_empty() {
        payload.with_recipient_view(vec![*recipient], payload.recipient_boxes().to_vec())
    } else {
        payload.clone()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::RecipientBox;

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    fn payload(mode: PrivacyMode) -> EncodedPayload {
        let mut builder = EncodedPayload::builder()
            .sender_key(key(1))
            .cipher_text(b"cipher".to_vec())
            .cipher_text_nonce(vec![0u8; 24])
            .recipient_nonce(vec![1u8; 24])
            .recipient_keys(vec![key(0xA), key(0xB), key(0xC)])
            .recipient_boxes(vec![
                RecipientBox::new(b"boxA".to_vec()),
                RecipientBox::new(b"boxB".to_vec()),
                RecipientBox::new(b"boxC".to_vec()),
            ])
            .privacy_mode(mode);
        if mode == PrivacyMode::PrivateStateValidation {
            builder = builder.exec_hash(b"exec".to_vec());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_for_recipient_keeps_only_own_box() {
        let original = payload(PrivacyMode::StandardPrivate);
        let stripped = for_recipient(&original, &key(0xB)).unwrap();

        assert_eq!(stripped.recipient_keys(), &[key(0xB)]);
        assert_eq!(stripped.recipient_boxes(), &[RecipientBox::new(b"boxB".to_vec())]);
        assert_eq!(stripped.cipher_text(), original.cipher_text());
        assert_eq!(stripped.recipient_nonce(), original.recipient_nonce());
    }

    #[test]
    fn test_for_recipient_psv_reorders_keys() {
        let original = payload(PrivacyMode::PrivateStateValidation);
        let stripped = for_recipient(&original, &key(0xB)).unwrap();

        assert_eq!(stripped.recipient_keys(), &[key(0xB), key(0xA), key(0xC)]);
        assert_eq!(stripped.recipient_boxes(), &[RecipientBox::new(b"boxB".to_vec())]);
        assert_eq!(stripped.exec_hash(), b"exec");
    }

    #[test]
    fn test_for_unknown_recipient_fails() {
        let original = payload(PrivacyMode::StandardPrivate);
        let result = for_recipient(&original, &key(0xD));
        assert!(matches!(result, Err(CoreError::InvalidRecipient { .. })));
    }

    #[test]
    fn test_for_recipient_missing_box_is_malformed() {
        let original = payload(PrivacyMode::StandardPrivate)
            .to_builder()
            .recipient_boxes(vec![RecipientBox::new(b"boxA".to_vec())])
            .build()
            .unwrap();
        let result = for_recipient(&original, &key(0xC));
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }

    #[test]
    fn test_with_recipient_is_noop_when_keys_present() {
        let original = payload(PrivacyMode::StandardPrivate);
        assert_eq!(with_recipient(&original, &key(0xF)), original);
    }

    #[test]
    fn test_with_recipient_tags_empty_payload() {
        let original = payload(PrivacyMode::StandardPrivate)
            .to_builder()
            .recipient_keys(Vec::new())
            .build()
            .unwrap();
        let tagged = with_recipient(&original, &key(0xF));

        assert_eq!(tagged.recipient_keys(), &[key(0xF)]);
        assert_eq!(tagged.recipient_boxes(), original.recipient_boxes());
    }
}
