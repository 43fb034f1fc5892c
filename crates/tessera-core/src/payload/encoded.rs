// ============================================
// File: crates/tessera-core/src/payload/encoded.rs
// ============================================
//! # Encoded Payload
//!
//! ## Creation Reason
//! The wire-level representation of an encrypted private transaction.
//! Every codec produces and consumes this type, and the enclave builds
//! it when encrypting.
//!
//! ## Main Functionality
//! - `EncodedPayload`: Immutable payload with read-only accessors
//! - `EncodedPayloadBuilder`: Fluent construction validated in `build()`
//!
//! ## Payload Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ sender_key            │ who encrypted the transaction       │
//! │ cipher_text           │ payload sealed under the master key │
//! │ cipher_text_nonce     │ nonce of the cipher text            │
//! │ recipient_boxes[i] ◄──┼──► recipient_keys[i]                │
//! │ recipient_nonce       │ nonce shared by all boxes           │
//! │ privacy_mode          │ drives the optional fields below    │
//! │ affected txs          │ TxHash -> SecurityHash              │
//! │ exec_hash             │ PRIVATE_STATE_VALIDATION only       │
//! │ mandatory_recipients  │ MANDATORY_RECIPIENTS only           │
//! │ privacy_group_id      │ optional                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Payloads are never mutated; transformations go through the builder
//! - `build()` is the only place the mode invariants are checked
//! - Box/key pairing is positional; keep both lists in step
//!
//! ## Last Modified
//! v0.1.0 - Initial payload model

use std::collections::{BTreeMap, BTreeSet};

use tessera_common::{Nonce, PublicKey};

use super::privacy_mode::PrivacyMode;
use super::values::{RecipientBox, SecurityHash, TxHash};
use crate::error::{CoreError, Result};
use crate::privacy_group::PrivacyGroupId;

// ============================================
// EncodedPayload
// ============================================

/// Encrypted transaction as exchanged between nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    sender_key: PublicKey,
    cipher_text: Vec<u8>,
    cipher_text_nonce: Nonce,
    recipient_boxes: Vec<RecipientBox>,
    recipient_nonce: Nonce,
    recipient_keys: Vec<PublicKey>,
    privacy_mode: PrivacyMode,
    affected_contract_transactions: BTreeMap<TxHash, SecurityHash>,
    exec_hash: Vec<u8>,
    mandatory_recipients: BTreeSet<PublicKey>,
    privacy_group_id: Option<PrivacyGroupId>,
}

impl EncodedPayload {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> EncodedPayloadBuilder {
        EncodedPayloadBuilder::default()
    }

    /// Starts a builder pre-filled with this payload's fields.
    #[must_use]
    pub fn to_builder(&self) -> EncodedPayloadBuilder {
        EncodedPayloadBuilder::from(self)
    }

    /// Sender's static public key.
    #[must_use]
    pub const fn sender_key(&self) -> &PublicKey {
        &self.sender_key
    }

    /// Payload sealed under the master key.
    #[must_use]
    pub fn cipher_text(&self) -> &[u8] {
        &self.cipher_text
    }

    /// Nonce used to seal the cipher text.
    #[must_use]
    pub const fn cipher_text_nonce(&self) -> &Nonce {
        &self.cipher_text_nonce
    }

    /// Master key boxes, positionally paired with [`Self::recipient_keys`].
    #[must_use]
    pub fn recipient_boxes(&self) -> &[RecipientBox] {
        &self.recipient_boxes
    }

    /// Nonce used for every recipient box.
    #[must_use]
    pub const fn recipient_nonce(&self) -> &Nonce {
        &self.recipient_nonce
    }

    /// Recipient public keys in box order.
    #[must_use]
    pub fn recipient_keys(&self) -> &[PublicKey] {
        &self.recipient_keys
    }

    /// Privacy mode of the transaction.
    #[must_use]
    pub const fn privacy_mode(&self) -> PrivacyMode {
        self.privacy_mode
    }

    /// Affected contract transactions and their security hashes.
    #[must_use]
    pub const fn affected_contract_transactions(&self) -> &BTreeMap<TxHash, SecurityHash> {
        &self.affected_contract_transactions
    }

    /// Execution hash; non-empty only for private state validation.
    #[must_use]
    pub fn exec_hash(&self) -> &[u8] {
        &self.exec_hash
    }

    /// Recipients that must be included; non-empty only for mandatory
    /// recipients mode.
    #[must_use]
    pub const fn mandatory_recipients(&self) -> &BTreeSet<PublicKey> {
        &self.mandatory_recipients
    }

    /// Privacy group the transaction belongs to, if any.
    #[must_use]
    pub const fn privacy_group_id(&self) -> Option<&PrivacyGroupId> {
        self.privacy_group_id.as_ref()
    }

    /// Returns the index of `key` in the recipient list.
    #[must_use]
    pub fn recipient_index(&self, key: &PublicKey) -> Option<usize> {
        self.recipient_keys.iter().position(|k| k == key)
    }

    /// Copy with a different recipient view. Neither list takes part in
    /// the mode invariants, so no revalidation is needed.
    pub(crate) fn with_recipient_view(
        &self,
        recipient_keys: Vec<PublicKey>,
        recipient_boxes: Vec<RecipientBox>,
    ) -> Self {
        Self {
            recipient_keys,
            recipient_boxes,
            ..self.clone()
        }
    }
}

// ============================================
// EncodedPayloadBuilder
// ============================================

/// Builder for [`EncodedPayload`].
///
/// # Example
/// ```
/// use tessera_common::{Nonce, PublicKey};
/// use tessera_core::payload::{EncodedPayload, PrivacyMode};
///
/// let payload = EncodedPayload::builder()
///     .sender_key(PublicKey::new([1u8; 32]))
///     .cipher_text(b"sealed".to_vec())
///     .cipher_text_nonce(Nonce::new(vec![0u8; 24]))
///     .recipient_nonce(Nonce::new(vec![0u8; 24]))
///     .privacy_mode(PrivacyMode::PartyProtection)
///     .build()
///     .unwrap();
/// assert_eq!(payload.privacy_mode(), PrivacyMode::PartyProtection);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncodedPayloadBuilder {
    sender_key: Option<PublicKey>,
    cipher_text: Vec<u8>,
    cipher_text_nonce: Nonce,
    recipient_boxes: Vec<RecipientBox>,
    recipient_nonce: Nonce,
    recipient_keys: Vec<PublicKey>,
    privacy_mode: PrivacyMode,
    affected_contract_transactions: BTreeMap<TxHash, SecurityHash>,
    exec_hash: Vec<u8>,
    mandatory_recipients: BTreeSet<PublicKey>,
    privacy_group_id: Option<PrivacyGroupId>,
}

impl EncodedPayloadBuilder {
    /// Sets the sender key.
    #[must_use]
    pub fn sender_key(mut self, key: PublicKey) -> Self {
        self.sender_key = Some(key);
        self
    }

    /// Sets the cipher text.
    #[must_use]
    pub fn cipher_text(mut self, cipher_text: impl Into<Vec<u8>>) -> Self {
        self.cipher_text = cipher_text.into();
        self
    }

    /// Sets the cipher text nonce.
    #[must_use]
    pub fn cipher_text_nonce(mut self, nonce: impl Into<Nonce>) -> Self {
        self.cipher_text_nonce = nonce.into();
        self
    }

    /// Replaces all recipient boxes.
    #[must_use]
    pub fn recipient_boxes(mut self, boxes: Vec<RecipientBox>) -> Self {
        self.recipient_boxes = boxes;
        self
    }

    /// Appends one recipient box.
    #[must_use]
    pub fn recipient_box(mut self, recipient_box: RecipientBox) -> Self {
        self.recipient_boxes.push(recipient_box);
        self
    }

    /// Sets the recipient nonce.
    #[must_use]
    pub fn recipient_nonce(mut self, nonce: impl Into<Nonce>) -> Self {
        self.recipient_nonce = nonce.into();
        self
    }

    /// Replaces all recipient keys.
    #[must_use]
    pub fn recipient_keys(mut self, keys: Vec<PublicKey>) -> Self {
        self.recipient_keys = keys;
        self
    }

    /// Appends one recipient key.
    #[must_use]
    pub fn recipient_key(mut self, key: PublicKey) -> Self {
        self.recipient_keys.push(key);
        self
    }

    /// Sets the privacy mode.
    #[must_use]
    pub fn privacy_mode(mut self, mode: PrivacyMode) -> Self {
        self.privacy_mode = mode;
        self
    }

    /// Replaces the affected contract transactions.
    #[must_use]
    pub fn affected_contract_transactions(
        mut self,
        affected: BTreeMap<TxHash, SecurityHash>,
    ) -> Self {
        self.affected_contract_transactions = affected;
        self
    }

    /// Adds one affected contract transaction.
    #[must_use]
    pub fn affected_contract_transaction(mut self, tx: TxHash, hash: SecurityHash) -> Self {
        self.affected_contract_transactions.insert(tx, hash);
        self
    }

    /// Sets the execution hash.
    #[must_use]
    pub fn exec_hash(mut self, exec_hash: impl Into<Vec<u8>>) -> Self {
        self.exec_hash = exec_hash.into();
        self
    }

    /// Replaces the mandatory recipients.
    #[must_use]
    pub fn mandatory_recipients(mut self, keys: impl IntoIterator<Item = PublicKey>) -> Self {
        self.mandatory_recipients = keys.into_iter().collect();
        self
    }

    /// Sets or clears the privacy group id. An empty id clears it.
    #[must_use]
    pub fn privacy_group_id(mut self, id: impl Into<Option<PrivacyGroupId>>) -> Self {
        self.privacy_group_id = id.into().filter(|id| !id.as_bytes().is_empty());
        self
    }

    /// Validates and builds the payload.
    ///
    /// # Errors
    /// Returns `MalformedPayload` when:
    /// - no sender key was set
    /// - the execution hash is present without private state
    ///   validation, or missing with it
    /// - mandatory recipients are present without mandatory recipients
    ///   mode, or missing with it
    pub fn build(self) -> Result<EncodedPayload> {
        let sender_key = self
            .sender_key
            .ok_or_else(|| CoreError::malformed("sender key is required"))?;

        validate_mode(self.privacy_mode, &self.exec_hash, &self.mandatory_recipients)?;

        Ok(EncodedPayload {
            sender_key,
            cipher_text: self.cipher_text,
            cipher_text_nonce: self.cipher_text_nonce,
            recipient_boxes: self.recipient_boxes,
            recipient_nonce: self.recipient_nonce,
            recipient_keys: self.recipient_keys,
            privacy_mode: self.privacy_mode,
            affected_contract_transactions: self.affected_contract_transactions,
            exec_hash: self.exec_hash,
            mandatory_recipients: self.mandatory_recipients,
            privacy_group_id: self.privacy_group_id,
        })
    }
}

impl From<&EncodedPayload> for EncodedPayloadBuilder {
    fn from(payload: &EncodedPayload) -> Self {
        Self {
            sender_key: Some(payload.sender_key),
            cipher_text: payload.cipher_text.clone(),
            cipher_text_nonce: payload.cipher_text_nonce.clone(),
            recipient_boxes: payload.recipient_boxes.clone(),
            recipient_nonce: payload.recipient_nonce.clone(),
            recipient_keys: payload.recipient_keys.clone(),
            privacy_mode: payload.privacy_mode,
            affected_contract_transactions: payload.affected_contract_transactions.clone(),
            exec_hash: payload.exec_hash.clone(),
            mandatory_recipients: payload.mandatory_recipients.clone(),
            privacy_group_id: payload.privacy_group_id.clone(),
        }
    }
}

/// Checks the mode-dependent field invariants shared by the payload and
/// privacy metadata builders.
///
/// # Errors
/// Returns `MalformedPayload` on violation.
pub(crate) fn validate_mode(
    mode: PrivacyMode,
    exec_hash: &[u8],
    mandatory_recipients: &BTreeSet<PublicKey>,
) -> Result<()> {
    let is_psv = mode == PrivacyMode::PrivateStateValidation;
    if is_psv == exec_hash.is_empty() {
        return Err(CoreError::malformed(if is_psv {
            "exec hash is required for private state validation"
        } else {
            "exec hash is only allowed for private state validation"
        }));
    }

    let is_mr = mode == PrivacyMode::MandatoryRecipients;
    if is_mr == mandatory_recipients.is_empty() {
        return Err(CoreError::malformed(if is_mr {
            "mandatory recipients are required for mandatory recipients mode"
        } else {
            "mandatory recipients are only allowed for mandatory recipients mode"
        }));
    }

    Ok(())
}

// ============================================
// Tests
// ============================================
