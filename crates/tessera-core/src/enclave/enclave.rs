// ============================================
// File: crates/tessera-core/src/enclave/enclave.rs
// ============================================
//! # Enclave
//!
//! ## Creation Reason
//! The enclave is the only component that dereferences private keys.
//! It encrypts payloads for recipients, decrypts received payloads and
//! reseals master keys for late-added recipients.
//!
//! ## Main Functionality
//! - `Enclave`: Capability exposed to the transaction layer
//! - `EnclaveImpl`: Implementation over an `Encryptor` and a `KeyManager`
//! - `Status`: Liveness reported to the factory
//!
//! ## Encrypt Flow
//! ```text
//! message ──seal(nonce, master_key)──► cipher_text
//!
//! for recipient in recipients:
//!     shared = compute_shared_key(recipient, priv(sender))
//!     box    = seal(master_key, recipient_nonce, shared)
//!
//! for (tx_hash, affected) in metadata.affected:
//!     security_hash = SHA3-512(cipher_text || affected.cipher_text
//!                              || master_key(affected))
//! ```
//!
//! ## Decrypt Roles
//! - Sender is local: we sent it, open box 0 with
//!   `compute_shared_key(recipient_keys[0], priv(sender))`
//! - Sender is remote: we received it, open box 0 with
//!   `compute_shared_key(sender, priv(local recipient))`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Received payloads MUST be stripped with `for_recipient` before
//!   `unencrypt_transaction`; only box 0 is ever opened
//! - Open failures are hard failures and are never retried here
//! - Never log keys other than public keys, never log plaintext
//!
//! ## Last Modified
//! v0.1.0 - Initial enclave implementation

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use tessera_common::{Nonce, PublicKey};

use super::key_manager::KeyManager;
use super::metadata::PrivacyMetadata;
use crate::crypto::digest::sha3_512;
use crate::crypto::{Encryptor, MasterKey};
use crate::error::{CoreError, Result};
use crate::payload::{EncodedPayload, RawTransaction, RecipientBox, SecurityHash, TxHash};

// ============================================
// Status
// ============================================

/// Liveness of an enclave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Ready to serve requests.
    Started,
    /// Not serving requests.
    Stopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => f.write_str("STARTED"),
            Self::Stopped => f.write_str("STOPPED"),
        }
    }
}

// ============================================
// Enclave Trait
// ============================================

/// Key-bearing operations on private transactions.
pub trait Enclave: Send + Sync {
    /// Returns the default sender key.
    fn default_public_key(&self) -> PublicKey;

    /// Returns keys that receive a copy of every transaction.
    fn forwarding_keys(&self) -> BTreeSet<PublicKey>;

    /// Returns every managed public key.
    fn public_keys(&self) -> BTreeSet<PublicKey>;

    /// Encrypts `message` from `sender` for `recipients`.
    ///
    /// Boxes are returned in the order of `recipients`.
    ///
    /// # Errors
    /// - `KeyNotFound`: `sender` is not managed here
    /// - `KeyExchange`: a recipient key is invalid
    /// - `MalformedPayload`: metadata violates the mode rules
    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetadata,
    ) -> Result<EncodedPayload>;

    /// Completes a raw transaction for `recipients`.
    ///
    /// # Errors
    /// - `KeyNotFound`: the raw sender is not managed here
    /// - `CryptoOpenFailure`: the self-sealed key cannot be opened
    fn encrypt_payload_from_raw(
        &self,
        raw: &RawTransaction,
        recipients: &[PublicKey],
        metadata: &PrivacyMetadata,
    ) -> Result<EncodedPayload>;

    /// Encrypts `message` with the master key sealed to `sender` itself.
    ///
    /// # Errors
    /// `KeyNotFound` if `sender` is not managed here.
    fn encrypt_raw_payload(&self, message: &[u8], sender: &PublicKey) -> Result<RawTransaction>;

    /// Decrypts a payload.
    ///
    /// When the payload was received, it must already be stripped to the
    /// local recipient's box and `local_recipient` names the local key
    /// that box was sealed for. It is ignored for locally sent payloads.
    ///
    /// # Errors
    /// - `MissingRecipientData`: no box, no recipient key, or no local
    ///   key for a received payload
    /// - `KeyNotFound`: the key to use is not managed here
    /// - `CryptoOpenFailure`: wrong key or tampered data
    fn unencrypt_transaction(
        &self,
        payload: &EncodedPayload,
        local_recipient: Option<&PublicKey>,
    ) -> Result<Vec<u8>>;

    /// Decrypts a raw transaction staged by this node.
    ///
    /// # Errors
    /// - `KeyNotFound`: the raw sender is not managed here
    /// - `CryptoOpenFailure`: wrong key or tampered data
    fn unencrypt_raw_payload(&self, raw: &RawTransaction) -> Result<Vec<u8>>;

    /// Seals the payload's master key for `new_recipient` under the
    /// payload's recipient nonce.
    ///
    /// # Errors
    /// - `MissingRecipientData`: the payload has no key or box to use
    /// - `KeyNotFound`: the sender is not managed here
    /// - `CryptoOpenFailure`: the first box cannot be opened
    fn create_new_recipient_box(
        &self,
        payload: &EncodedPayload,
        new_recipient: &PublicKey,
    ) -> Result<RecipientBox>;

    /// Returns the affected transactions declared by `payload` whose
    /// security hash is missing from `affected` or does not match.
    ///
    /// # Errors
    /// Fails if the master key of a supplied affected transaction cannot
    /// be recovered.
    fn find_invalid_security_hashes(
        &self,
        payload: &EncodedPayload,
        affected: &BTreeMap<TxHash, EncodedPayload>,
    ) -> Result<BTreeSet<TxHash>>;

    /// Returns the liveness status.
    fn status(&self) -> Status;
}

// ============================================
// EnclaveImpl
// ============================================

/// In-process enclave.
///
/// # Thread Safety
/// Holds only shared read-only capabilities; every call is independent.
pub struct EnclaveImpl {
    encryptor: Arc<dyn Encryptor>,
    key_manager: Arc<dyn KeyManager>,
}

impl EnclaveImpl {
    /// Creates an enclave over the given capabilities.
    pub fn new(encryptor: Arc<dyn Encryptor>, key_manager: Arc<dyn KeyManager>) -> Self {
        Self {
            encryptor,
            key_manager,
        }
    }

    fn open_master_key(
        &self,
        sealed: &[u8],
        nonce: &Nonce,
        public: &PublicKey,
        owner: &PublicKey,
    ) -> Result<MasterKey> {
        let private = self.key_manager.private_key_for(owner)?;
        let shared = self.encryptor.compute_shared_key(public, private)?;
        let bytes = self
            .encryptor
            .open_after_precomputation(sealed, nonce, &shared)?;
        MasterKey::from_slice(&bytes)
    }

    fn seal_for_recipients(
        &self,
        master_key: &MasterKey,
        sender: &PublicKey,
        recipients: &[PublicKey],
        recipient_nonce: &Nonce,
    ) -> Result<Vec<RecipientBox>> {
        let private = self.key_manager.private_key_for(sender)?;
        recipients
            .iter()
            .map(|recipient| {
                let shared = self.encryptor.compute_shared_key(recipient, private)?;
                let sealed = self.encryptor.seal_after_precomputation(
                    master_key.as_bytes(),
                    recipient_nonce,
                    &shared,
                )?;
                Ok(RecipientBox::new(sealed))
            })
            .collect()
    }

    /// Recovers the master key of `payload` from its first box.
    ///
    /// # Errors
    /// - `MalformedPayload`: the payload has no recipient box
    /// - `CryptoOpenFailure`: no local key opens the box
    pub fn master_key(&self, payload: &EncodedPayload) -> Result<MasterKey> {
        let first_box = payload.recipient_boxes().first().ok_or_else(|| {
            CoreError::malformed("an encoded payload should have at least one recipient box")
        })?;
        let sender = payload.sender_key();

        if self.key_manager.is_managed(sender) {
            let recipient = payload.recipient_keys().first().ok_or_else(|| {
                CoreError::missing_recipient_data("locally sent payload has no recipient key")
            })?;
            return self.open_master_key(
                first_box.as_bytes(),
                payload.recipient_nonce(),
                recipient,
                sender,
            );
        }

        for local in self.key_manager.public_keys() {
            match self.open_master_key(
                first_box.as_bytes(),
                payload.recipient_nonce(),
                sender,
                &local,
            ) {
                Ok(master_key) => return Ok(master_key),
                Err(e) => debug!(key = %local, error = %e, "Local key does not open box"),
            }
        }

        Err(CoreError::open_failure("unable to decrypt master key"))
    }

    fn security_hash(&self, cipher_text: &[u8], affected: &EncodedPayload) -> Result<SecurityHash> {
        let master_key = self.master_key(affected)?;
        let digest = sha3_512(&[
            cipher_text,
            affected.cipher_text(),
            master_key.as_bytes().as_slice(),
        ]);
        Ok(SecurityHash::new(digest.to_vec()))
    }

    fn security_hashes(
        &self,
        cipher_text: &[u8],
        metadata: &PrivacyMetadata,
    ) -> Result<BTreeMap<TxHash, SecurityHash>> {
        metadata
            .affected_contract_transactions()
            .iter()
            .map(|(hash, affected)| Ok((hash.clone(), self.security_hash(cipher_text, affected)?)))
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        sender: &PublicKey,
        cipher_text: Vec<u8>,
        cipher_text_nonce: Nonce,
        recipient_boxes: Vec<RecipientBox>,
        recipient_nonce: Nonce,
        recipients: &[PublicKey],
        metadata: &PrivacyMetadata,
    ) -> Result<EncodedPayload> {
        let affected = self.security_hashes(&cipher_text, metadata)?;

        EncodedPayload::builder()
            .sender_key(*sender)
            .cipher_text(cipher_text)
            .cipher_text_nonce(cipher_text_nonce)
            .recipient_boxes(recipient_boxes)
            .recipient_nonce(recipient_nonce)
            .recipient_keys(recipients.to_vec())
            .privacy_mode(metadata.privacy_mode())
            .affected_contract_transactions(affected)
            .exec_hash(metadata.exec_hash().to_vec())
            .mandatory_recipients(metadata.mandatory_recipients().iter().copied())
            .privacy_group_id(metadata.privacy_group_id().cloned())
            .build()
    }
}

impl Enclave for EnclaveImpl {
    fn default_public_key(&self) -> PublicKey {
        self.key_manager.default_public_key()
    }

    fn forwarding_keys(&self) -> BTreeSet<PublicKey> {
        self.key_manager.forwarding_keys()
    }

    fn public_keys(&self) -> BTreeSet<PublicKey> {
        self.key_manager.public_keys()
    }

    fn encrypt_payload(
        &self,
        message: &[u8],
        sender: &PublicKey,
        recipients: &[PublicKey],
        metadata: &PrivacyMetadata,
    ) -> Result<EncodedPayload> {
        debug!(
            sender = %sender,
            recipients = recipients.len(),
            mode = %metadata.privacy_mode(),
            "Encrypting payload"
        );

        let master_key = self.encryptor.create_master_key();
        let nonce = self.encryptor.random_nonce();
        let recipient_nonce = self.encryptor.random_nonce();

        let cipher_text = self
            .encryptor
            .seal_after_precomputation(message, &nonce, &master_key)?;
        let boxes = self.seal_for_recipients(&master_key, sender, recipients, &recipient_nonce)?;

        self.assemble(
            sender,
            cipher_text,
            nonce,
            boxes,
            recipient_nonce,
            recipients,
            metadata,
        )
    }

    fn encrypt_payload_from_raw(
        &self,
        raw: &RawTransaction,
        recipients: &[PublicKey],
        metadata: &PrivacyMetadata,
    ) -> Result<EncodedPayload> {
        let sender = raw.sender();
        debug!(
            sender = %sender,
            recipients = recipients.len(),
            mode = %metadata.privacy_mode(),
            "Completing raw transaction"
        );

        let master_key = self.open_master_key(raw.encrypted_key(), raw.nonce(), sender, sender)?;
        let recipient_nonce = self.encryptor.random_nonce();
        let boxes = self.seal_for_recipients(&master_key, sender, recipients, &recipient_nonce)?;

        self.assemble(
            sender,
            raw.encrypted_payload().to_vec(),
            raw.nonce().clone(),
            boxes,
            recipient_nonce,
            recipients,
            metadata,
        )
    }

    fn encrypt_raw_payload(&self, message: &[u8], sender: &PublicKey) -> Result<RawTransaction> {
        debug!(sender = %sender, "Encrypting raw payload");

        let private = self.key_manager.private_key_for(sender)?;
        let master_key = self.encryptor.create_master_key();
        let nonce = self.encryptor.random_nonce();

        let cipher_text = self
            .encryptor
            .seal_after_precomputation(message, &nonce, &master_key)?;

        let shared = self.encryptor.compute_shared_key(sender, private)?;
        let encrypted_key =
            self.encryptor
                .seal_after_precomputation(master_key.as_bytes(), &nonce, &shared)?;

        Ok(RawTransaction::new(cipher_text, encrypted_key, nonce, *sender))
    }

    fn unencrypt_transaction(
        &self,
        payload: &EncodedPayload,
        local_recipient: Option<&PublicKey>,
    ) -> Result<Vec<u8>> {
        let first_box = payload.recipient_boxes().first().ok_or_else(|| {
            CoreError::missing_recipient_data("payload has no recipient box")
        })?;
        let sender = payload.sender_key();

        let master_key = if self.key_manager.is_managed(sender) {
            let recipient = payload.recipient_keys().first().ok_or_else(|| {
                CoreError::missing_recipient_data("locally sent payload has no recipient key")
            })?;
            debug!(sender = %sender, recipient = %recipient, "Decrypting as sender");
            self.open_master_key(first_box.as_bytes(), payload.recipient_nonce(), recipient, sender)?
        } else {
            let local = local_recipient.ok_or_else(|| {
                CoreError::missing_recipient_data("a local recipient key is required")
            })?;
            debug!(sender = %sender, recipient = %local, "Decrypting as recipient");
            self.open_master_key(first_box.as_bytes(), payload.recipient_nonce(), sender, local)?
        };

        self.encryptor.open_after_precomputation(
            payload.cipher_text(),
            payload.cipher_text_nonce(),
            &master_key,
        )
    }

    fn unencrypt_raw_payload(&self, raw: &RawTransaction) -> Result<Vec<u8>> {
        let sender = raw.sender();
        let master_key = self.open_master_key(raw.encrypted_key(), raw.nonce(), sender, sender)?;
        self.encryptor
            .open_after_precomputation(raw.encrypted_payload(), raw.nonce(), &master_key)
    }

    fn create_new_recipient_box(
        &self,
        payload: &EncodedPayload,
        new_recipient: &PublicKey,
    ) -> Result<RecipientBox> {
        let (Some(first_key), Some(first_box)) =
            (payload.recipient_keys().first(), payload.recipient_boxes().first())
        else {
            return Err(CoreError::missing_recipient_data(
                "No key or recipient-box to use",
            ));
        };

        let sender = payload.sender_key();
        let master_key = self.open_master_key(
            first_box.as_bytes(),
            payload.recipient_nonce(),
            first_key,
            sender,
        )?;

        let mut boxes = self.seal_for_recipients(
            &master_key,
            sender,
            std::slice::from_ref(new_recipient),
            payload.recipient_nonce(),
        )?;

        debug!(sender = %sender, recipient = %new_recipient, "Created recipient box");
        boxes
            .pop()
            .ok_or_else(|| CoreError::encryption("no recipient box produced"))
    }

    fn find_invalid_security_hashes(
        &self,
        payload: &EncodedPayload,
        affected: &BTreeMap<TxHash, EncodedPayload>,
    ) -> Result<BTreeSet<TxHash>> {
        let mut invalid = BTreeSet::new();

        for (tx_hash, declared) in payload.affected_contract_transactions() {
            let Some(affected_payload) = affected.get(tx_hash) else {
                debug!(tx = %tx_hash, "Affected transaction not supplied");
                invalid.insert(tx_hash.clone());
                continue;
            };

            let actual = self.security_hash(payload.cipher_text(), affected_payload)?;
            if &actual != declared {
                debug!(tx = %tx_hash, "Security hash mismatch");
                invalid.insert(tx_hash.clone());
            }
        }

        Ok(invalid)
    }

    fn status(&self) -> Status {
        Status::Started
    }
}

impl fmt::Debug for EnclaveImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnclaveImpl")
            .field("default_key", &self.key_manager.default_public_key())
            .finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::for_recipient;
    use crate::crypto::{KeyPair, XChaChaEncryptor};
    use crate::enclave::key_manager::InMemoryKeyManager;
    use crate::payload::PrivacyMode;

    struct Fixture {
        enclave: EnclaveImpl,
        sender: KeyPair,
        recipient: KeyPair,
    }

    fn enclave_with(pairs: Vec<KeyPair>) -> EnclaveImpl {
        let key_manager = InMemoryKeyManager::new(pairs, []).unwrap();
        EnclaveImpl::new(Arc::new(XChaChaEncryptor::new()), Arc::new(key_manager))
    }

    fn fixture() -> Fixture {
        let encryptor = XChaChaEncryptor::new();
        let sender = encryptor.generate_key_pair();
        let recipient = encryptor.generate_key_pair();
        Fixture {
            enclave: enclave_with(vec![sender.clone(), recipient.clone()]),
            sender,
            recipient,
        }
    }

    fn standard() -> PrivacyMetadata {
        PrivacyMetadata::builder().build().unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_as_sender() {
        let f = fixture();
        let payload = f
            .enclave
            .encrypt_payload(
                b"hello",
                f.sender.public_key(),
                &[*f.recipient.public_key()],
                &standard(),
            )
            .unwrap();

        assert_eq!(payload.recipient_boxes().len(), 1);
        assert_eq!(payload.recipient_keys(), &[*f.recipient.public_key()]);

        let plain = f.enclave.unencrypt_transaction(&payload, None).unwrap();
        assert_eq!(plain, b"hello");
    }

    #[test]
    fn test_encrypt_decrypt_as_recipient() {
        let encryptor = XChaChaEncryptor::new();
        let sender = encryptor.generate_key_pair();
        let recipient = encryptor.generate_key_pair();
        let sending = enclave_with(vec![sender.clone()]);
        let receiving = enclave_with(vec![recipient.clone()]);

        let payload = sending
            .encrypt_payload(b"secret", sender.public_key(), &[*recipient.public_key()], &standard())
            .unwrap();
        let stripped = for_recipient(&payload, recipient.public_key()).unwrap();

        let plain = receiving
            .unencrypt_transaction(&stripped, Some(recipient.public_key()))
            .unwrap();
        assert_eq!(plain, b"secret");

        let result = receiving.unencrypt_transaction(&stripped, None);
        assert!(matches!(result, Err(CoreError::MissingRecipientData { .. })));
    }

    #[test]
    fn test_ciphertexts_differ_for_same_message() {
        let f = fixture();
        let recipients = [*f.recipient.public_key()];
        let a = f
            .enclave
            .encrypt_payload(b"same", f.sender.public_key(), &recipients, &standard())
            .unwrap();
        let b = f
            .enclave
            .encrypt_payload(b"same", f.sender.public_key(), &recipients, &standard())
            .unwrap();
        assert_ne!(a.cipher_text(), b.cipher_text());
        assert_ne!(a.cipher_text_nonce(), b.cipher_text_nonce());
    }

    #[test]
    fn test_unknown_sender_fails() {
        let f = fixture();
        let stranger = XChaChaEncryptor::new().generate_key_pair();
        let result = f.enclave.encrypt_payload(
            b"x",
            stranger.public_key(),
            &[*f.recipient.public_key()],
            &standard(),
        );
        assert!(matches!(result, Err(CoreError::KeyNotFound { .. })));
    }

    #[test]
    fn test_invalid_recipient_key_is_key_exchange_error() {
        let f = fixture();
        let result = f.enclave.encrypt_payload(
            b"x",
            f.sender.public_key(),
            &[PublicKey::new([0u8; 32])],
            &standard(),
        );
        assert!(matches!(result, Err(CoreError::KeyExchange { .. })));
    }

    #[test]
    fn test_raw_payload_roundtrip() {
        let f = fixture();
        let raw = f
            .enclave
            .encrypt_raw_payload(b"staged", f.sender.public_key())
            .unwrap();
        assert_eq!(raw.sender(), f.sender.public_key());
        assert_eq!(f.enclave.unencrypt_raw_payload(&raw).unwrap(), b"staged");

        let payload = f
            .enclave
            .encrypt_payload_from_raw(&raw, &[*f.recipient.public_key()], &standard())
            .unwrap();
        assert_eq!(payload.cipher_text(), raw.encrypted_payload());
        assert_eq!(payload.cipher_text_nonce(), raw.nonce());
        assert_eq!(f.enclave.unencrypt_transaction(&payload, None).unwrap(), b"staged");
    }

    #[test]
    fn test_new_recipient_box_opens_for_new_recipient() {
        let encryptor = XChaChaEncryptor::new();
        let sender = encryptor.generate_key_pair();
        let first = encryptor.generate_key_pair();
        let late = encryptor.generate_key_pair();
        let sending = enclave_with(vec![sender.clone()]);
        let late_node = enclave_with(vec![late.clone()]);

        let payload = sending
            .encrypt_payload(b"late", sender.public_key(), &[*first.public_key()], &standard())
            .unwrap();
        let new_box = sending
            .create_new_recipient_box(&payload, late.public_key())
            .unwrap();

        let for_late = payload
            .to_builder()
            .recipient_keys(vec![*late.public_key()])
            .recipient_boxes(vec![new_box])
            .build()
            .unwrap();
        let plain = late_node
            .unencrypt_transaction(&for_late, Some(late.public_key()))
            .unwrap();
        assert_eq!(plain, b"late");
    }

    #[test]
    fn test_new_recipient_box_requires_existing_box() {
        let f = fixture();
        let payload = f
            .enclave
            .encrypt_payload(b"x", f.sender.public_key(), &[], &standard())
            .unwrap();
        let result = f
            .enclave
            .create_new_recipient_box(&payload, f.recipient.public_key());
        assert!(matches!(result, Err(CoreError::MissingRecipientData { .. })));
    }

    #[test]
    fn test_master_key_requires_box() {
        let f = fixture();
        let payload = f
            .enclave
            .encrypt_payload(b"x", f.sender.public_key(), &[], &standard())
            .unwrap();
        assert!(matches!(
            f.enclave.master_key(&payload),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_master_key_of_foreign_payload_fails() {
        let encryptor = XChaChaEncryptor::new();
        let sender = encryptor.generate_key_pair();
        let other = encryptor.generate_key_pair();
        let sending = enclave_with(vec![sender.clone()]);
        let unrelated = enclave_with(vec![encryptor.generate_key_pair()]);

        let payload = sending
            .encrypt_payload(b"x", sender.public_key(), &[*other.public_key()], &standard())
            .unwrap();
        assert!(matches!(
            unrelated.master_key(&payload),
            Err(CoreError::CryptoOpenFailure { .. })
        ));
    }

    #[test]
    fn test_security_hashes_computed_and_verified() {
        let f = fixture();
        let recipients = [*f.recipient.public_key()];
        let affected = f
            .enclave
            .encrypt_payload(b"contract", f.sender.public_key(), &recipients, &standard())
            .unwrap();
        let affected_hash = TxHash::new(b"affected".to_vec());

        let metadata = PrivacyMetadata::builder()
            .privacy_mode(PrivacyMode::PartyProtection)
            .affected_transaction(affected_hash.clone(), affected.clone())
            .build()
            .unwrap();
        let payload = f
            .enclave
            .encrypt_payload(b"call", f.sender.public_key(), &recipients, &metadata)
            .unwrap();

        let declared = &payload.affected_contract_transactions()[&affected_hash];
        assert_eq!(declared.as_bytes().len(), 64);

        let mut supplied = BTreeMap::new();
        supplied.insert(affected_hash.clone(), affected);
        assert!(f
            .enclave
            .find_invalid_security_hashes(&payload, &supplied)
            .unwrap()
            .is_empty());

        let invalid = f
            .enclave
            .find_invalid_security_hashes(&payload, &BTreeMap::new())
            .unwrap();
        assert!(invalid.contains(&affected_hash));
    }

    #[test]
    fn test_tampered_security_hash_is_reported() {
        let f = fixture();
        let recipients = [*f.recipient.public_key()];
        let affected = f
            .enclave
            .encrypt_payload(b"contract", f.sender.public_key(), &recipients, &standard())
            .unwrap();
        let affected_hash = TxHash::new(b"affected".to_vec());

        let payload = f
            .enclave
            .encrypt_payload(b"call", f.sender.public_key(), &recipients, &standard())
            .unwrap()
            .to_builder()
            .privacy_mode(PrivacyMode::PartyProtection)
            .affected_contract_transaction(affected_hash.clone(), SecurityHash::new(vec![0u8; 64]))
            .build()
            .unwrap();

        let mut supplied = BTreeMap::new();
        supplied.insert(affected_hash.clone(), affected);
        let invalid = f
            .enclave
            .find_invalid_security_hashes(&payload, &supplied)
            .unwrap();
        assert_eq!(invalid.into_iter().collect::<Vec<_>>(), vec![affected_hash]);
    }

    #[test]
    fn test_status_and_keys() {
        let f = fixture();
        assert_eq!(f.enclave.status(), Status::Started);
        assert_eq!(f.enclave.status().to_string(), "STARTED");
        assert_eq!(f.enclave.default_public_key(), *f.sender.public_key());
        assert_eq!(f.enclave.public_keys().len(), 2);
        assert!(f.enclave.forwarding_keys().is_empty());
    }
}
