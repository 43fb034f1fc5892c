// ============================================
// File: crates/tessera-core/src/enclave/metadata.rs
// ============================================
//! # Privacy Metadata
//!
//! ## Creation Reason
//! Carries the privacy settings of a transaction into the enclave. The
//! enclave copies them into the payload and computes a security hash
//! for every affected transaction.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Affected transactions are full payloads, not hashes; the enclave
//!   needs their master keys
//! - `build()` enforces the same mode rules as the payload builder
//!
//! ## Last Modified
//! v0.1.0 - Initial privacy metadata

use std::collections::{BTreeMap, BTreeSet};

use tessera_common::PublicKey;

use crate::error::Result;
use crate::payload::{validate_mode, EncodedPayload, PrivacyMode, TxHash};
use crate::privacy_group::PrivacyGroupId;

/// Privacy settings for one encryption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivacyMetadata {
    privacy_mode: PrivacyMode,
    affected_contract_transactions: BTreeMap<TxHash, EncodedPayload>,
    exec_hash: Vec<u8>,
    mandatory_recipients: BTreeSet<PublicKey>,
    privacy_group_id: Option<PrivacyGroupId>,
}

impl PrivacyMetadata {
    /// Starts a builder for standard private metadata.
    #[must_use]
    pub fn builder() -> PrivacyMetadataBuilder {
        PrivacyMetadataBuilder::default()
    }

    /// Privacy mode.
    #[must_use]
    pub const fn privacy_mode(&self) -> PrivacyMode {
        self.privacy_mode
    }

    /// Affected transactions by hash.
    #[must_use]
    pub const fn affected_contract_transactions(&self) -> &BTreeMap<TxHash, EncodedPayload> {
        &self.affected_contract_transactions
    }

    /// Execution hash.
    #[must_use]
    pub fn exec_hash(&self) -> &[u8] {
        &self.exec_hash
    }

    /// Mandatory recipients.
    #[must_use]
    pub const fn mandatory_recipients(&self) -> &BTreeSet<PublicKey> {
        &self.mandatory_recipients
    }

    /// Privacy group id.
    #[must_use]
    pub const fn privacy_group_id(&self) -> Option<&PrivacyGroupId> {
        self.privacy_group_id.as_ref()
    }
}

/// Builder for [`PrivacyMetadata`].
#[derive(Debug, Clone, Default)]
pub struct PrivacyMetadataBuilder {
    inner: PrivacyMetadata,
}

impl PrivacyMetadataBuilder {
    /// Sets the privacy mode.
    #[must_use]
    pub fn privacy_mode(mut self, mode: PrivacyMode) -> Self {
        self.inner.privacy_mode = mode;
        self
    }

    /// Adds an affected transaction.
    #[must_use]
    pub fn affected_transaction(mut self, hash: TxHash, payload: EncodedPayload) -> Self {
        self.inner.affected_contract_transactions.insert(hash, payload);
        self
    }

    /// Replaces the affected transactions.
    #[must_use]
    pub fn affected_contract_transactions(
        mut self,
        affected: BTreeMap<TxHash, EncodedPayload>,
    ) -> Self {
        self.inner.affected_contract_transactions = affected;
        self
    }

    /// Sets the execution hash.
    #[must_use]
    pub fn exec_hash(mut self, exec_hash: impl Into<Vec<u8>>) -> Self {
        self.inner.exec_hash = exec_hash.into();
        self
    }

    /// Sets the mandatory recipients.
    #[must_use]
    pub fn mandatory_recipients(mut self, keys: impl IntoIterator<Item = PublicKey>) -> Self {
        self.inner.mandatory_recipients = keys.into_iter().collect();
        self
    }

    /// Sets or clears the privacy group id.
    #[must_use]
    pub fn privacy_group_id(mut self, id: impl Into<Option<PrivacyGroupId>>) -> Self {
        self.inner.privacy_group_id = id.into();
        self
    }

    /// Validates and returns the metadata.
    ///
    /// # Errors
    /// `MalformedPayload` if the exec hash or mandatory recipients do not
    /// match the privacy mode.
    pub fn build(self) -> Result<PrivacyMetadata> {
        validate_mode(
            self.inner.privacy_mode,
            &self.inner.exec_hash,
            &self.inner.mandatory_recipients,
        )?;
        Ok(self.inner)
    }
}

// ============================================
// Tests
// ============================================
