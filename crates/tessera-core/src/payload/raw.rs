// ============================================
// File: crates/tessera-core/src/payload/raw.rs
// ============================================
//! # Raw Transactions
//!
//! ## Creation Reason
//! A sender can stage a cipher text before choosing recipients. The
//! master key is then sealed to the sender itself and only resealed for
//! recipients once they are known.
//!
//! ## Last Modified
//! v0.1.0 - Initial raw transaction type

use tessera_common::{Nonce, PublicKey};

/// Payload encrypted with no recipients recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    encrypted_payload: Vec<u8>,
    encrypted_key: Vec<u8>,
    nonce: Nonce,
    from: PublicKey,
}

impl RawTransaction {
    /// Creates a raw transaction.
    #[must_use]
    pub fn new(
        encrypted_payload: impl Into<Vec<u8>>,
        encrypted_key: impl Into<Vec<u8>>,
        nonce: Nonce,
        from: PublicKey,
    ) -> Self {
        Self {
            encrypted_payload: encrypted_payload.into(),
            encrypted_key: encrypted_key.into(),
            nonce,
            from,
        }
    }

    /// Payload sealed under the master key.
    #[must_use]
    pub fn encrypted_payload(&self) -> &[u8] {
        &self.encrypted_payload
    }

    /// Master key sealed by the sender to itself.
    #[must_use]
    pub fn encrypted_key(&self) -> &[u8] {
        &self.encrypted_key
    }

    /// Nonce used for both seals.
    #[must_use]
    pub const fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Sender's public key.
    #[must_use]
    pub const fn sender(&self) -> &PublicKey {
        &self.from
    }
}
