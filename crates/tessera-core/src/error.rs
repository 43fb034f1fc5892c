// ============================================
// File: crates/tessera-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines the error taxonomy of the enclave and the payload codecs so
//! callers can tell key-ownership problems, malformed input, crypto
//! failures and liveness problems apart.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//! - Convenience constructors for the common variants
//! - Classification helpers (`is_crypto_error`, `is_retryable`, ...)
//!
//! ## Error Categories
//! 1. **Key Errors**: unknown local key, recipient not in payload
//! 2. **Payload Errors**: build-time invariant or decode failures
//! 3. **Crypto Errors**: box open failure, key exchange, bad sizes
//! 4. **Availability Errors**: enclave not started
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material or plaintext in error messages
//! - `CryptoOpenFailure` must stay distinct from `MalformedPayload`:
//!   callers stop a whole batch on the former
//! - Only `EnclaveUnavailable` is retryable
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use tessera_common::error::CommonError;
use tessera_common::PublicKey;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for enclave and codec operations.
///
/// # Security Note
/// Messages name public keys only, never private or derived key material.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Key Errors
    // ========================================

    /// The enclave does not manage a private key for this public key.
    #[error("No private key found for public key {key}")]
    KeyNotFound {
        /// Public key that was looked up
        key: PublicKey,
    },

    /// The key is not one of the payload's recipients.
    #[error("Recipient {key} is not a recipient of this transaction")]
    InvalidRecipient {
        /// Key that was asked for
        key: PublicKey,
    },

    /// Data needed to identify the right key or box is missing.
    #[error("Missing recipient data: {reason}")]
    MissingRecipientData {
        /// What was missing
        reason: String,
    },

    // ========================================
    // Payload Errors
    // ========================================

    /// Payload invariant violated or bytes could not be decoded.
    #[error("Malformed payload: {reason}")]
    MalformedPayload {
        /// What's wrong with the payload
        reason: String,
    },

    // ========================================
    // Cryptographic Errors
    // ========================================

    /// An authenticated box could not be opened.
    #[error("Unable to open sealed data: {context}")]
    CryptoOpenFailure {
        /// Which box was being opened
        context: String,
    },

    /// Sealing failed.
    #[error("Encryption failed: {context}")]
    Encryption {
        /// What was being encrypted
        context: String,
    },

    /// Shared key computation failed.
    #[error("Key exchange failed: {reason}")]
    KeyExchange {
        /// Why key exchange failed
        reason: String,
    },

    /// Key material has the wrong size.
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Nonce has the wrong size for the cipher.
    #[error("Invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length
        actual: usize,
    },

    // ========================================
    // Availability Errors
    // ========================================

    /// The enclave is not started or cannot be reached.
    #[error("Enclave unavailable: {reason}")]
    EnclaveUnavailable {
        /// Why the enclave cannot serve requests
        reason: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `MalformedPayload` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Creates a `CryptoOpenFailure` error.
    pub fn open_failure(context: impl Into<String>) -> Self {
        Self::CryptoOpenFailure {
            context: context.into(),
        }
    }

    /// Creates an `Encryption` error.
    pub fn encryption(context: impl Into<String>) -> Self {
        Self::Encryption {
            context: context.into(),
        }
    }

    /// Creates a `KeyExchange` error.
    pub fn key_exchange(reason: impl Into<String>) -> Self {
        Self::KeyExchange {
            reason: reason.into(),
        }
    }

    /// Creates a `MissingRecipientData` error.
    pub fn missing_recipient_data(reason: impl Into<String>) -> Self {
        Self::MissingRecipientData {
            reason: reason.into(),
        }
    }

    /// Creates an `EnclaveUnavailable` error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::EnclaveUnavailable {
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a cryptographic error.
    ///
    /// Crypto errors mean wrong keys or tampered data.
    #[must_use]
    pub const fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            Self::CryptoOpenFailure { .. }
                | Self::Encryption { .. }
                | Self::KeyExchange { .. }
                | Self::InvalidKeyLength { .. }
                | Self::InvalidNonceLength { .. }
        )
    }

    /// Returns `true` if the payload itself is at fault.
    #[must_use]
    pub const fn is_payload_error(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }

    /// Returns `true` if a key lookup or recipient match failed.
    #[must_use]
    pub const fn is_key_error(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. }
                | Self::InvalidRecipient { .. }
                | Self::MissingRecipientData { .. }
        )
    }

    /// Returns `true` if retrying later might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::EnclaveUnavailable { .. })
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let key = PublicKey::new([1u8; 32]);
        let err = CoreError::KeyNotFound { key };
        assert!(err.to_string().contains(&key.to_base64()));

        let err = CoreError::malformed("truncated buffer");
        assert!(err.to_string().contains("truncated buffer"));
    }

    #[test]
    fn test_error_classification() {
        let open = CoreError::open_failure("recipient box");
        assert!(open.is_crypto_error());
        assert!(!open.is_retryable());

        let malformed = CoreError::malformed("bad");
        assert!(malformed.is_payload_error());
        assert!(!malformed.is_crypto_error());

        let missing = CoreError::InvalidRecipient {
            key: PublicKey::new([2u8; 32]),
        };
        assert!(missing.is_key_error());

        assert!(CoreError::unavailable("stopped").is_retryable());
    }

    #[test]
    fn test_common_error_conversion() {
        let common = CommonError::invalid_length(32, 3);
        let core: CoreError = common.into();
        assert!(matches!(core, CoreError::Common(_)));
    }
}
