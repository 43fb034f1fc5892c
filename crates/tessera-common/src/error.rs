// ============================================
// File: crates/tessera-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Provides foundational error types and result aliases used across
//! all Tessera crates, enabling consistent error handling.
//!
//! ## Main Functionality
//! - `CommonError`: Base error enum for key parsing and validation
//! - `Result<T>`: Type alias using `CommonError`
//! - Conversion from `base64::DecodeError`
//!
//! ## Design Philosophy
//! - Use `thiserror` for ergonomic error definitions
//! - Each crate defines its own error type that wraps `CommonError`
//! - Errors should be informative without leaking key material
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never include private keys, master keys or plaintext in error messages
//! - Public keys may appear, always Base64 rendered
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Common result type for operations that may fail.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Common error types shared across Tessera crates.
///
/// # Categories
/// - **Validation**: Input validation failures
/// - **Resource**: Duplicate registrations
/// - **Encoding**: Base64 and byte-format failures
///
/// # Example
/// ```
/// use tessera_common::error::{CommonError, Result};
///
/// fn validate_key(data: &[u8]) -> Result<()> {
///     if data.len() != 32 {
///         return Err(CommonError::invalid_length(32, data.len()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key(&[0u8; 16]).is_err());
/// ```
#[derive(Error, Debug)]
pub enum CommonError {
    // ========================================
    // Validation Errors
    // ========================================

    /// Invalid input data provided.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the field or parameter
        field: String,
        /// Description of what's wrong
        reason: String,
    },

    /// Data length doesn't match expected size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    // ========================================
    // Resource Errors
    // ========================================

    /// Resource already exists.
    #[error("Resource already exists: {resource_type} with id '{id}'")]
    AlreadyExists {
        /// Type of resource
        resource_type: String,
        /// Identifier that already exists
        id: String,
    },

    // ========================================
    // Encoding Errors
    // ========================================

    /// Failed to encode/serialize data.
    #[error("Encoding error: {context}")]
    Encoding {
        /// What was being encoded
        context: String,
        /// Error details
        details: String,
    },

    /// Failed to decode/deserialize data.
    #[error("Decoding error: {context}: {details}")]
    Decoding {
        /// What was being decoded
        context: String,
        /// Error details
        details: String,
    },
}

impl CommonError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidLength` error.
    #[must_use]
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    /// Creates an `AlreadyExists` error.
    pub fn already_exists(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates a `Decoding` error.
    pub fn decoding(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Decoding {
            context: context.into(),
            details: details.into(),
        }
    }

    /// Creates an `Encoding` error.
    pub fn encoding(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Encoding {
            context: context.into(),
            details: details.into(),
        }
    }
}

// ============================================
// Error Conversions
// ============================================

impl From<base64::DecodeError> for CommonError {
    fn from(err: base64::DecodeError) -> Self {
        Self::decoding("base64 decode", err.to_string())
    }
}

// ============================================
// Tests
// ============================================
