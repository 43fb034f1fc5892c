// ============================================
// File: crates/tessera-enclave/src/error.rs
// ============================================
//! # Node Error Types
//!
//! ## Last Modified
//! v0.1.0 - Initial node errors

use thiserror::Error;

use tessera_common::error::CommonError;
use tessera_core::error::CoreError;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;

/// Node error types.
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        field: String,
        reason: String,
    },

    #[error("Key vault '{vault}' failed for secret '{secret}': {reason}")]
    KeyVault {
        vault: String,
        secret: String,
        reason: String,
    },

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl NodeError {
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn key_vault(
        vault: impl Into<String>,
        secret: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::KeyVault {
            vault: vault.into(),
            secret: secret.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad { .. } | Self::ConfigInvalid { .. })
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::KeyVault { .. } => true,
            Self::Core(e) => e.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NodeError::config_load("/etc/tessera.toml", "file not found");
        assert!(err.to_string().contains("/etc/tessera.toml"));

        let err = NodeError::key_vault("hashicorp", "tessera/publicKey", "timeout");
        assert!(err.to_string().contains("tessera/publicKey"));
    }

    #[test]
    fn test_error_classification() {
        let config_err = NodeError::config_invalid("keys.key_data", "at least one key pair");
        assert!(config_err.is_config_error());
        assert!(!config_err.is_retryable());

        let vault_err = NodeError::key_vault("aws", "id", "throttled");
        assert!(vault_err.is_retryable());
        assert!(!vault_err.is_config_error());

        let unavailable = NodeError::from(CoreError::unavailable("stopped"));
        assert!(unavailable.is_retryable());
        assert!(!unavailable.is_config_error());

        let open = NodeError::from(CoreError::open_failure("master key"));
        assert!(!open.is_retryable());
    }
}
