// ============================================
// File: crates/tessera-enclave/src/vault.rs
// ============================================
//! # Key Vault Capability
//!
//! ## Creation Reason
//! Key pairs may live in an external secret store instead of the config
//! file. The node only needs "fetch secret by id"; the network clients
//! for each store are supplied by the embedding process.
//!
//! ## Main Functionality
//! - `KeyVaultType`: Supported secret stores
//! - `GetSecretData`: One secret request
//! - `KeyVaultService`: Fetch capability
//! - `MemoryKeyVault`: Map-backed service for local setups and tests
//!
//! ## ⚠️ Important Note for Next Developer
//! - Secrets are fetched once, before the enclave is built
//! - Returned secrets are Base64 key material; never log them
//!
//! ## Last Modified
//! v0.1.0 - Initial key vault capability

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NodeError, Result};

// ============================================
// KeyVaultType
// ============================================

/// Supported secret stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyVaultType {
    /// Azure Key Vault
    Azure,
    /// Hashicorp Vault (KV engine)
    Hashicorp,
    /// AWS Secrets Manager
    Aws,
}

impl KeyVaultType {
    /// Returns the configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::Hashicorp => "hashicorp",
            Self::Aws => "aws",
        }
    }
}

impl fmt::Display for KeyVaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================
// GetSecretData
// ============================================

/// A single secret request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GetSecretData {
    /// Azure secret by name and optional version.
    Azure {
        /// Secret name.
        name: String,
        /// Secret version; latest when absent.
        version: Option<String>,
    },
    /// Field of a Hashicorp KV secret.
    Hashicorp {
        /// KV engine mount name.
        engine: String,
        /// Secret path within the engine.
        secret_name: String,
        /// Field holding the value.
        field: String,
        /// Secret version; latest when absent or 0.
        version: Option<u32>,
    },
    /// AWS secret by id.
    Aws {
        /// Secret id.
        secret_id: String,
    },
}

impl GetSecretData {
    /// Returns the store this request targets.
    #[must_use]
    pub const fn vault_type(&self) -> KeyVaultType {
        match self {
            Self::Azure { .. } => KeyVaultType::Azure,
            Self::Hashicorp { .. } => KeyVaultType::Hashicorp,
            Self::Aws { .. } => KeyVaultType::Aws,
        }
    }

    /// Returns a stable label for the requested secret.
    #[must_use]
    pub fn secret_label(&self) -> String {
        match self {
            Self::Azure { name, .. } => name.clone(),
            Self::Hashicorp {
                engine,
                secret_name,
                field,
                ..
            } => format!("{engine}/{secret_name}#{field}"),
            Self::Aws { secret_id } => secret_id.clone(),
        }
    }
}

// ============================================
// KeyVaultService
// ============================================

/// Fetches secrets from one store.
pub trait KeyVaultService: Send + Sync {
    /// Returns the store this service talks to.
    fn vault_type(&self) -> KeyVaultType;

    /// Returns the secret value.
    ///
    /// # Errors
    /// Returns `KeyVault` if the secret cannot be fetched.
    fn get_secret(&self, request: &GetSecretData) -> Result<String>;
}

/// Key vault backed by an in-memory map keyed by secret label.
pub struct MemoryKeyVault {
    vault_type: KeyVaultType,
    secrets: HashMap<String, String>,
}

impl MemoryKeyVault {
    /// Creates an empty vault answering for `vault_type`.
    #[must_use]
    pub fn new(vault_type: KeyVaultType) -> Self {
        Self {
            vault_type,
            secrets: HashMap::new(),
        }
    }

    /// Stores `value` under `label` (see [`GetSecretData::secret_label`]).
    #[must_use]
    pub fn with_secret(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(label.into(), value.into());
        self
    }
}

impl KeyVaultService for MemoryKeyVault {
    fn vault_type(&self) -> KeyVaultType {
        self.vault_type
    }

    fn get_secret(&self, request: &GetSecretData) -> Result<String> {
        let label = request.secret_label();
        if request.vault_type() != self.vault_type() {
            return Err(NodeError::key_vault(
                self.vault_type().name(),
                label,
                format!("request targets {}", request.vault_type()),
            ));
        }

        self.secrets
            .get(&label)
            .cloned()
            .ok_or_else(|| NodeError::key_vault(self.vault_type().name(), label, "secret not found"))
    }
}

impl fmt::Debug for MemoryKeyVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryKeyVault")
            .field("vault_type", &self.vault_type)
            .field("secrets", &self.secrets.len())
            .finish()
    }
}
