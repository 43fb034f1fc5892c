// ============================================
// File: crates/tessera-enclave/src/keys.rs
// ============================================
//! # Key Pair Conversion
//!
//! ## Creation Reason
//! Turns configured key sources into decoded key pairs for the key
//! manager, fetching vault-backed keys through `KeyVaultService`.
//!
//! ## Conversion Flow
//! ```text
//! KeyData::Inline ──────────────────────────────┐
//!                                                ├──► trim ──► Base64 ──► KeyPair
//! KeyData::{Azure,Hashicorp,Aws} ──► get_secret ─┘
//!                                   (public id, then private id)
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - A vault-backed source without a matching service is a config error
//! - Decoded private keys go straight into `PrivateKey` (zeroized on drop)
//!
//! ## Last Modified
//! v0.1.0 - Initial key pair converter

use std::sync::Arc;

use tracing::{debug, info};

use tessera_common::{PrivateKey, PublicKey};
use tessera_core::crypto::KeyPair;

use crate::config::KeyData;
use crate::error::{NodeError, Result};
use crate::vault::{GetSecretData, KeyVaultService, KeyVaultType};

/// Converts configured key sources to key pairs.
#[derive(Default)]
pub struct KeyPairConverter {
    vaults: Vec<Arc<dyn KeyVaultService>>,
}

impl KeyPairConverter {
    /// Creates a converter without vault access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vault service.
    #[must_use]
    pub fn with_vault(mut self, vault: Arc<dyn KeyVaultService>) -> Self {
        self.vaults.push(vault);
        self
    }

    /// Converts every source, preserving order.
    ///
    /// # Errors
    /// - `ConfigInvalid`: malformed inline key or missing vault service
    /// - `KeyVault`: a secret cannot be fetched or decoded
    pub fn convert(&self, key_data: &[KeyData]) -> Result<Vec<KeyPair>> {
        let pairs = key_data
            .iter()
            .enumerate()
            .map(|(index, data)| self.convert_one(index, data))
            .collect::<Result<Vec<_>>>()?;

        info!(key_pairs = pairs.len(), "Key pairs converted");
        Ok(pairs)
    }

    fn convert_one(&self, index: usize, data: &KeyData) -> Result<KeyPair> {
        let field = format!("keys.key_data[{index}]");

        let (public_request, private_request) = match data {
            KeyData::Inline {
                public_key,
                private_key,
            } => {
                let public = PublicKey::from_base64(public_key.trim()).map_err(|e| {
                    NodeError::config_invalid(format!("{field}.public_key"), e.to_string())
                })?;
                let private = PrivateKey::from_base64(private_key.trim()).map_err(|e| {
                    NodeError::config_invalid(format!("{field}.private_key"), e.to_string())
                })?;
                return Ok(KeyPair::new(public, private));
            }
            KeyData::Azure {
                public_key_id,
                private_key_id,
                public_key_version,
                private_key_version,
            } => (
                GetSecretData::Azure {
                    name: public_key_id.clone(),
                    version: public_key_version.clone(),
                },
                GetSecretData::Azure {
                    name: private_key_id.clone(),
                    version: private_key_version.clone(),
                },
            ),
            KeyData::Hashicorp {
                secret_engine_name,
                secret_name,
                public_key_id,
                private_key_id,
                secret_version,
            } => {
                let request = |id: &String| GetSecretData::Hashicorp {
                    engine: secret_engine_name.clone(),
                    secret_name: secret_name.clone(),
                    field: id.clone(),
                    version: *secret_version,
                };
                (request(public_key_id), request(private_key_id))
            }
            KeyData::Aws {
                public_key_id,
                private_key_id,
            } => (
                GetSecretData::Aws {
                    secret_id: public_key_id.clone(),
                },
                GetSecretData::Aws {
                    secret_id: private_key_id.clone(),
                },
            ),
        };

        let vault = self.vault_for(public_request.vault_type(), &field)?;

        let public_secret = vault.get_secret(&public_request)?;
        let public = PublicKey::from_base64(public_secret.trim())
            .map_err(|e| decode_error(&public_request, &e))?;

        let private_secret = vault.get_secret(&private_request)?;
        let private = PrivateKey::from_base64(private_secret.trim())
            .map_err(|e| decode_error(&private_request, &e))?;

        debug!(
            vault = %public_request.vault_type(),
            public_key = %public,
            "Fetched key pair from vault"
        );
        Ok(KeyPair::new(public, private))
    }

    fn vault_for(&self, vault_type: KeyVaultType, field: &str) -> Result<&dyn KeyVaultService> {
        self.vaults
            .iter()
            .find(|vault| vault.vault_type() == vault_type)
            .map(|vault| &**vault)
            .ok_or_else(|| {
                NodeError::config_invalid(field, format!("no {vault_type} key vault is configured"))
            })
    }
}

fn decode_error(request: &GetSecretData, error: &dyn std::fmt::Display) -> NodeError {
    NodeError::key_vault(
        request.vault_type().name(),
        request.secret_label(),
        format!("secret is not a valid key: {error}"),
    )
}

impl std::fmt::Debug for KeyPairConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairConverter")
            .field(
                "vaults",
                &self.vaults.iter().map(|v| v.vault_type()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================
// Tests
// ============================================
