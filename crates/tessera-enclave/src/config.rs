// ============================================
// File: crates/tessera-enclave/src/config.rs
// ============================================
//! # Enclave Configuration
//!
//! ## Creation Reason
//! Describes where the node's key pairs come from and which codec and
//! digest the node uses, loaded once from TOML at startup.
//!
//! ## Main Functionality
//! - `EnclaveConfig`: Main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//! - Defaults for every section except `keys.key_data`
//!
//! ## Configuration Sections
//! - `keys`: Key pair sources and forwarding keys
//! - `encoder`: Payload codec used when sending
//! - `digest`: Transaction hash algorithm
//! - `logging`: Log level
//!
//! ## Example Configuration
//! ```toml
//! [keys]
//! forwarding_keys = ["<base64 public key>"]
//!
//! [[keys.key_data]]
//! type = "inline"
//! public_key = "<base64>"
//! private_key = "<base64>"
//!
//! [[keys.key_data]]
//! type = "hashicorp"
//! secret_engine_name = "kv"
//! secret_name = "tessera"
//! public_key_id = "publicKey"
//! private_key_id = "privateKey"
//!
//! [encoder]
//! codec = "cbor"
//!
//! [digest]
//! algorithm = "sha3-512"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - All config changes require a restart
//! - Inline private keys are secrets; never log a `KeyData`
//! - Validate config before building the enclave
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use tessera_common::{PrivateKey, PublicKey};
use tessera_core::codec::EncodedPayloadCodec;
use tessera_core::crypto::DigestAlgorithm;

use crate::error::{NodeError, Result};
use crate::vault::KeyVaultType;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ============================================
// EnclaveConfig
// ============================================

/// Main enclave configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnclaveConfig {
    /// Key pair sources.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Payload encoder settings.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Digest settings.
    #[serde(default)]
    pub digest: DigestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EnclaveConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or validated.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!(path = %path_str, "Loading configuration");

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| NodeError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| NodeError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!(key_pairs = config.keys.key_data.len(), "Configuration loaded");
        Ok(config)
    }

    /// Parses and validates configuration from a string.
    ///
    /// # Errors
    /// Returns error if the content cannot be parsed or validated.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| NodeError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.keys.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Serializes configuration to a TOML string.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NodeError::config_invalid("<config>", e.to_string()))
    }
}

// ============================================
// KeysConfig
// ============================================

/// Key pair configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Key pair sources. The first pair is the default sender key.
    #[serde(default)]
    pub key_data: Vec<KeyData>,

    /// Base64 public keys copied on every transaction.
    #[serde(default)]
    pub forwarding_keys: Vec<String>,
}

impl KeysConfig {
    fn validate(&self) -> Result<()> {
        if self.key_data.is_empty() {
            return Err(NodeError::config_invalid(
                "keys.key_data",
                "at least one key pair is required",
            ));
        }

        for (index, data) in self.key_data.iter().enumerate() {
            data.validate(&format!("keys.key_data[{index}]"))?;
        }

        self.forwarding_public_keys()?;
        Ok(())
    }

    /// Parses the forwarding keys.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` for a malformed key.
    pub fn forwarding_public_keys(&self) -> Result<Vec<PublicKey>> {
        self.forwarding_keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                PublicKey::from_base64(key.trim()).map_err(|e| {
                    NodeError::config_invalid(
                        format!("keys.forwarding_keys[{index}]"),
                        e.to_string(),
                    )
                })
            })
            .collect()
    }
}

// ============================================
// KeyData
// ============================================

/// One configured key pair source.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KeyData {
    /// Base64 keys written in the file.
    Inline {
        /// Base64 public key.
        public_key: String,
        /// Base64 private key.
        private_key: String,
    },

    /// Azure Key Vault secrets.
    Azure {
        /// Secret holding the public key.
        public_key_id: String,
        /// Secret holding the private key.
        private_key_id: String,
        /// Optional public key secret version.
        #[serde(default)]
        public_key_version: Option<String>,
        /// Optional private key secret version.
        #[serde(default)]
        private_key_version: Option<String>,
    },

    /// Hashicorp Vault KV secret.
    Hashicorp {
        /// KV engine mount name.
        secret_engine_name: String,
        /// Secret path within the engine.
        secret_name: String,
        /// Field holding the public key.
        public_key_id: String,
        /// Field holding the private key.
        private_key_id: String,
        /// Optional secret version; 0 means latest.
        #[serde(default)]
        secret_version: Option<u32>,
    },

    /// AWS Secrets Manager secrets.
    Aws {
        /// Secret holding the public key.
        public_key_id: String,
        /// Secret holding the private key.
        private_key_id: String,
    },
}

impl KeyData {
    /// Returns the vault that backs this source, if any.
    #[must_use]
    pub const fn vault_type(&self) -> Option<KeyVaultType> {
        match self {
            Self::Inline { .. } => None,
            Self::Azure { .. } => Some(KeyVaultType::Azure),
            Self::Hashicorp { .. } => Some(KeyVaultType::Hashicorp),
            Self::Aws { .. } => Some(KeyVaultType::Aws),
        }
    }

    fn validate(&self, field: &str) -> Result<()> {
        match self {
            Self::Inline {
                public_key,
                private_key,
            } => {
                PublicKey::from_base64(public_key.trim()).map_err(|e| {
                    NodeError::config_invalid(format!("{field}.public_key"), e.to_string())
                })?;
                PrivateKey::from_base64(private_key.trim()).map_err(|e| {
                    NodeError::config_invalid(format!("{field}.private_key"), e.to_string())
                })?;
            }
            Self::Azure {
                public_key_id,
                private_key_id,
                ..
            }
            | Self::Aws {
                public_key_id,
                private_key_id,
            } => {
                require(public_key_id, field, "public_key_id")?;
                require(private_key_id, field, "private_key_id")?;
            }
            Self::Hashicorp {
                secret_engine_name,
                secret_name,
                public_key_id,
                private_key_id,
                ..
            } => {
                require(secret_engine_name, field, "secret_engine_name")?;
                require(secret_name, field, "secret_name")?;
                require(public_key_id, field, "public_key_id")?;
                require(private_key_id, field, "private_key_id")?;
            }
        }
        Ok(())
    }
}

fn require(value: &str, field: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NodeError::config_invalid(
            format!("{field}.{name}"),
            "cannot be empty",
        ));
    }
    Ok(())
}

impl std::fmt::Debug for KeyData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline { public_key, .. } => f
                .debug_struct("Inline")
                .field("public_key", public_key)
                .field("private_key", &"[REDACTED]")
                .finish(),
            Self::Azure { public_key_id, .. } => f
                .debug_struct("Azure")
                .field("public_key_id", public_key_id)
                .finish_non_exhaustive(),
            Self::Hashicorp { secret_name, .. } => f
                .debug_struct("Hashicorp")
                .field("secret_name", secret_name)
                .finish_non_exhaustive(),
            Self::Aws { public_key_id, .. } => f
                .debug_struct("Aws")
                .field("public_key_id", public_key_id)
                .finish_non_exhaustive(),
        }
    }
}

// ============================================
// EncoderConfig
// ============================================

/// Payload encoder configuration section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Codec used for outgoing payloads.
    #[serde(default)]
    pub codec: EncodedPayloadCodec,
}

// ============================================
// DigestConfig
// ============================================

/// Digest configuration section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Transaction hash algorithm.
    #[serde(default)]
    pub algorithm: DigestAlgorithm,
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(NodeError::config_invalid(
                "logging.level",
                format!("must be one of {}", LOG_LEVELS.join(", ")),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";
    const PRIVATE: &str = "AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=";

    fn inline_toml() -> String {
        format!(
            r#"
            [[keys.key_data]]
            type = "inline"
            public_key = "{PUBLIC}"
            private_key = "{PRIVATE}"
            "#
        )
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = EnclaveConfig::from_str(&inline_toml()).unwrap();
        assert_eq!(config.keys.key_data.len(), 1);
        assert_eq!(config.encoder.codec, EncodedPayloadCodec::Cbor);
        assert_eq!(config.digest.algorithm, DigestAlgorithm::Sha3_512);
        assert_eq!(config.logging.level, "info");
        assert!(config.keys.forwarding_keys.is_empty());
    }

    #[test]
    fn test_full_config_format() {
        let toml = format!(
            r#"
            [keys]
            forwarding_keys = ["{PUBLIC}"]

            [[keys.key_data]]
            type = "inline"
            public_key = "{PUBLIC}"
            private_key = "{PRIVATE}"

            [[keys.key_data]]
            type = "hashicorp"
            secret_engine_name = "kv"
            secret_name = "tessera"
            public_key_id = "publicKey"
            private_key_id = "privateKey"
            secret_version = 0

            [[keys.key_data]]
            type = "azure"
            public_key_id = "pub"
            private_key_id = "priv"
            private_key_version = "v2"

            [[keys.key_data]]
            type = "aws"
            public_key_id = "pub"
            private_key_id = "priv"

            [encoder]
            codec = "legacy"

            [digest]
            algorithm = "sha512-256"

            [logging]
            level = "debug"
            "#
        );

        let config = EnclaveConfig::from_str(&toml).unwrap();
        assert_eq!(config.keys.key_data.len(), 4);
        assert_eq!(config.keys.key_data[0].vault_type(), None);
        assert_eq!(
            config.keys.key_data[1].vault_type(),
            Some(KeyVaultType::Hashicorp)
        );
        assert_eq!(config.keys.key_data[2].vault_type(), Some(KeyVaultType::Azure));
        assert_eq!(config.keys.key_data[3].vault_type(), Some(KeyVaultType::Aws));
        assert_eq!(config.encoder.codec, EncodedPayloadCodec::Legacy);
        assert_eq!(config.digest.algorithm, DigestAlgorithm::Sha512_256);
        assert_eq!(config.keys.forwarding_public_keys().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_missing_keys() {
        let err = EnclaveConfig::from_str("").unwrap_err();
        assert!(matches!(err, NodeError::ConfigInvalid { ref field, .. } if field == "keys.key_data"));
    }

    #[test]
    fn test_rejects_bad_inline_key() {
        let toml = format!(
            r#"
            [[keys.key_data]]
            type = "inline"
            public_key = "AQID"
            private_key = "{PRIVATE}"
            "#
        );
        let err = EnclaveConfig::from_str(&toml).unwrap_err();
        assert!(
            matches!(err, NodeError::ConfigInvalid { ref field, .. } if field == "keys.key_data[0].public_key")
        );
    }

    #[test]
    fn test_rejects_empty_vault_ids() {
        let toml = r#"
            [[keys.key_data]]
            type = "aws"
            public_key_id = ""
            private_key_id = "priv"
        "#;
        let err = EnclaveConfig::from_str(toml).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_rejects_bad_forwarding_key_and_log_level() {
        let toml = format!("[keys]\nforwarding_keys = [\"!!\"]\n{}", inline_toml());
        assert!(EnclaveConfig::from_str(&toml).is_err());

        let toml = format!("{}\n[logging]\nlevel = \"loud\"", inline_toml());
        let err = EnclaveConfig::from_str(&toml).unwrap_err();
        assert!(matches!(err, NodeError::ConfigInvalid { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = EnclaveConfig::from_str(&inline_toml()).unwrap();
        let debug = format!("{:?}", config.keys.key_data[0]);
        assert!(!debug.contains(PRIVATE));
        assert!(debug.contains("REDACTED"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tessera-config-{}.toml", std::process::id()));
        tokio::fs::write(&path, inline_toml()).await.unwrap();

        let config = EnclaveConfig::load(&path).await.unwrap();
        assert_eq!(config.keys.key_data.len(), 1);

        tokio::fs::remove_file(&path).await.unwrap();
        assert!(matches!(
            EnclaveConfig::load(&path).await,
            Err(NodeError::ConfigLoad { .. })
        ));
    }
}
