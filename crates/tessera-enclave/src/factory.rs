// ============================================
// File: crates/tessera-enclave/src/factory.rs
// ============================================
//! # Enclave Factory
//!
//! ## Creation Reason
//! Performs the one-time "pick an implementation by config" step at the
//! process boundary. Everything below this point receives its
//! capabilities as constructor arguments.
//!
//! ## Main Functionality
//! - Key pair conversion and key manager construction
//! - Enclave construction with a status check
//! - Payload encoder and digest selection from configuration
//!
//! ## Startup Flow
//! ```text
//! EnclaveConfig
//!     │
//!     ├──► KeyPairConverter ──► InMemoryKeyManager ──┐
//!     │                                               ├──► EnclaveImpl ──► status check
//!     │                          XChaChaEncryptor ────┘
//!     │
//!     ├──► encoder.codec ──► Box<dyn PayloadEncoder>
//!     └──► digest.algorithm ──► Box<dyn PayloadDigest>
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never hand out an enclave that is not `Started`
//! - Vault services must be registered before `create()`
//!
//! ## Last Modified
//! v0.1.0 - Initial enclave factory

use std::sync::Arc;

use tracing::{info, warn};

use tessera_core::codec::{self, PayloadEncoder};
use tessera_core::crypto::{Encryptor, PayloadDigest, XChaChaEncryptor};
use tessera_core::enclave::{Enclave, EnclaveImpl, InMemoryKeyManager, Status};
use tessera_core::error::CoreError;

use crate::config::EnclaveConfig;
use crate::error::Result;
use crate::keys::KeyPairConverter;
use crate::vault::KeyVaultService;

/// Builds enclaves and codecs from configuration.
#[derive(Debug)]
pub struct EnclaveFactory {
    config: EnclaveConfig,
    converter: KeyPairConverter,
}

impl EnclaveFactory {
    /// Creates a factory over a validated configuration.
    #[must_use]
    pub fn new(config: EnclaveConfig) -> Self {
        Self {
            config,
            converter: KeyPairConverter::new(),
        }
    }

    /// Registers a key vault service.
    #[must_use]
    pub fn with_vault(mut self, vault: Arc<dyn KeyVaultService>) -> Self {
        self.converter = self.converter.with_vault(vault);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EnclaveConfig {
        &self.config
    }

    /// Builds the key manager from the configured key pairs.
    ///
    /// # Errors
    /// Fails if a key pair cannot be converted, a forwarding key is
    /// malformed, or the key pairs are empty or duplicated.
    pub fn key_manager(&self) -> Result<InMemoryKeyManager> {
        let pairs = self.converter.convert(&self.config.keys.key_data)?;
        let forwarding = self.config.keys.forwarding_public_keys()?;
        Ok(InMemoryKeyManager::new(pairs, forwarding)?)
    }

    /// Builds the enclave.
    ///
    /// # Errors
    /// Key manager errors, or `EnclaveUnavailable` if the enclave does not
    /// report `Started`.
    pub fn create(&self) -> Result<Arc<dyn Enclave>> {
        let encryptor: Arc<dyn Encryptor> = Arc::new(XChaChaEncryptor::new());
        let key_manager = Arc::new(self.key_manager()?);
        let enclave: Arc<dyn Enclave> = Arc::new(EnclaveImpl::new(encryptor, key_manager));
        Self::ensure_started(enclave)
    }

    /// Passes `enclave` through only if it reports `Started`.
    ///
    /// # Errors
    /// `EnclaveUnavailable` for any other status.
    pub fn ensure_started(enclave: Arc<dyn Enclave>) -> Result<Arc<dyn Enclave>> {
        match enclave.status() {
            Status::Started => {
                info!(
                    default_key = %enclave.default_public_key(),
                    managed = enclave.public_keys().len(),
                    "Enclave started"
                );
                Ok(enclave)
            }
            status => {
                warn!(%status, "Enclave is not available");
                Err(CoreError::unavailable(format!("enclave status is {status}")).into())
            }
        }
    }

    /// Returns the configured payload encoder.
    #[must_use]
    pub fn payload_encoder(&self) -> Box<dyn PayloadEncoder> {
        codec::create(self.config.encoder.codec)
    }

    /// Returns the configured payload digest.
    #[must_use]
    pub fn payload_digest(&self) -> Box<dyn PayloadDigest> {
        self.config.digest.algorithm.create()
    }
}

// ============================================
// Tests
// ============================================
