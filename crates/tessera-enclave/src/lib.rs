// ============================================
// File: crates/tessera-enclave/src/lib.rs
// ============================================
//! # Tessera Enclave Node Library
//!
//! ## Creation Reason
//! Wires the core enclave to the outside world: configuration, key
//! material sources, logging and the enclave factory.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`config`]: TOML configuration
//! - [`keys`]: Key pair conversion (inline and vault-backed)
//! - [`vault`]: Key vault capability
//! - [`factory`]: Enclave, encoder and digest construction
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Node-specific error types
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    tessera-enclave                      │
//! ├─────────────────────────────────────────────────────────┤
//! │                                                         │
//! │  ┌─────────────┐     ┌─────────────┐     ┌───────────┐  │
//! │  │   Config    │────►│   Factory   │────►│  Enclave  │  │
//! │  └─────────────┘     └──────┬──────┘     └───────────┘  │
//! │                             │                           │
//! │                      ┌──────┴──────┐                    │
//! │                      ▼             ▼                    │
//! │               ┌───────────┐  ┌───────────┐              │
//! │               │ Key Pair  │  │ Key Vault │              │
//! │               │ Converter │─►│ Services  │              │
//! │               └───────────┘  └───────────┘              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Configuration changes require restart (no hot-reload)
//! - No vault network client is compiled in; embedders inject one
//!
//! ## Last Modified
//! v0.1.0 - Initial node library

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod factory;
pub mod keys;
pub mod logging;
pub mod vault;

// Re-export primary types
pub use config::EnclaveConfig;
pub use error::{NodeError, Result};
pub use factory::EnclaveFactory;
pub use keys::KeyPairConverter;
pub use logging::init_logging;
pub use vault::{GetSecretData, KeyVaultService, KeyVaultType, MemoryKeyVault};
