// ============================================
// File: crates/tessera-enclave/src/logging.rs
// ============================================
//! # Logging Setup
//!
//! `RUST_LOG` wins over the configured level. Only the first call
//! installs a subscriber; later calls are no-ops.
//!
//! ## Last Modified
//! v0.1.0 - Initial logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global `tracing` subscriber.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .ok();
}
