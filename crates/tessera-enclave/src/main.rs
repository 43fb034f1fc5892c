// ============================================
// File: crates/tessera-enclave/src/main.rs
// ============================================
//! # Tessera Enclave Entry Point
//!
//! ## Creation Reason
//! Operator tool for checking an enclave configuration before the node
//! that embeds the enclave is started.
//!
//! ## Usage
//! ```bash
//! tessera-enclave validate --config /etc/tessera/enclave.toml
//! tessera-enclave keys --config /etc/tessera/enclave.toml
//! tessera-enclave status --config /etc/tessera/enclave.toml
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - No key vault client is compiled in; vault-backed key pairs are
//!   reported as unsupported
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::error;

use tessera_core::enclave::KeyManager;
use tessera_enclave::{init_logging, EnclaveConfig, EnclaveFactory};

// ============================================
// CLI Definition
// ============================================

/// Tessera private transaction enclave
#[derive(Parser, Debug)]
#[command(name = "tessera-enclave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = "/etc/tessera/enclave.toml")]
        config: PathBuf,
    },

    /// Show default, managed and forwarding public keys
    Keys {
        /// Path to configuration file
        #[arg(short, long, default_value = "/etc/tessera/enclave.toml")]
        config: PathBuf,
    },

    /// Build the enclave and show its status
    Status {
        /// Path to configuration file
        #[arg(short, long, default_value = "/etc/tessera/enclave.toml")]
        config: PathBuf,
    },
}

// ============================================
// Main
// ============================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        // Logging may not be initialized when the config failed to load
        init_logging("info");
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let (Commands::Validate { config } | Commands::Keys { config } | Commands::Status { config }) =
        &command;
    let config = load_config(config).await?;

    match command {
        Commands::Validate { .. } => cmd_validate(&config),
        Commands::Keys { .. } => cmd_keys(config),
        Commands::Status { .. } => cmd_status(config),
    }
}

// ============================================
// Commands
// ============================================

/// Reports the validated configuration.
fn cmd_validate(config: &EnclaveConfig) -> anyhow::Result<()> {
    println!("✅ Configuration is valid");
    println!("   Key pairs:       {}", config.keys.key_data.len());
    println!("   Forwarding keys: {}", config.keys.forwarding_keys.len());
    println!("   Codec:           {}", config.encoder.codec);
    println!("   Digest:          {}", config.digest.algorithm);
    Ok(())
}

/// Prints the public keys the enclave manages.
fn cmd_keys(config: EnclaveConfig) -> anyhow::Result<()> {
    ensure_inline_keys(&config)?;

    let key_manager = EnclaveFactory::new(config)
        .key_manager()
        .context("failed to build key manager")?;

    println!("Default key:");
    println!("   {}", key_manager.default_public_key());
    println!("Managed keys:");
    for key in key_manager.public_keys() {
        println!("   {key}");
    }
    println!("Forwarding keys:");
    for key in key_manager.forwarding_keys() {
        println!("   {key}");
    }
    Ok(())
}

/// Builds the enclave through the factory and prints its status.
fn cmd_status(config: EnclaveConfig) -> anyhow::Result<()> {
    ensure_inline_keys(&config)?;

    let enclave = EnclaveFactory::new(config)
        .create()
        .context("failed to start enclave")?;

    println!("Enclave status:  {}", enclave.status());
    println!("Default key:     {}", enclave.default_public_key());
    println!("Managed keys:    {}", enclave.public_keys().len());
    Ok(())
}

// ============================================
// Helpers
// ============================================

/// Loads configuration and initializes logging with its level.
async fn load_config(path: &Path) -> anyhow::Result<EnclaveConfig> {
    let config = EnclaveConfig::load(path)
        .await
        .with_context(|| format!("cannot use configuration {}", path.display()))?;
    init_logging(&config.logging.level);
    Ok(config)
}

/// Rejects vault-backed key pairs, which this binary cannot fetch.
fn ensure_inline_keys(config: &EnclaveConfig) -> anyhow::Result<()> {
    if let Some((index, vault)) = config
        .keys
        .key_data
        .iter()
        .enumerate()
        .find_map(|(index, data)| data.vault_type().map(|vault| (index, vault)))
    {
        bail!("keys.key_data[{index}]: {vault} key vault is not supported by this binary");
    }
    Ok(())
}
