//! Lockwallet - command-line entry point
//!
//! Loads configuration, installs logging, wires the API client and runs
//! one command.

mod cli;
mod commands;
mod navigator;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lockwallet_application::SecureStorage;
use lockwallet_infrastructure::{
    AppConfig, MemorySecureStorage, build_client, file_storage, init_logging,
};

use crate::cli::Cli;
use crate::navigator::TerminalNavigator;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting lockwallet");

    let storage: Arc<dyn SecureStorage> = if cli.ephemeral {
        Arc::new(MemorySecureStorage::new())
    } else {
        file_storage(&config)?
    };
    let client = build_client(&config, storage, Arc::new(TerminalNavigator))?;

    commands::run(cli.command, &client).await
}
