//! CLI configuration module

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    commands::Command,
    config::{backend::BackendArgs, logging::LoggingConfig},
};

pub(crate) mod backend;
pub(crate) mod logging;

/// Achei command line
#[derive(Debug, Parser)]
#[command(name = "achei", about = "Achei local marketplace", long_about = None)]
pub struct CliConfig {
    /// Hosted backend settings.
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// File the shopping cart is kept in
    #[arg(long, env = "ACHEI_CART_FILE", default_value = "achei-cart.json", global = true)]
    pub cart_file: PathBuf,

    /// Seconds between notification polls
    #[arg(long, env = "ACHEI_POLL_INTERVAL_SECS", default_value_t = 5, global = true)]
    pub poll_interval_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Period of the notification watcher, never below one second.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}
