//! appbits: prepare an app directory or archive for a push.
//!
//! Decides which files must be uploaded and which the platform already
//! holds, records each file's mode, and can package the upload set.

mod commands;
mod config;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting appbits");

    commands::execute(cli, &config)
}
