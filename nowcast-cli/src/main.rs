//! Binary crate for the `nowcast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - CLI implementations of the platform collaborators (location,
//!   permissions, render surface)

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod platform;

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
