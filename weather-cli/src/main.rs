//! Binary crate for the `weather-cards` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and confirmations
//! - Rendering cards and reporting outcomes as notifications

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_core::Config;

mod cli;
mod notify;
mod render;

fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let config = Config::load()?;

    init_tracing(config.log_level());

    cmd.run(config)
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
