//! Main Entrypoint for a Parley Voice-Agent Tool Server
//!
//! This binary is responsible for:
//! 1. Parsing which persona to serve.
//! 2. Loading configuration from the environment.
//! 3. Initializing logging on stderr (stdout is the MCP transport).
//! 4. Serving the persona's tools over stdio until the host disconnects.

use anyhow::Context;
use clap::Parser;
use parley_agent::{cli::Cli, config::Config, runtime};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    info!(
        faq = %config.faq_path.display(),
        leads = %config.leads_path.display(),
        "Configuration loaded"
    );

    // --- 3. Serve ---
    runtime::run(cli.persona.into(), &config).await?;

    info!("Agent has shut down.");
    Ok(())
}
