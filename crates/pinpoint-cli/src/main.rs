//! Pinpoint CLI - Agent revenue and fees calculator
//!
//! Usage:
//!   pinpoint calculate --volume "15,000" --terminal p8   Compare pricing models
//!   pinpoint extract --image statement.jpg               Read a statement image
//!   pinpoint propose --image statement.jpg               Build a savings proposal
//!   pinpoint serve --port 3000                           Start the web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Calculate {
            volume,
            terminal,
            terminals,
            stand,
            mobile,
            json,
        } => commands::cmd_calculate(&volume, &terminal, terminals, stand, mobile, json),
        Commands::Extract { image, json } => commands::cmd_extract(&image, json).await,
        Commands::Propose {
            image,
            volume,
            fees,
            rate,
            terminals,
            json,
        } => {
            commands::cmd_propose(
                image.as_deref(),
                volume.as_deref(),
                fees,
                rate,
                terminals,
                json,
            )
            .await
        }
        Commands::Serve { port, host } => commands::cmd_serve(&host, port).await,
    }
}
