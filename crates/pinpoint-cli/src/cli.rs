//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pinpoint - Agent revenue and fees calculator
#[derive(Parser)]
#[command(name = "pinpoint")]
#[command(about = "Compare Dual Pricing vs Flat Rate merchant economics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute agent commissions and fees for a merchant
    Calculate {
        /// Monthly processing volume (free text, e.g. "$15,000")
        #[arg(short = 'V', long, default_value = "15,000")]
        volume: String,

        /// Terminal model: none, p8, p12-mini, p18, a920
        #[arg(short, long, default_value = "none")]
        terminal: String,

        /// Number of terminals
        #[arg(short = 'n', long, default_value = "1")]
        terminals: u32,

        /// Add the Dejavoo P8 stand ($35 one-time, P8 only)
        #[arg(long)]
        stand: bool,

        /// Number of mobile devices
        #[arg(short, long, default_value = "0")]
        mobile: u32,

        /// Print the comparison as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Extract statement fields from an image via the AI backend
    Extract {
        /// Statement image to analyze (JPEG/PNG)
        #[arg(short, long)]
        image: PathBuf,

        /// Print the extracted fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compose a client savings proposal
    Propose {
        /// Statement image to analyze first (optional; manual values
        /// and defaults are used when omitted or when extraction fails)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Override: monthly processing volume (free text)
        #[arg(short = 'V', long)]
        volume: Option<String>,

        /// Override: current monthly fees in dollars
        #[arg(long)]
        fees: Option<f64>,

        /// Override: current effective rate as a 0-1 decimal (e.g. 0.028)
        #[arg(long)]
        rate: Option<f64>,

        /// Override: number of terminals
        #[arg(short = 'n', long)]
        terminals: Option<u32>,

        /// Print the proposal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
