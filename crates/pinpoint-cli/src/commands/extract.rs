//! Extract command: statement image to structured fields

use std::path::Path;

use anyhow::{Context, Result};

use pinpoint_core::ai::{ExtractedStatement, ExtractionBackend, ExtractionClient};

/// Run extraction on a statement image and print the fields
pub async fn cmd_extract(image: &Path, json: bool) -> Result<()> {
    let client = resolve_client().await?;

    let image_data = std::fs::read(image)
        .with_context(|| format!("Failed to read image: {}", image.display()))?;

    println!("📄 Analyzing {}...", image.display());
    match client.extract_statement(&image_data).await {
        Ok(statement) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&statement)?);
            } else {
                print_statement(&statement);
            }
            Ok(())
        }
        Err(e) => {
            println!("❌ Extraction failed: {}", e);
            println!("\n   Enter the statement values manually with:");
            println!("   pinpoint propose --volume 15000 --fees 75 --rate 0.028");
            Ok(())
        }
    }
}

/// Build the extraction client, with connection diagnostics
pub(crate) async fn resolve_client() -> Result<ExtractionClient> {
    let client = ExtractionClient::from_env().ok_or_else(|| {
        anyhow::anyhow!("Extraction backend not configured. Set GEMINI_API_KEY environment variable.")
    })?;

    println!("🔍 Extraction backend: {} (model: {})", client.host(), client.model());

    if !client.health_check().await {
        println!("⚠️  Backend not responding at {}; the call may fail", client.host());
    }

    Ok(client)
}

pub(crate) fn print_statement(statement: &ExtractedStatement) {
    println!("✅ Extracted statement fields:\n");
    println!("  Monthly volume:      ${:.2}", statement.monthly_volume);
    println!("  Monthly fees:        ${:.2}", statement.monthly_fees);
    println!(
        "  Effective rate:      {:.2}%",
        statement.current_rate * 100.0
    );
    println!("  Terminals:           {}", statement.current_terminal_count);
}
