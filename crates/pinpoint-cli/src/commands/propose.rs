//! Propose command: current-cost baseline and projected savings

use std::path::Path;

use anyhow::{Context, Result};

use pinpoint_core::ai::ExtractionBackend;
use pinpoint_core::{
    compose_proposal, parse_dollar_input, ClientProposal, FeeSchedule, ProposalOverrides,
    SessionContext,
};

use super::extract::{print_statement, resolve_client};

/// Compose and print a client proposal
///
/// Extraction failure is a recoverable path: the proposal falls back to the
/// overrides and documented defaults.
pub async fn cmd_propose(
    image: Option<&Path>,
    volume: Option<&str>,
    fees: Option<f64>,
    rate: Option<f64>,
    terminals: Option<u32>,
    json: bool,
) -> Result<()> {
    let extracted = match image {
        Some(path) => {
            let client = resolve_client().await?;
            let image_data = std::fs::read(path)
                .with_context(|| format!("Failed to read image: {}", path.display()))?;

            println!("📄 Analyzing {}...", path.display());
            match client.extract_statement(&image_data).await {
                Ok(statement) => {
                    print_statement(&statement);
                    println!();
                    Some(statement)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Statement extraction failed");
                    println!("⚠️  Extraction failed ({}); using manual values\n", e);
                    None
                }
            }
        }
        None => None,
    };

    let ctx = SessionContext {
        extracted,
        overrides: ProposalOverrides {
            monthly_volume: volume.map(parse_dollar_input),
            monthly_fees: fees,
            current_rate: rate,
            terminal_count: terminals,
            ..Default::default()
        },
    };

    let proposal = compose_proposal(&ctx, &FeeSchedule::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&proposal)?);
        return Ok(());
    }

    print_proposal(&proposal);
    Ok(())
}

fn print_proposal(proposal: &ClientProposal) {
    let current = &proposal.current;

    println!("📊 Current Processing Costs");
    println!("  Monthly volume:      ${:.2}", current.monthly_volume);
    println!("  Effective rate:      {:.2}%", current.current_rate * 100.0);
    println!("  Monthly fees:        ${:.2}", current.monthly_fees);
    println!("  Monthly cost:        ${:.2}", current.monthly_cost);
    println!("  Annual cost:         ${:.2}", current.annual_cost);

    println!("\n💰 Proposed: Dual Pricing (3.99%)");
    println!("  Monthly cost:        ${:.2}", proposal.dual.monthly_cost);
    println!("  Annual cost:         ${:.2}", proposal.dual.annual_cost);
    print_savings(proposal.dual.annual_savings);

    println!("\n💰 Proposed: Flat Rate (2.95% + $0.30)");
    println!("  Monthly cost:        ${:.2}", proposal.flat.monthly_cost);
    println!("  Annual cost:         ${:.2}", proposal.flat.annual_cost);
    print_savings(proposal.flat.annual_savings);

    println!("\n🤝 Agent commission (monthly, absorbing fees)");
    println!(
        "  Dual Pricing:        ${:.2}",
        proposal.agent.dual.net_after_absorbing_fees
    );
    println!(
        "  Flat Rate:           ${:.2}",
        proposal.agent.flat.net_after_absorbing_fees
    );
}

fn print_savings(annual_savings: f64) {
    if annual_savings >= 0.0 {
        println!("  Annual savings:      ${:.2}", annual_savings);
    } else {
        // Costs the client more than their current provider; say so plainly
        println!("  Annual savings:      -${:.2} (more expensive)", -annual_savings);
    }
}
