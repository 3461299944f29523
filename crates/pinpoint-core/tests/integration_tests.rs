//! Integration tests for pinpoint-core
//!
//! These tests exercise the full normalize → extract → compose workflow.

use pinpoint_core::{
    compose_proposal, compute_fees, parse_dollar_input, ExtractionBackend, ExtractionClient,
    FeeSchedule, MerchantConfig, ProposalOverrides, SessionContext, TerminalModel,
};

#[test]
fn test_calculator_workflow_from_free_text() {
    // Agent types a formatted volume, picks a P8, leaves the rest default
    let volume = parse_dollar_input("$15,000");
    let config = MerchantConfig {
        monthly_volume: volume,
        terminal_model: TerminalModel::DejavooP8,
        terminal_count: 1,
        has_stand: false,
        mobile_device_count: 0,
    };

    let schedule = FeeSchedule::default();
    let result = compute_fees(&config, &schedule);

    assert_eq!(result.dual.monthly_fees.total, 21.50);
    assert_eq!(result.dual.agent_commission, 112.50);
    assert_eq!(result.dual.net_after_absorbing_fees, 91.00);
    assert_eq!(result.dual.one_time_fees.total, 313.00);
    assert_eq!(result.flat.agent_commission, 75.00);
    assert_eq!(result.flat.one_time_fees.total, 310.00);
}

#[test]
fn test_garbage_volume_degenerates_instead_of_failing() {
    let config = MerchantConfig {
        monthly_volume: parse_dollar_input("not a number"),
        terminal_model: TerminalModel::None,
        terminal_count: 1,
        has_stand: false,
        mobile_device_count: 0,
    };
    let result = compute_fees(&config, &FeeSchedule::default());

    assert_eq!(result.dual.gross_profit, 0.0);
    assert_eq!(result.dual.net_after_absorbing_fees, -21.50);
    // Dual still carries the compliance fee with no equipment at all
    assert_eq!(result.dual.one_time_fees.total, 3.00);
}

#[tokio::test]
async fn test_extract_then_compose_workflow() {
    let client = ExtractionClient::mock();
    let extracted = client.extract_statement(b"statement image").await.unwrap();

    // Agent reviews the extraction and corrects the fee total before committing
    let ctx = SessionContext {
        extracted: Some(extracted),
        overrides: ProposalOverrides {
            monthly_fees: Some(95.00),
            ..Default::default()
        },
    };
    let proposal = compose_proposal(&ctx, &FeeSchedule::default());

    // Extracted volume/rate survive, override wins for fees
    assert_eq!(proposal.current.monthly_volume, extracted.monthly_volume);
    assert_eq!(proposal.current.current_rate, extracted.current_rate);
    assert_eq!(proposal.current.monthly_fees, 95.00);

    assert_eq!(
        proposal.current.monthly_cost,
        extracted.monthly_volume * extracted.current_rate + 95.00
    );
    assert_eq!(proposal.current.annual_cost, proposal.current.monthly_cost * 12.0);

    // Savings are exact complements of the projected annual costs
    assert_eq!(
        proposal.dual.annual_savings,
        proposal.current.annual_cost - proposal.dual.annual_cost
    );
}

#[tokio::test]
async fn test_composer_falls_back_when_extraction_absent() {
    // Extraction failed upstream; the composer sees no statement
    let ctx = SessionContext {
        extracted: None,
        overrides: ProposalOverrides::default(),
    };
    let proposal = compose_proposal(&ctx, &FeeSchedule::default());

    // Documented manual-entry defaults
    assert_eq!(proposal.current.monthly_volume, 15000.0);
    assert_eq!(proposal.current.monthly_fees, 75.00);
    assert_eq!(proposal.current.current_rate, 0.028);
    assert_eq!(proposal.agent.flat.monthly_fees.total, 21.50);
}
