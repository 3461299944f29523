//! Client proposal composer
//!
//! Combines an extracted statement (when one exists) with manual overrides to
//! build a current-cost baseline and projected savings under each pricing
//! model. Total over its inputs: extraction failure simply means the extracted
//! side is `None` and the documented defaults fill the gaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ai::ExtractedStatement;
use crate::engine::{compute_fees, FeeComparison, MerchantConfig};
use crate::schedule::{FeeSchedule, TerminalModel};

/// Merchant-facing Dual Pricing rate in the proposal flow
pub const DUAL_MERCHANT_RATE: f64 = 0.0399;
/// Merchant-facing Flat Rate percentage
pub const FLAT_MERCHANT_RATE: f64 = 0.0295;
/// Flat Rate per-transaction-equivalent charge, per $1000 of volume
pub const FLAT_PER_THOUSAND: f64 = 0.30;

/// Defaults applied when neither extraction nor overrides supply a field
pub const DEFAULT_MONTHLY_VOLUME: f64 = 15000.0;
pub const DEFAULT_MONTHLY_FEES: f64 = 75.00;
pub const DEFAULT_CURRENT_RATE: f64 = 0.028;
pub const DEFAULT_TERMINAL_COUNT: u32 = 1;

/// Manual overrides reviewed by the agent before composing a proposal.
///
/// Present fields always win over extracted values; the review step in the
/// UI flow means whatever arrives here is final.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalOverrides {
    pub monthly_volume: Option<f64>,
    pub monthly_fees: Option<f64>,
    /// Effective rate as a 0-1 decimal
    pub current_rate: Option<f64>,
    pub terminal_count: Option<u32>,
    pub terminal_model: Option<TerminalModel>,
    pub has_stand: Option<bool>,
    pub mobile_device_count: Option<u32>,
}

/// Everything the composer needs for one proposal, passed explicitly.
///
/// The caller owns this value; there is no ambient session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub extracted: Option<ExtractedStatement>,
    #[serde(default)]
    pub overrides: ProposalOverrides,
}

/// The merchant's cost of processing under their current provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBaseline {
    pub monthly_volume: f64,
    /// Effective rate as a 0-1 decimal
    pub current_rate: f64,
    pub monthly_fees: f64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
}

/// Projected merchant cost under one proposed pricing model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelProjection {
    pub monthly_cost: f64,
    pub annual_cost: f64,
    /// Current annual cost minus proposed annual cost. Negative means the
    /// proposal costs the client more; surfaced, never hidden.
    pub annual_savings: f64,
}

/// Composed proposal: baseline, per-model projections, agent economics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProposal {
    pub current: CostBaseline,
    pub dual: ModelProjection,
    pub flat: ModelProjection,
    /// Agent-side commission forecast for the resolved merchant setup
    pub agent: FeeComparison,
    pub generated_at: DateTime<Utc>,
}

/// Compose a client proposal from extraction output and manual overrides.
///
/// Merge rule: override field > extracted field > documented default.
pub fn compose_proposal(ctx: &SessionContext, schedule: &FeeSchedule) -> ClientProposal {
    let extracted = ctx.extracted.as_ref();
    let overrides = &ctx.overrides;

    let monthly_volume = overrides
        .monthly_volume
        .or(extracted.map(|e| e.monthly_volume))
        .unwrap_or(DEFAULT_MONTHLY_VOLUME);
    let monthly_fees = overrides
        .monthly_fees
        .or(extracted.map(|e| e.monthly_fees))
        .unwrap_or(DEFAULT_MONTHLY_FEES);
    let current_rate = overrides
        .current_rate
        .or(extracted.map(|e| e.current_rate))
        .unwrap_or(DEFAULT_CURRENT_RATE);
    let terminal_count = overrides
        .terminal_count
        .or(extracted.map(|e| e.current_terminal_count))
        .unwrap_or(DEFAULT_TERMINAL_COUNT);

    let config = MerchantConfig {
        monthly_volume,
        terminal_model: overrides.terminal_model.unwrap_or_default(),
        terminal_count,
        has_stand: overrides.has_stand.unwrap_or(false),
        mobile_device_count: overrides.mobile_device_count.unwrap_or(0),
    };
    let agent = compute_fees(&config, schedule);

    let current_monthly = monthly_volume * current_rate + monthly_fees;
    let current = CostBaseline {
        monthly_volume,
        current_rate,
        monthly_fees,
        monthly_cost: current_monthly,
        annual_cost: current_monthly * 12.0,
    };

    // Dual Pricing carries the compliance fee unconditionally
    let dual_monthly = monthly_volume * DUAL_MERCHANT_RATE + schedule.dual_compliance;
    let flat_monthly = monthly_volume * FLAT_MERCHANT_RATE
        + (monthly_volume / 1000.0) * FLAT_PER_THOUSAND
        + agent.flat.monthly_fees.total;

    ClientProposal {
        current,
        dual: projection(dual_monthly, current.annual_cost),
        flat: projection(flat_monthly, current.annual_cost),
        agent,
        generated_at: Utc::now(),
    }
}

fn projection(monthly_cost: f64, current_annual_cost: f64) -> ModelProjection {
    let annual_cost = monthly_cost * 12.0;
    ModelProjection {
        monthly_cost,
        annual_cost,
        annual_savings: current_annual_cost - annual_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement() -> ExtractedStatement {
        ExtractedStatement {
            monthly_volume: 42000.0,
            monthly_fees: 120.0,
            current_rate: 0.031,
            current_terminal_count: 2,
        }
    }

    #[test]
    fn test_defaults_when_nothing_supplied() {
        let schedule = FeeSchedule::default();
        let proposal = compose_proposal(&SessionContext::default(), &schedule);

        assert_eq!(proposal.current.monthly_volume, 15000.0);
        assert_eq!(proposal.current.monthly_fees, 75.00);
        assert_eq!(proposal.current.current_rate, 0.028);
        // 15000 * 0.028 + 75 = 495
        assert_eq!(proposal.current.monthly_cost, 495.0);
        assert_eq!(proposal.current.annual_cost, 5940.0);
    }

    #[test]
    fn test_extracted_values_used_when_no_overrides() {
        let schedule = FeeSchedule::default();
        let ctx = SessionContext {
            extracted: Some(statement()),
            overrides: ProposalOverrides::default(),
        };
        let proposal = compose_proposal(&ctx, &schedule);

        assert_eq!(proposal.current.monthly_volume, 42000.0);
        assert_eq!(proposal.current.monthly_fees, 120.0);
        assert_eq!(proposal.current.current_rate, 0.031);
        // terminal count flows into the merchant monthly fee total:
        // 7.50 + 10.00 + 4.00 + 1 * 2.00
        assert_eq!(proposal.agent.flat.monthly_fees.total, 23.50);
    }

    #[test]
    fn test_overrides_beat_extracted_values() {
        let schedule = FeeSchedule::default();
        let ctx = SessionContext {
            extracted: Some(statement()),
            overrides: ProposalOverrides {
                monthly_volume: Some(50000.0),
                current_rate: Some(0.025),
                ..Default::default()
            },
        };
        let proposal = compose_proposal(&ctx, &schedule);

        assert_eq!(proposal.current.monthly_volume, 50000.0);
        assert_eq!(proposal.current.current_rate, 0.025);
        // fees still come from the statement
        assert_eq!(proposal.current.monthly_fees, 120.0);
    }

    #[test]
    fn test_dual_projection_includes_compliance_fee() {
        let schedule = FeeSchedule::default();
        let ctx = SessionContext {
            extracted: None,
            overrides: ProposalOverrides {
                monthly_volume: Some(10000.0),
                ..Default::default()
            },
        };
        let proposal = compose_proposal(&ctx, &schedule);

        // 10000 * 0.0399 + 3.00
        assert_eq!(proposal.dual.monthly_cost, 402.0);
        // 10000 * 0.0295 + 10 * 0.30 + 21.50
        assert_eq!(proposal.flat.monthly_cost, 295.0 + 3.0 + 21.50);
    }

    #[test]
    fn test_negative_savings_surfaced() {
        let schedule = FeeSchedule::default();
        // A merchant currently paying far below either proposal
        let ctx = SessionContext {
            extracted: None,
            overrides: ProposalOverrides {
                monthly_volume: Some(10000.0),
                monthly_fees: Some(0.0),
                current_rate: Some(0.005),
                ..Default::default()
            },
        };
        let proposal = compose_proposal(&ctx, &schedule);

        assert!(proposal.dual.annual_savings < 0.0);
        assert!(proposal.flat.annual_savings < 0.0);
    }

    #[test]
    fn test_savings_arithmetic() {
        let schedule = FeeSchedule::default();
        let proposal = compose_proposal(&SessionContext::default(), &schedule);

        assert_eq!(
            proposal.dual.annual_savings,
            proposal.current.annual_cost - proposal.dual.annual_cost
        );
        assert_eq!(
            proposal.flat.annual_savings,
            proposal.current.annual_cost - proposal.flat.annual_cost
        );
    }
}
