//! Fee/commission engine
//!
//! Pure arithmetic over a merchant configuration and the fee schedule. Every
//! figure is recomputed on each call; nothing is cached or stored. The engine
//! never fails: degenerate inputs (zero volume, zero terminals) produce zero
//! or negative figures, not errors.

use serde::{Deserialize, Serialize};

use crate::schedule::{FeeSchedule, TerminalModel};

/// Processor gross margin on Dual Pricing volume
pub const DUAL_PROFIT_PCT: f64 = 0.015;
/// Processor gross margin on Flat Rate volume
pub const FLAT_PROFIT_PCT: f64 = 0.01;
/// Agent revenue share of gross profit, both models
pub const AGENT_REVSHARE: f64 = 0.50;

/// Merchant setup for a single calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// Monthly processing volume in dollars
    pub monthly_volume: f64,
    #[serde(default)]
    pub terminal_model: TerminalModel,
    #[serde(default = "default_terminal_count")]
    pub terminal_count: u32,
    /// Only meaningful when `terminal_model` is the Dejavoo P8
    #[serde(default)]
    pub has_stand: bool,
    #[serde(default)]
    pub mobile_device_count: u32,
}

fn default_terminal_count() -> u32 {
    1
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            monthly_volume: 0.0,
            terminal_model: TerminalModel::None,
            terminal_count: 1,
            has_stand: false,
            mobile_device_count: 0,
        }
    }
}

/// Itemized monthly fees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFeeBreakdown {
    pub account_on_file: f64,
    pub gateway: f64,
    pub first_terminal: f64,
    pub additional_terminals: f64,
    pub mobile_devices: f64,
    pub total: f64,
}

impl MonthlyFeeBreakdown {
    fn compute(config: &MerchantConfig, schedule: &FeeSchedule) -> Self {
        let additional_terminals =
            config.terminal_count.saturating_sub(1) as f64 * schedule.per_terminal_additional;
        let mobile_devices = config.mobile_device_count as f64 * schedule.mobile_monthly;
        let total = schedule.account_on_file
            + schedule.gateway
            + schedule.per_terminal_first
            + additional_terminals
            + mobile_devices;
        Self {
            account_on_file: schedule.account_on_file,
            gateway: schedule.gateway,
            first_terminal: schedule.per_terminal_first,
            additional_terminals,
            mobile_devices,
            total,
        }
    }
}

/// Itemized one-time setup fees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneTimeFeeBreakdown {
    pub terminal_hardware: f64,
    pub stand: f64,
    pub mobile_app_downloads: f64,
    /// 0 on Flat Rate; the compliance fee only applies to Dual Pricing
    pub compliance: f64,
    pub total: f64,
}

impl OneTimeFeeBreakdown {
    fn compute(config: &MerchantConfig, schedule: &FeeSchedule, dual_pricing: bool) -> Self {
        let terminal_hardware = schedule.hardware_price(config.terminal_model);
        let stand = if config.terminal_model == TerminalModel::DejavooP8 && config.has_stand {
            schedule.stand_p8
        } else {
            0.0
        };
        let mobile_app_downloads =
            config.mobile_device_count as f64 * schedule.mobile_app_download;
        let compliance = if dual_pricing {
            schedule.dual_compliance
        } else {
            0.0
        };
        let total = terminal_hardware + stand + mobile_app_downloads + compliance;
        Self {
            terminal_hardware,
            stand,
            mobile_app_downloads,
            compliance,
            total,
        }
    }
}

/// Derived economics for one pricing model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Processor monthly revenue before revenue share
    pub gross_profit: f64,
    /// Agent share of gross profit
    pub agent_commission: f64,
    pub monthly_fees: MonthlyFeeBreakdown,
    /// Commission minus monthly fees; may be negative, never clamped
    pub net_after_absorbing_fees: f64,
    pub one_time_fees: OneTimeFeeBreakdown,
    /// Yearly commission when monthly fees are passed to the merchant
    pub annual_pass_through: f64,
    /// Yearly commission when the agent absorbs monthly fees
    pub annual_absorbed: f64,
}

impl PricingResult {
    fn compute(
        config: &MerchantConfig,
        schedule: &FeeSchedule,
        profit_pct: f64,
        dual_pricing: bool,
    ) -> Self {
        let monthly_fees = MonthlyFeeBreakdown::compute(config, schedule);
        let one_time_fees = OneTimeFeeBreakdown::compute(config, schedule, dual_pricing);

        let gross_profit = config.monthly_volume * profit_pct;
        let agent_commission = gross_profit * AGENT_REVSHARE;
        let net_after_absorbing_fees = agent_commission - monthly_fees.total;

        Self {
            gross_profit,
            agent_commission,
            monthly_fees,
            net_after_absorbing_fees,
            one_time_fees,
            annual_pass_through: agent_commission * 12.0,
            annual_absorbed: net_after_absorbing_fees * 12.0,
        }
    }
}

/// Side-by-side economics under both pricing models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeComparison {
    pub dual: PricingResult,
    pub flat: PricingResult,
}

/// Compute agent economics for a merchant under Dual Pricing and Flat Rate.
pub fn compute_fees(config: &MerchantConfig, schedule: &FeeSchedule) -> FeeComparison {
    FeeComparison {
        dual: PricingResult::compute(config, schedule, DUAL_PROFIT_PCT, true),
        flat: PricingResult::compute(config, schedule, FLAT_PROFIT_PCT, false),
    }
}
