//! Fee schedule and terminal hardware pricing
//!
//! The schedule is a process-wide constant: defined once at startup and never
//! mutated. All amounts are USD.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Terminal hardware model offered to merchants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerminalModel {
    /// No countertop terminal
    #[default]
    None,
    DejavooP8,
    DejavooP12Mini,
    DejavooP18,
    PaxA920,
}

impl TerminalModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalModel::None => "none",
            TerminalModel::DejavooP8 => "dejavoo_p8",
            TerminalModel::DejavooP12Mini => "dejavoo_p12_mini",
            TerminalModel::DejavooP18 => "dejavoo_p18",
            TerminalModel::PaxA920 => "pax_a920",
        }
    }

    /// Display name as it appears on order forms
    pub fn display_name(&self) -> &'static str {
        match self {
            TerminalModel::None => "None",
            TerminalModel::DejavooP8 => "Dejavoo P8",
            TerminalModel::DejavooP12Mini => "Dejavoo P12 Mini",
            TerminalModel::DejavooP18 => "Dejavoo P18",
            TerminalModel::PaxA920 => "PAX A920",
        }
    }

    pub fn all() -> &'static [TerminalModel] {
        &[
            TerminalModel::None,
            TerminalModel::DejavooP8,
            TerminalModel::DejavooP12Mini,
            TerminalModel::DejavooP18,
            TerminalModel::PaxA920,
        ]
    }
}

impl fmt::Display for TerminalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TerminalModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "none" => Ok(TerminalModel::None),
            "dejavoo_p8" | "p8" => Ok(TerminalModel::DejavooP8),
            "dejavoo_p12_mini" | "p12_mini" | "p12" => Ok(TerminalModel::DejavooP12Mini),
            "dejavoo_p18" | "p18" => Ok(TerminalModel::DejavooP18),
            "pax_a920" | "a920" => Ok(TerminalModel::PaxA920),
            _ => Err(format!("Unknown terminal model: {}", s)),
        }
    }
}

/// Monthly and one-time fee constants, per merchant
///
/// `Default` carries the current rate card; tests and the server expose it
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Account on file (bank), monthly
    pub account_on_file: f64,
    /// Dejavoo gateway, monthly
    pub gateway: f64,
    /// First terminal, monthly
    pub per_terminal_first: f64,
    /// Each additional terminal, monthly
    pub per_terminal_additional: f64,
    /// Per mobile device, monthly
    pub mobile_monthly: f64,

    /// Dejavoo P8 hardware, one-time
    pub p8_terminal: f64,
    /// Dejavoo P12 Mini hardware, one-time
    pub p12_terminal: f64,
    /// Dejavoo P18 hardware, one-time
    pub p18_terminal: f64,
    /// Dejavoo P8 stand, one-time
    pub stand_p8: f64,
    /// Mobile app download per device, one-time
    pub mobile_app_download: f64,
    /// Dual Pricing compliance fee, one-time (always applies to Dual Pricing)
    pub dual_compliance: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            account_on_file: 7.50,
            gateway: 10.00,
            per_terminal_first: 4.00,
            per_terminal_additional: 2.00,
            mobile_monthly: 10.00,
            p8_terminal: 310.00,
            p12_terminal: 166.75,
            p18_terminal: 446.50,
            stand_p8: 35.00,
            mobile_app_download: 30.00,
            dual_compliance: 3.00,
        }
    }
}

impl FeeSchedule {
    /// One-time hardware price for a terminal model.
    ///
    /// Models without a price book entry (and `None`) cost 0.
    pub fn hardware_price(&self, model: TerminalModel) -> f64 {
        match model {
            TerminalModel::None => 0.0,
            TerminalModel::DejavooP8 => self.p8_terminal,
            TerminalModel::DejavooP12Mini => self.p12_terminal,
            TerminalModel::DejavooP18 => self.p18_terminal,
            // Not in the current hardware price book
            TerminalModel::PaxA920 => 0.0,
        }
    }
}
