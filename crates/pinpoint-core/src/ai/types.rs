//! Extraction backend response types

use serde::{Deserialize, Serialize};

/// Structured fields pulled from a merchant processing statement
///
/// All four fields are required by the extraction contract; a response
/// missing any of them is rejected rather than defaulted. Callers that
/// receive no statement at all fall back to the composer's documented
/// manual-entry defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractedStatement {
    /// Monthly processing volume in dollars
    pub monthly_volume: f64,
    /// Total monthly fees charged by the current provider
    pub monthly_fees: f64,
    /// Effective rate as a 0-1 decimal (e.g. 0.028 for 2.8%)
    #[serde(rename = "current_rate_percentage")]
    pub current_rate: f64,
    /// Terminals on the account
    pub current_terminal_count: u32,
}
