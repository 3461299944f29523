//! Pinpoint Core Library
//!
//! Shared functionality for the Pinpoint agent revenue and fees calculator:
//! - Free-text dollar input normalization
//! - Fee schedule and terminal hardware price table
//! - Fee/commission engine comparing Dual Pricing vs Flat Rate
//! - Client proposal composer with current-cost baseline and savings
//! - Pluggable statement extraction backends (Gemini, mock)
//! - Retry policy with exponential backoff for extraction calls

pub mod ai;
pub mod engine;
pub mod error;
pub mod input;
pub mod proposal;
pub mod schedule;

/// Test utilities including the mock extraction server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    ExtractedStatement, ExtractionBackend, ExtractionClient, GeminiBackend, MockBackend,
    RetryPolicy,
};
pub use engine::{
    compute_fees, FeeComparison, MerchantConfig, MonthlyFeeBreakdown, OneTimeFeeBreakdown,
    PricingResult,
};
pub use error::{Error, Result};
pub use input::parse_dollar_input;
pub use proposal::{
    compose_proposal, ClientProposal, CostBaseline, ModelProjection, ProposalOverrides,
    SessionContext,
};
pub use schedule::{FeeSchedule, TerminalModel};
