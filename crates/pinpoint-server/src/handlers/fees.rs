//! Fee calculation handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::AppState;
use pinpoint_core::{
    engine, parse_dollar_input, FeeComparison, FeeSchedule, MerchantConfig, TerminalModel,
};

/// GET /api/schedule - The fee schedule constants
pub async fn get_schedule(State(state): State<Arc<AppState>>) -> Json<FeeSchedule> {
    Json(state.schedule.clone())
}

/// Merchant setup as submitted by the form. Volume arrives as free text
/// ("$15,000") and is normalized server-side.
#[derive(Debug, Deserialize)]
pub struct FeesRequest {
    pub volume: String,
    #[serde(default)]
    pub terminal_model: TerminalModel,
    #[serde(default = "default_terminal_count")]
    pub terminal_count: u32,
    #[serde(default)]
    pub has_stand: bool,
    #[serde(default)]
    pub mobile_device_count: u32,
}

fn default_terminal_count() -> u32 {
    1
}

/// POST /api/fees - Compute agent economics under both pricing models
///
/// The engine is total: any well-formed request body yields a comparison,
/// so this handler has no error path.
pub async fn calculate_fees(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeesRequest>,
) -> Json<FeeComparison> {
    let config = MerchantConfig {
        monthly_volume: parse_dollar_input(&request.volume),
        terminal_model: request.terminal_model,
        terminal_count: request.terminal_count,
        has_stand: request.has_stand,
        mobile_device_count: request.mobile_device_count,
    };

    Json(engine::compute_fees(&config, &state.schedule))
}
