//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use pinpoint_core::ai::ExtractionBackend;

/// GET /api/health - Service and extraction backend status
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ai = match &state.ai {
        Some(client) => Some(AiStatus {
            host: client.host().to_string(),
            model: client.model().to_string(),
            available: client.health_check().await,
        }),
        None => None,
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        ai,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// None when no extraction backend is configured
    pub ai: Option<AiStatus>,
}

#[derive(Debug, Serialize)]
pub struct AiStatus {
    pub host: String,
    pub model: String,
    pub available: bool,
}
