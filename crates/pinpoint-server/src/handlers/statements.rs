//! Statement upload and extraction handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use tracing::warn;

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use pinpoint_core::ai::{ExtractedStatement, ExtractionBackend};
use pinpoint_core::Error;

/// POST /api/statements - Extract structured fields from a statement image
///
/// Body is the raw image bytes (JPEG/PNG). Extraction failure is recoverable
/// by design: the client treats any error status as "fall back to manual
/// entry" and the proposal endpoint works without an extraction.
pub async fn extract_statement(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ExtractedStatement>, AppError> {
    let ai = state.ai.as_ref().ok_or_else(|| {
        AppError::service_unavailable("Extraction backend not configured")
    })?;

    let bytes = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body or file too large (max 10MB)"))?;

    if bytes.is_empty() {
        return Err(AppError::bad_request("No image data provided"));
    }

    match ai.extract_statement(&bytes).await {
        Ok(statement) => Ok(Json(statement)),
        Err(err @ (Error::Transient { .. } | Error::Remote { .. } | Error::Http(_))) => {
            warn!(error = %err, "Statement extraction failed upstream");
            Err(AppError::bad_gateway(&format!(
                "Statement extraction failed: {}",
                err
            )))
        }
        Err(err) => {
            warn!(error = %err, "Statement extraction returned unusable data");
            Err(AppError::bad_gateway(&format!(
                "Statement could not be read: {}",
                err
            )))
        }
    }
}
