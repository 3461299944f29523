//! Proposal handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;
use pinpoint_core::{proposal, ClientProposal, SessionContext};

/// POST /api/proposals - Compose a client proposal
///
/// The body is the caller's session context: the reviewed extraction result
/// (if any) plus manual overrides. Missing fields fall back to the composer's
/// documented defaults, so this handler has no error path.
pub async fn create_proposal(
    State(state): State<Arc<AppState>>,
    Json(ctx): Json<SessionContext>,
) -> Json<ClientProposal> {
    Json(proposal::compose_proposal(&ctx, &state.schedule))
}
