//! Test utilities for pinpoint-core
//!
//! Provides a mock extraction server that speaks just enough of the Gemini
//! generateContent protocol to exercise the extraction client, including a
//! scripted failure sequence for retry tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::sync::oneshot;

/// Mock Gemini-shaped extraction server for testing
pub struct MockExtractionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    state: Arc<ServerState>,
}

struct ServerState {
    /// Requests still to be answered with `failure_status`
    remaining_failures: AtomicU32,
    failure_status: u16,
    attempts: AtomicU32,
    /// Candidate text returned once failures are exhausted
    response_text: String,
}

/// Statement JSON the server returns by default
pub fn default_statement_json() -> String {
    r#"{
        "monthly_volume": 42000.0,
        "monthly_fees": 132.50,
        "current_rate_percentage": 0.0295,
        "current_terminal_count": 2
    }"#
    .to_string()
}

impl MockExtractionServer {
    /// Start a server that succeeds on every request
    pub async fn start() -> Self {
        Self::start_scripted(0, 503, default_statement_json()).await
    }

    /// Start a server that fails the first `failures` requests with `status`,
    /// then succeeds
    pub async fn failing_then_ok(failures: u32, status: u16) -> Self {
        Self::start_scripted(failures, status, default_statement_json()).await
    }

    /// Start a server that always succeeds but returns `text` as the
    /// candidate content (for malformed/contract-violation scripts)
    pub async fn with_response_text(text: &str) -> Self {
        Self::start_scripted(0, 503, text.to_string()).await
    }

    async fn start_scripted(failures: u32, status: u16, response_text: String) -> Self {
        let state = Arc::new(ServerState {
            remaining_failures: AtomicU32::new(failures),
            failure_status: status,
            attempts: AtomicU32::new(0),
            response_text,
        });

        let app = Router::new()
            .route("/v1beta/models/:model", post(handle_generate))
            .route("/v1beta/models/:model", get(handle_model_info))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            state,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generate requests received so far
    pub fn attempts(&self) -> u32 {
        self.state.attempts.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockExtractionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// generateContent endpoint: scripted failures, then a canned candidate
async fn handle_generate(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    state.attempts.fetch_add(1, Ordering::SeqCst);

    let failures = state.remaining_failures.load(Ordering::SeqCst);
    if failures > 0 {
        state.remaining_failures.fetch_sub(1, Ordering::SeqCst);
        let status =
            StatusCode::from_u16(state.failure_status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        return (status, Json(serde_json::json!({ "error": "scripted failure" })))
            .into_response();
    }

    let body = serde_json::json!({
        "candidates": [
            {
                "content": {
                    "parts": [ { "text": state.response_text } ]
                }
            }
        ]
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// Model info endpoint (health check)
async fn handle_model_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "models/test-model",
        "supportedGenerationMethods": ["generateContent"]
    }))
}
