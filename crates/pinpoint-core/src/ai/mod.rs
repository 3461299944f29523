//! Pluggable statement extraction backend abstraction
//!
//! This module provides a backend-agnostic interface for pulling structured
//! merchant data out of a processing-statement image.
//!
//! # Architecture
//!
//! - `ExtractionBackend` trait: defines the interface for all extraction operations
//! - `ExtractionClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment
//! let ai = ExtractionClient::from_env();
//!
//! // Extract a statement
//! if let Some(ref client) = ai {
//!     let statement = client.extract_statement(&image_bytes).await?;
//!     println!("Volume: ${:.2}", statement.monthly_volume);
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `PINPOINT_AI_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-2.0-flash)
//! - `GEMINI_HOST`: API base URL (default: https://generativelanguage.googleapis.com)

mod gemini;
mod mock;
pub mod parsing;
pub mod retry;
mod types;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use retry::RetryPolicy;
pub use types::ExtractedStatement;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all extraction backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract structured statement fields from an uploaded image
    async fn extract_statement(&self, image_data: &[u8]) -> Result<ExtractedStatement>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete extraction client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum ExtractionClient {
    /// Gemini generateContent backend (HTTP API)
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl ExtractionClient {
    /// Create an extraction client from environment variables
    ///
    /// Checks `PINPOINT_AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY, GEMINI_MODEL, GEMINI_HOST
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("PINPOINT_AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(ExtractionClient::Gemini),
            "mock" => Some(ExtractionClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown PINPOINT_AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(ExtractionClient::Gemini)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        ExtractionClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl ExtractionBackend for ExtractionClient {
    async fn extract_statement(&self, image_data: &[u8]) -> Result<ExtractedStatement> {
        match self {
            ExtractionClient::Gemini(b) => b.extract_statement(image_data).await,
            ExtractionClient::Mock(b) => b.extract_statement(image_data).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            ExtractionClient::Gemini(b) => b.health_check().await,
            ExtractionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            ExtractionClient::Gemini(b) => b.model(),
            ExtractionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            ExtractionClient::Gemini(b) => b.host(),
            ExtractionClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_client_mock() {
        let client = ExtractionClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = ExtractionClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_extract_statement() {
        let client = ExtractionClient::mock();
        let statement = client.extract_statement(b"fake image").await.unwrap();
        assert!(statement.monthly_volume > 0.0);
        assert!(statement.current_rate > 0.0 && statement.current_rate < 1.0);
    }
}
