//! Mock extraction backend for testing

use async_trait::async_trait;

use crate::error::Result;

use super::types::ExtractedStatement;
use super::ExtractionBackend;

/// Mock backend returning a canned statement
///
/// Used in tests and for local development without an API key
/// (`PINPOINT_AI_BACKEND=mock`).
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    _private: (),
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The statement every extraction returns
    pub fn canned_statement() -> ExtractedStatement {
        ExtractedStatement {
            monthly_volume: 24000.0,
            monthly_fees: 89.95,
            current_rate: 0.0285,
            current_terminal_count: 2,
        }
    }
}

#[async_trait]
impl ExtractionBackend for MockBackend {
    async fn extract_statement(&self, _image_data: &[u8]) -> Result<ExtractedStatement> {
        Ok(Self::canned_statement())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
