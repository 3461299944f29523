//! Gemini backend implementation
//!
//! HTTP client for the Gemini generateContent API. Sends the statement image
//! inline with a strict JSON response schema and retries transient failures
//! under the configured [`RetryPolicy`].

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::parsing::parse_statement_response;
use super::retry::RetryPolicy;
use super::types::ExtractedStatement;
use super::ExtractionBackend;

/// Overall deadline for a single API request, independent of the retry budget
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_INSTRUCTION: &str = "You are a merchant services analyst. Read the attached \
merchant processing statement image and extract the monthly processing volume in dollars, \
the total monthly fees in dollars, the effective rate as a decimal between 0 and 1, and \
the number of card terminals on the account. Respond with JSON only.";

/// Gemini generateContent backend
///
/// The API key, model, and host come from the caller (or `from_env` for the
/// CLI/server collaborators); the extraction contract itself is fixed.
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    retry: RetryPolicy,
}

impl Clone for GeminiBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            retry: self.retry,
        }
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Create with a custom retry policy (for testing against a scripted server)
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());
        let host = std::env::var("GEMINI_HOST")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        Some(Self::new(&host, &model, &api_key))
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Response schema sent with every request: all four statement fields
    /// are required numbers/integers.
    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "monthly_volume": { "type": "NUMBER" },
                "monthly_fees": { "type": "NUMBER" },
                "current_rate_percentage": { "type": "NUMBER" },
                "current_terminal_count": { "type": "INTEGER" }
            },
            "required": [
                "monthly_volume",
                "monthly_fees",
                "current_rate_percentage",
                "current_terminal_count"
            ]
        })
    }

    fn build_request(&self, image_data: &[u8]) -> GenerateContentRequest {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_data);
        GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part::text(SYSTEM_INSTRUCTION)],
            },
            contents: vec![Content {
                parts: vec![
                    Part::inline_data(sniff_mime_type(image_data), encoded),
                    Part::text("Extract the statement fields."),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        }
    }

    async fn send_once(&self, request: &GenerateContentRequest) -> Result<ExtractedStatement> {
        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return if RetryPolicy::is_retryable_status(status) {
                Err(Error::Transient { status, message })
            } else {
                Err(Error::Remote { status, message })
            };
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .first()
            .ok_or_else(|| Error::InvalidData("Extraction response has no candidates".into()))?
            .content
            .parts
            .first()
            .and_then(|part| part.text.as_deref())
            .ok_or_else(|| {
                Error::InvalidData("Extraction candidate has no text content".into())
            })?;

        debug!("Gemini extraction response: {}", text);
        parse_statement_response(text)
    }
}

/// Request to the generateContent API
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Statement uploads are JPEG or PNG; default to JPEG when the magic bytes
/// are inconclusive.
fn sniff_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else {
        "image/jpeg"
    }
}

#[async_trait]
impl ExtractionBackend for GeminiBackend {
    async fn extract_statement(&self, image_data: &[u8]) -> Result<ExtractedStatement> {
        let request = self.build_request(image_data);
        self.retry.run(|_attempt| self.send_once(&request)).await
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1beta/models/{}", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(10))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
