//! Error types for Pinpoint

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rate-limit or server-side failure from the extraction API (429/500/503).
    /// The only class the retry policy will retry.
    #[error("Extraction service unavailable (HTTP {status}): {message}")]
    Transient { status: u16, message: String },

    /// Any other HTTP error status from the extraction API. Not retried.
    #[error("Extraction request rejected (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The extraction response parsed as JSON but violated the required-field
    /// contract. Not retried; callers fall back to manual entry.
    #[error("Statement extraction missing required field: {0}")]
    MissingField(&'static str),
}

impl Error {
    /// Whether the retry policy should attempt this call again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transient { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let err = Error::Transient {
            status: 503,
            message: "overloaded".into(),
        };
        assert!(err.is_transient());

        let err = Error::Remote {
            status: 400,
            message: "bad request".into(),
        };
        assert!(!err.is_transient());

        assert!(!Error::MissingField("monthly_volume").is_transient());
        assert!(!Error::InvalidData("no JSON".into()).is_transient());
    }
}
