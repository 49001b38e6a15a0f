//! SerpAPI client error types.

use std::sync::Arc;

use codefetch_core::Error;

/// Errors from the SerpAPI search client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SerpError {
    /// No SerpAPI key configured.
    #[error("missing API key: SERPAPI_API_KEY not set")]
    MissingApiKey,

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid result count (must be 1-100).
    #[error("invalid num: must be 1-100")]
    InvalidNum,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited or out of searches.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error message reported in the response body.
    #[error("search API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SerpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SerpError::Timeout } else { SerpError::Network(Arc::new(err)) }
    }
}

impl From<SerpError> for Error {
    fn from(err: SerpError) -> Self {
        match err {
            SerpError::MissingApiKey | SerpError::AuthError => Error::SearchAuthError(err.to_string()),
            SerpError::RateLimited => Error::SearchRateLimited(err.to_string()),
            SerpError::InvalidQuery(msg) => Error::InvalidInput(msg),
            SerpError::InvalidNum => Error::InvalidInput(err.to_string()),
            _ => Error::SearchFailed(err.to_string()),
        }
    }
}
