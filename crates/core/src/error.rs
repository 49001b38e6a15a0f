//! Unified error types for codefetch.
//!
//! Every variant's display string starts with a stable machine-readable code.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the codefetch service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Search API key missing or rejected.
    #[error("SEARCH_AUTH_ERROR: {0}")]
    SearchAuthError(String),

    /// Search API rate limited.
    #[error("SEARCH_RATE_LIMITED: {0}")]
    SearchRateLimited(String),

    /// Search request failed for any other reason.
    #[error("SEARCH_FAILED: {0}")]
    SearchFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::SearchAuthError(msg) => (-32009, msg.clone()),
            Error::SearchRateLimited(msg) => (-32010, msg.clone()),
            Error::SearchFailed(msg) => (-32013, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
