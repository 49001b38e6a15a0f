//! HTTP error responses.
//!
//! Callers only ever see a fixed message; the underlying error is logged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codefetch_core::Error;
use serde_json::json;

/// Errors returned by the HTTP routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body missing, unparsable, or without a non-blank `query`.
    #[error("Missing query")]
    MissingQuery,

    /// A query the search backend refused, e.g. one over 2048 characters.
    #[error("Invalid query")]
    InvalidQuery(#[source] Error),

    /// Anything that went wrong while searching or scraping.
    #[error("Scraper failed")]
    ScraperFailed(#[source] Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            err @ Error::InvalidInput(_) => ApiError::InvalidQuery(err),
            other => ApiError::ScraperFailed(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::ScraperFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MissingQuery => {}
            ApiError::InvalidQuery(source) => tracing::debug!("rejected query: {}", source),
            ApiError::ScraperFailed(source) => tracing::error!("scraper error: {}", source),
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
