//! SerpAPI request types and validation.

use serde::Serialize;

use crate::serp::SerpError;

/// Longest query Google accepts.
const MAX_QUERY_CHARS: usize = 2048;

/// Search request parameters for the SerpAPI `search.json` endpoint.
///
/// Based on the SerpAPI Google Search API documentation:
/// https://serpapi.com/search-api
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Search engine (default: "google").
    pub engine: String,

    /// Search query (required).
    pub q: String,

    /// Number of results (1-100, default 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u8>,

    /// Interface language (e.g., "en").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,

    /// Country (e.g., "us").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self { engine: "google".to_string(), q: String::new(), num: None, hl: None, gl: None }
    }
}

impl SearchRequest {
    /// Request for `q` with everything else defaulted.
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into(), ..Default::default() }
    }

    /// Validate the search request parameters.
    pub fn validate(&self) -> Result<(), SerpError> {
        if self.q.trim().is_empty() {
            return Err(SerpError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.q.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(SerpError::InvalidQuery(format!(
                "query too long: {} chars (max {})",
                chars, MAX_QUERY_CHARS
            )));
        }

        if let Some(num) = self.num
            && !(1..=100).contains(&num)
        {
            return Err(SerpError::InvalidNum);
        }

        Ok(())
    }

    /// Get the effective result count (default 10).
    pub fn get_num(&self) -> u8 {
        self.num.unwrap_or(10)
    }
}
