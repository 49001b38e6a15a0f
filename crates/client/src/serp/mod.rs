//! SerpAPI search client.
//!
//! Turns a natural-language query into an ordered list of candidate pages.
//!
//! ### API
//!
//! - **Endpoint**: `https://serpapi.com/search.json` with `engine=google`.
//! - **Authentication**: `api_key` query parameter.
//! - **Candidates**: answer-box link first, then the top organic links.
//! - **Normalization**: Converts the raw response into a stable `SearchResponse`.

pub mod error;
pub mod request;
pub mod response;

pub use error::SerpError;
pub use request::SearchRequest;
pub use response::{SearchResponse, SearchResult, SerpMeta};

use async_trait::async_trait;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use codefetch_core::AppConfig;

/// Default base URL for SerpAPI.
const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "codefetch/0.1";

/// Body message SerpAPI uses for a successful search without hits.
const NO_RESULTS_MESSAGE: &str = "hasn't returned any results";

/// Candidate pages for one query plus the summary shown to callers.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub candidates: Vec<String>,
    pub meta: SerpMeta,
}

/// Produces ranked candidate URLs for a query.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SerpError>;
}

/// SerpAPI client configuration.
#[derive(Debug, Clone)]
pub struct SerpConfig {
    /// SerpAPI key.
    pub api_key: String,
    /// Base URL (default: https://serpapi.com).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: codefetch/0.x).
    pub user_agent: String,
    /// Results requested per search (default: 10).
    pub num: u8,
    /// Interface language (default: en).
    pub hl: String,
    /// Country (default: us).
    pub gl: String,
    /// Organic results used as candidates (default: 3).
    pub organic_candidates: usize,
}

impl Default for SerpConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            num: 10,
            hl: "en".to_string(),
            gl: "us".to_string(),
            organic_candidates: 3,
        }
    }
}

impl SerpConfig {
    /// Build the search configuration from the application config.
    ///
    /// Returns `SerpError::MissingApiKey` if no key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SerpError> {
        let api_key = config.require_serpapi_api_key().map_err(|_| SerpError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            num: config.search_num,
            hl: config.search_lang.clone(),
            gl: config.search_country.clone(),
            organic_candidates: config.organic_candidates,
            ..Default::default()
        })
    }
}

/// SerpAPI client.
#[derive(Debug, Clone)]
pub struct SerpClient {
    http: reqwest::Client,
    config: SerpConfig,
}

impl SerpClient {
    /// Create a new SerpAPI client with the given configuration.
    pub fn new(config: SerpConfig) -> Result<Self, SerpError> {
        if config.api_key.trim().is_empty() {
            return Err(SerpError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SerpError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Request for `query` using the configured engine parameters.
    pub fn request_for(&self, query: &str) -> SearchRequest {
        SearchRequest {
            num: Some(self.config.num),
            hl: Some(self.config.hl.clone()),
            gl: Some(self.config.gl.clone()),
            ..SearchRequest::new(query)
        }
    }

    /// Execute a web search query.
    pub async fn search_raw(&self, req: SearchRequest) -> Result<SearchResponse, SerpError> {
        req.validate()?;

        let start = Instant::now();
        let url = format!("{}/search.json", self.config.base_url);

        tracing::debug!("searching SerpAPI: query={}", req.q);

        let http_response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&req)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("SerpAPI response status: {}", status);

        if status == 401 || status == 403 {
            return Err(SerpError::AuthError);
        }

        if status == 429 {
            return Err(SerpError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(SerpError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let response = parse_response(&bytes)?;

        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), response.result_count());

        Ok(response)
    }
}

/// Parse a SerpAPI body, treating the "no results" error as an empty result.
pub fn parse_response(bytes: &[u8]) -> Result<SearchResponse, SerpError> {
    let raw: response::SerpApiResponse =
        serde_json::from_slice(bytes).map_err(|e| SerpError::Parse(e.to_string()))?;

    if let Some(message) = raw.error.as_deref()
        && !message.contains(NO_RESULTS_MESSAGE)
    {
        return Err(SerpError::Api(message.to_string()));
    }

    Ok(SearchResponse::from(raw))
}

#[async_trait]
impl CandidateSource for SerpClient {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SerpError> {
        let response = self.search_raw(self.request_for(query)).await?;

        Ok(SearchOutcome { candidates: response.candidate_urls(self.config.organic_candidates), meta: response.meta })
    }
}
