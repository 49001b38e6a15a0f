//! Candidate fallback driver.
//!
//! Tries ranked candidate pages one at a time and stops at the first page
//! that yields at least one code block.
//!
//! ### Per-candidate states
//! - **Pending**: URL validated; invalid URLs are skipped without a fetch.
//! - **Fetched**: HTML retrieved within the attempt timeout; any failure
//!   advances to the next candidate.
//! - **Evaluated**: extractor run; non-empty ends the chain.
//!
//! Exhausting every candidate is an empty success, never an error.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use codefetch_core::AppConfig;

use crate::extract::{CleanBlock, CodeExtractor, ExtractConfig, Extractor};
use crate::fetch::{PageFetcher, parse_candidate};

/// Default bound on one fetch attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the fallback driver.
#[derive(Debug, Clone, Copy)]
pub struct ResolveConfig {
    /// Upper bound on a single fetch, whatever the fetcher does internally.
    pub attempt_timeout: Duration,
    /// Extraction settings applied to every candidate.
    pub extract: ExtractConfig,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self { attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT, extract: ExtractConfig::default() }
    }
}

impl From<&AppConfig> for ResolveConfig {
    fn from(config: &AppConfig) -> Self {
        Self { attempt_timeout: config.timeout(), extract: ExtractConfig { max_snippets: config.max_snippets } }
    }
}

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Not an absolute http(s) URL; never fetched.
    InvalidUrl { reason: String },
    /// Transport error or non-success status.
    FetchFailed { reason: String },
    /// The attempt exceeded `attempt_timeout`.
    TimedOut,
    /// Fetched, but nothing looked like code.
    NoCode,
    /// Fetched and produced `blocks` code blocks.
    Found { blocks: usize },
}

/// One entry per candidate actually tried, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAttempt {
    pub url: String,
    pub outcome: AttemptOutcome,
}

/// Terminal artifact of the pipeline.
///
/// `source_url` is set exactly when `blocks` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub source_url: Option<String>,
    pub blocks: Vec<CleanBlock>,
    pub attempts: Vec<CandidateAttempt>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks as plain strings.
    pub fn snippets(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.as_str().to_string()).collect()
    }
}

/// Sequential fallback over candidate URLs.
#[derive(Clone)]
pub struct CandidateResolver {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn Extractor>,
    config: ResolveConfig,
}

impl CandidateResolver {
    /// Create a resolver using the default code extractor.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ResolveConfig) -> Self {
        Self { fetcher, extractor: Arc::new(CodeExtractor::new()), config }
    }

    /// Replace the extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Try `candidates` in order until one yields code.
    pub async fn resolve(&self, candidates: &[String]) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for url in candidates {
            let (outcome, blocks) = self.attempt(url).await;
            result.attempts.push(CandidateAttempt { url: url.clone(), outcome });

            if !blocks.is_empty() {
                tracing::info!(url = %url, blocks = blocks.len(), "code found");
                result.source_url = Some(url.clone());
                result.blocks = blocks;
                return result;
            }
        }

        tracing::info!(candidates = candidates.len(), "no candidate yielded code");
        result
    }

    async fn attempt(&self, url: &str) -> (AttemptOutcome, Vec<CleanBlock>) {
        if let Err(e) = parse_candidate(url) {
            tracing::warn!(url, "skipping candidate: {}", e);
            return (AttemptOutcome::InvalidUrl { reason: e.to_string() }, Vec::new());
        }

        let html = match tokio::time::timeout(self.config.attempt_timeout, self.fetcher.fetch_html(url)).await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => {
                tracing::warn!(url, "scrape failed: {}", e);
                return (AttemptOutcome::FetchFailed { reason: e.to_string() }, Vec::new());
            }
            Err(_) => {
                tracing::warn!(url, timeout = ?self.config.attempt_timeout, "scrape timed out");
                return (AttemptOutcome::TimedOut, Vec::new());
            }
        };

        let blocks = self.extractor.extract(&html, &self.config.extract);
        if blocks.is_empty() {
            tracing::debug!(url, "no code on candidate");
            (AttemptOutcome::NoCode, blocks)
        } else {
            (AttemptOutcome::Found { blocks: blocks.len() }, blocks)
        }
    }
}
