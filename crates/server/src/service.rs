//! Query service shared by the HTTP and MCP surfaces.
//!
//! Search for candidate pages, then walk them in order until one yields code.

use std::sync::Arc;

use codefetch_client::{CandidateResolver, CandidateSource, FetchClient, FetchConfig, PageFetcher, ResolveConfig};
use codefetch_client::{SerpClient, SerpConfig, SerpMeta};
use codefetch_core::{AppConfig, Error};
use serde::{Deserialize, Serialize};

/// Shared, immutable state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub search: Option<Arc<dyn CandidateSource>>,
    pub resolver: Arc<CandidateResolver>,
}

impl AppState {
    /// Wire the real fetch and search clients from configuration.
    ///
    /// A missing SerpAPI key is not fatal: the server still starts and
    /// `fetch_code` reports the problem per request.
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(&config))?;

        let search: Option<Arc<dyn CandidateSource>> = match SerpConfig::from_app_config(&config) {
            Ok(serp_config) => Some(Arc::new(SerpClient::new(serp_config).map_err(Error::from)?)),
            Err(e) => {
                tracing::warn!("search disabled: {}", e);
                None
            }
        };

        Ok(Self::new(config, search, Arc::new(fetcher)))
    }

    pub fn new(config: AppConfig, search: Option<Arc<dyn CandidateSource>>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let resolver = CandidateResolver::new(fetcher, ResolveConfig::from(&config));
        Self { config: Arc::new(config), search, resolver: Arc::new(resolver) }
    }
}

/// Payload returned for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCodeOutput {
    pub query: String,
    /// Page the snippets came from; `null` when no candidate had code.
    pub top_url: Option<String>,
    pub code_snippets: Vec<String>,
    pub serp_meta: SerpMeta,
}

/// Search for `query` and extract code from the first candidate that has any.
pub async fn fetch_code(state: &AppState, query: &str) -> Result<FetchCodeOutput, Error> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()));
    }

    let search = state
        .search
        .as_ref()
        .ok_or_else(|| Error::SearchAuthError("SERPAPI_API_KEY is not set".into()))?;

    let outcome = search.search(query).await?;
    tracing::debug!(query, candidates = outcome.candidates.len(), "search returned candidates");

    let result = state.resolver.resolve(&outcome.candidates).await;
    let code_snippets = result.snippets();

    Ok(FetchCodeOutput { query: query.to_string(), top_url: result.source_url, code_snippets, serp_meta: outcome.meta })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub collaborators shared by the surface tests.

    use super::*;
    use async_trait::async_trait;
    use codefetch_client::{SearchOutcome, SerpError};
    use std::collections::HashMap;

    pub const CODE_PAGE: &str =
        "<html><body><pre><code>fetch(url)\n  .then(res =&gt; res.json());</code></pre></body></html>";

    pub struct StubSearch {
        pub result: Result<Vec<String>, SerpError>,
    }

    #[async_trait]
    impl CandidateSource for StubSearch {
        async fn search(&self, query: &str) -> Result<SearchOutcome, SerpError> {
            let candidates = self.result.clone()?;
            let meta = SerpMeta {
                query: Some(query.to_string()),
                total_results: Some(42),
                top_title: Some("Top".into()),
                top_link: candidates.first().cloned(),
            };
            Ok(SearchOutcome { candidates, meta })
        }
    }

    pub struct StubFetcher {
        pub pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_html(&self, url: &str) -> Result<String, Error> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::HttpError("status 404".into()))
        }
    }

    /// State whose search returns `candidates` and whose fetcher serves `pages`.
    pub fn state(candidates: &[&str], pages: &[(&str, &str)]) -> AppState {
        let search = StubSearch { result: Ok(candidates.iter().map(|c| c.to_string()).collect()) };
        let fetcher = StubFetcher { pages: pages.iter().map(|(u, h)| (u.to_string(), h.to_string())).collect() };
        AppState::new(AppConfig::default(), Some(Arc::new(search)), Arc::new(fetcher))
    }

    pub fn failing_state(error: SerpError) -> AppState {
        let search = StubSearch { result: Err(error) };
        let fetcher = StubFetcher { pages: HashMap::new() };
        AppState::new(AppConfig::default(), Some(Arc::new(search)), Arc::new(fetcher))
    }
}
