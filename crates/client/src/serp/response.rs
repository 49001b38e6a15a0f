//! SerpAPI response types and normalization.

use serde::{Deserialize, Serialize};

/// Raw response from the SerpAPI Google engine (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub search_parameters: Option<SearchParameters>,
    #[serde(default)]
    pub search_information: Option<SearchInformation>,
    #[serde(default)]
    pub answer_box: Option<AnswerBox>,
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Echo of the request parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParameters {
    #[serde(default)]
    pub q: Option<String>,
}

/// Result counts reported by Google.
#[derive(Debug, Deserialize)]
pub struct SearchInformation {
    #[serde(default)]
    pub total_results: Option<u64>,
}

/// Featured answer shown above the organic results.
#[derive(Debug, Deserialize)]
pub struct AnswerBox {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Individual organic search result.
#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub position: Option<usize>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Normalized search response for internal use.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub answer_link: Option<String>,
    pub meta: SerpMeta,
}

/// Normalized organic result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    /// `None` when Google returned the result without a usable link.
    pub url: Option<String>,
    pub snippet: String,
    pub rank: usize,
}

/// Summary of the search, echoed back to API callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerpMeta {
    pub query: Option<String>,
    pub total_results: Option<u64>,
    pub top_title: Option<String>,
    pub top_link: Option<String>,
}

impl From<SerpApiResponse> for SearchResponse {
    /// Convert the raw SerpAPI response to the normalized format.
    ///
    /// Organic results keep their slot even without a link, so the candidate
    /// window covers the same results Google ranked first.
    fn from(raw: SerpApiResponse) -> Self {
        let meta = SerpMeta {
            query: raw.search_parameters.and_then(|p| p.q),
            total_results: raw.search_information.and_then(|i| i.total_results),
            top_title: raw.organic_results.first().and_then(|r| r.title.clone()),
            top_link: raw.organic_results.first().and_then(|r| r.link.clone()),
        };

        let results = raw
            .organic_results
            .into_iter()
            .enumerate()
            .map(|(idx, r)| SearchResult {
                title: r.title.unwrap_or_default(),
                url: r.link.filter(|l| !l.trim().is_empty()),
                snippet: r.snippet.unwrap_or_default(),
                rank: r.position.unwrap_or(idx + 1),
            })
            .collect();

        let answer_link = raw.answer_box.and_then(|a| a.link).filter(|l| !l.trim().is_empty());

        SearchResponse { results, answer_link, meta }
    }
}

impl SearchResponse {
    /// Ordered fetch candidates: the answer box link, then the links of the
    /// first `organic_limit` organic results. Linkless results use up their
    /// slot. Exact duplicates are dropped.
    pub fn candidate_urls(&self, organic_limit: usize) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();

        let organic = self.results.iter().take(organic_limit).filter_map(|r| r.url.as_ref());
        for url in self.answer_link.iter().chain(organic) {
            if !candidates.contains(url) {
                candidates.push(url.clone());
            }
        }

        candidates
    }

    /// Get the number of organic results.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "search_metadata": { "status": "Success" },
        "search_parameters": { "engine": "google", "q": "js fetch example" },
        "search_information": { "total_results": 123000000 },
        "answer_box": {
            "title": "Using the Fetch API",
            "link": "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch"
        },
        "organic_results": [
            {
                "position": 1,
                "title": "Fetch API - W3Schools",
                "link": "https://www.w3schools.com/js/js_api_fetch.asp",
                "snippet": "The Fetch API interface allows web browser to make HTTP requests."
            },
            {
                "position": 2,
                "title": "Using the Fetch API",
                "link": "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch"
            },
            {
                "position": 3,
                "title": "No link here"
            },
            {
                "position": 4,
                "title": "JavaScript Fetch API",
                "link": "https://www.javascripttutorial.net/web-apis/javascript-fetch-api/"
            },
            {
                "position": 5,
                "title": "Fifth",
                "link": "https://example.com/fifth"
            }
        ]
    }"#;

    fn fixture() -> SearchResponse {
        let raw: SerpApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        raw.into()
    }

    #[test]
    fn test_deserialize_serpapi_response() {
        let raw: SerpApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(raw.organic_results.len(), 5);
        assert!(raw.answer_box.is_some());
        assert!(raw.error.is_none());
    }

    #[test]
    fn test_normalize_keeps_linkless_results() {
        let response = fixture();
        assert_eq!(response.result_count(), 5);
        assert_eq!(response.results[2].url, None);
        assert_eq!(response.results[3].title, "JavaScript Fetch API");
        assert_eq!(response.results[3].rank, 4);
        assert_eq!(response.results[1].snippet, "");
    }

    #[test]
    fn test_meta() {
        let response = fixture();
        assert_eq!(
            response.meta,
            SerpMeta {
                query: Some("js fetch example".into()),
                total_results: Some(123_000_000),
                top_title: Some("Fetch API - W3Schools".into()),
                top_link: Some("https://www.w3schools.com/js/js_api_fetch.asp".into()),
            }
        );
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let value = serde_json::to_value(fixture().meta).unwrap();
        assert_eq!(value["totalResults"], 123_000_000);
        assert_eq!(value["topTitle"], "Fetch API - W3Schools");
        assert!(value.get("top_link").is_none());
    }

    #[test]
    fn test_candidate_urls_answer_box_first_and_deduped() {
        let candidates = fixture().candidate_urls(4);
        assert_eq!(
            candidates,
            vec![
                "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch".to_string(),
                "https://www.w3schools.com/js/js_api_fetch.asp".to_string(),
                "https://www.javascripttutorial.net/web-apis/javascript-fetch-api/".to_string(),
            ]
        );
    }

    #[test]
    fn test_candidate_urls_linkless_result_uses_its_slot() {
        // The third organic result has no link; the fourth stays out of the window.
        let candidates = fixture().candidate_urls(3);
        assert_eq!(
            candidates,
            vec![
                "https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch".to_string(),
                "https://www.w3schools.com/js/js_api_fetch.asp".to_string(),
            ]
        );
    }

    #[test]
    fn test_candidate_urls_without_answer_box() {
        let json = r#"{"organic_results": [
            {"link": "https://a.example/1"},
            {"link": "https://b.example/2"}
        ]}"#;
        let raw: SerpApiResponse = serde_json::from_str(json).unwrap();
        let response: SearchResponse = raw.into();

        assert_eq!(response.candidate_urls(3), vec!["https://a.example/1", "https://b.example/2"]);
        assert_eq!(response.candidate_urls(1), vec!["https://a.example/1"]);
    }

    #[test]
    fn test_empty_response() {
        let raw: SerpApiResponse = serde_json::from_str("{}").unwrap();
        let response: SearchResponse = raw.into();

        assert_eq!(response.result_count(), 0);
        assert!(response.candidate_urls(3).is_empty());
        assert_eq!(response.meta, SerpMeta::default());
    }
}
