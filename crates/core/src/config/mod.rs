//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CODEFETCH_*)
//! 2. Bare `PORT` / `SERPAPI_API_KEY` variables
//! 3. TOML config file (if CODEFETCH_CONFIG_FILE set)
//! 4. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::MAX_SNIPPETS;

mod validation;

pub use validation::ConfigError;

/// Which surface the binary exposes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON HTTP API (`/fetchCode`, `/healthCheck`, `/privacy`).
    #[default]
    Http,
    /// MCP tool server on stdin/stdout.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CODEFETCH_*)
/// 2. `PORT` and `SERPAPI_API_KEY`
/// 3. TOML config file (if CODEFETCH_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SerpAPI key used to look up candidate pages.
    ///
    /// Set via CODEFETCH_SERPAPI_API_KEY or SERPAPI_API_KEY.
    /// Required only when a search is performed.
    #[serde(default)]
    pub serpapi_api_key: Option<String>,

    /// Service surface to run.
    ///
    /// Set via CODEFETCH_TRANSPORT (`http` or `stdio`).
    #[serde(default)]
    pub transport: Transport,

    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    ///
    /// Set via CODEFETCH_PORT or PORT.
    #[serde(default = "default_port")]
    pub port: u16,

    /// User-Agent string sent when fetching candidate pages.
    ///
    /// Many documentation sites refuse non-browser agents, hence the default.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-candidate fetch timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per candidate page.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of code snippets returned (at most `MAX_SNIPPETS`).
    #[serde(default = "default_max_snippets")]
    pub max_snippets: usize,

    /// Number of results requested from the search engine.
    #[serde(default = "default_search_num")]
    pub search_num: u8,

    /// How many organic results become fetch candidates.
    #[serde(default = "default_organic_candidates")]
    pub organic_candidates: usize,

    /// Search interface language (`hl`).
    #[serde(default = "default_search_lang")]
    pub search_lang: String,

    /// Search country (`gl`).
    #[serde(default = "default_search_country")]
    pub search_country: String,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_user_agent() -> String {
    "Mozilla/5.0".into()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_max_snippets() -> usize {
    MAX_SNIPPETS
}

fn default_search_num() -> u8 {
    10
}

fn default_organic_candidates() -> usize {
    3
}

fn default_search_lang() -> String {
    "en".into()
}

fn default_search_country() -> String {
    "us".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            serpapi_api_key: None,
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            max_snippets: default_max_snippets(),
            search_num: default_search_num(),
            organic_candidates: default_organic_candidates(),
            search_lang: default_search_lang(),
            search_country: default_search_country(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `host:port` string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CODEFETCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(Env::raw().only(&["port", "serpapi_api_key"]))
            .merge(
                Env::prefixed("CODEFETCH_")
                    .ignore(&["config_file"])
                    .map(|key| key.as_str().to_lowercase().into()),
            )
    }

    /// Check if the SerpAPI key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set or blank.
    pub fn require_serpapi_api_key(&self) -> Result<&str, ConfigError> {
        self.serpapi_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "serpapi_api_key".into(),
                hint: "Set SERPAPI_API_KEY or CODEFETCH_SERPAPI_API_KEY environment variable".into(),
            })
    }
}
