//! fetch_code tool implementation.
//!
//! Searches the web for a query and returns code from the first result page
//! that has any.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::{self, AppState};

/// Input parameters for fetch_code tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FetchCodeParams {
    /// Natural-language search query, e.g. "js fetch example".
    pub query: String,
}

/// Implementation of the fetch_code tool.
pub async fn fetch_impl(state: &AppState, params: FetchCodeParams) -> Result<CallToolResult, McpError> {
    let output = service::fetch_code(state, &params.query).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
