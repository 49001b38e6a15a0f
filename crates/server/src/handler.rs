//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::service::AppState;
use crate::tools::{ExtractCodeParams, FetchCodeParams, extract_code::extract_impl, fetch_code::fetch_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The MCP server handler for codefetch.
#[derive(Clone)]
pub struct CodeFetchServer {
    state: AppState,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CodeFetchServer {
    pub fn new(state: AppState) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    /// Search the web and return code from the best result page.
    #[tool(
        description = "Search the web for a query and return code snippets from the first result page that contains code. Returns JSON with query, topUrl, codeSnippets and serpMeta."
    )]
    async fn fetch_code(&self, params: Parameters<FetchCodeParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.state, params.0).await
    }

    /// Extract code snippets from HTML without network access.
    #[tool(description = "Extract code snippets from raw HTML. No network requests are made.")]
    async fn extract_code(&self, params: Parameters<ExtractCodeParams>) -> Result<CallToolResult, McpError> {
        extract_impl(params.0).await
    }
}

impl ServerHandler for CodeFetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "codefetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
