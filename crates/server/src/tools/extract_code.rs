//! extract_code tool implementation.
//!
//! Runs the code extraction pipeline over HTML supplied by the client.
//! No network I/O is performed.

use codefetch_client::{CodeExtractor, ExtractConfig, Extractor};
use codefetch_core::{Error, MAX_SNIPPETS};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for extract_code tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractCodeParams {
    /// The raw HTML content to extract from.
    pub html: String,

    /// Maximum number of snippets to return (1-20, default 20).
    #[serde(default)]
    pub max_snippets: Option<usize>,
}

/// Output structure for extract_code tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractCodeOutput {
    /// Extracted snippets in document order.
    pub snippets: Vec<String>,
    pub count: usize,
}

/// Implementation of the extract_code tool.
pub async fn extract_impl(params: ExtractCodeParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let max_snippets = params.max_snippets.unwrap_or(MAX_SNIPPETS);
    if !(1..=MAX_SNIPPETS).contains(&max_snippets) {
        return Err(Error::InvalidInput(format!("max_snippets must be 1-{}", MAX_SNIPPETS)).into());
    }

    let blocks = CodeExtractor::new().extract(&params.html, &ExtractConfig { max_snippets });
    let snippets: Vec<String> = blocks.into_iter().map(|b| b.into_string()).collect();

    let output = ExtractCodeOutput { count: snippets.len(), snippets };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HTML: &str = r#"
        <html>
        <body>
            <h1>Arrays</h1>
            <p>Use map to transform every element.</p>
            <pre><code>const doubled = [1, 2, 3].map((n) =&gt; n * 2);
console.log(doubled);</code></pre>
            <div class="highlight"><pre>let total = 0;
for (const n of doubled) { total += n; }</pre></div>
        </body>
        </html>
    "#;

    fn output(result: &CallToolResult) -> ExtractCodeOutput {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_extract_code_from_html() {
        let params = ExtractCodeParams { html: TEST_HTML.into(), max_snippets: None };

        let result = extract_impl(params).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let output = output(&result);
        assert_eq!(output.count, 2);
        assert_eq!(output.snippets[0], "const doubled = [1, 2, 3].map((n) => n * 2);\nconsole.log(doubled);");
        assert!(output.snippets[1].starts_with("let total = 0;"));
    }

    #[tokio::test]
    async fn test_extract_code_respects_max_snippets() {
        let params = ExtractCodeParams { html: TEST_HTML.into(), max_snippets: Some(1) };

        let output = output(&extract_impl(params).await.unwrap());
        assert_eq!(output.count, 1);
    }

    #[tokio::test]
    async fn test_extract_code_no_code() {
        let params = ExtractCodeParams { html: "<p>Just prose.</p>".into(), max_snippets: None };

        let output = output(&extract_impl(params).await.unwrap());
        assert!(output.snippets.is_empty());
    }

    #[tokio::test]
    async fn test_extract_code_empty_html_fails() {
        let params = ExtractCodeParams { html: "  ".into(), max_snippets: None };
        assert!(extract_impl(params).await.is_err());
    }

    #[tokio::test]
    async fn test_extract_code_invalid_max_snippets() {
        for max in [0, MAX_SNIPPETS + 1] {
            let params = ExtractCodeParams { html: TEST_HTML.into(), max_snippets: Some(max) };
            assert!(extract_impl(params).await.is_err());
        }
    }
}
