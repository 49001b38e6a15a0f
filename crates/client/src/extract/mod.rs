//! Code block extraction from HTML.
//!
//! ### Pipeline
//! - [`scan`]: structural (DOM selectors) and fenced (triple backtick) candidates.
//! - [`classify`]: line-density heuristic run on the raw, markup-bearing text.
//! - [`normalize`]: markup cleanup of the accepted blocks.
//! - [`aggregate`]: order-preserving dedup by exact text, capped.
//!
//! ### Stable Abstraction
//! - Uses the `Extractor` trait so the fallback driver does not depend on the
//!   concrete heuristics.

pub mod classify;
pub mod normalize;
pub mod scan;

pub use classify::looks_like_code;
pub use normalize::normalize;
pub use scan::{CODE_SELECTORS, scan};

use serde::Serialize;
use std::collections::HashSet;

use codefetch_core::MAX_SNIPPETS;

/// Which strategy discovered a raw block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOrigin {
    /// Matched by a DOM selector; `selector` is the one that matched.
    Structural { selector: &'static str },
    /// Triple-backtick region in the raw markup.
    Fenced,
}

/// A candidate fragment as found in the document, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub origin: BlockOrigin,
    pub text: String,
}

impl RawBlock {
    pub fn new(origin: BlockOrigin, text: impl Into<String>) -> Self {
        Self { origin, text: text.into() }
    }
}

/// Normalized code text of an accepted block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CleanBlock(String);

impl CleanBlock {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CleanBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Configuration for code extraction.
#[derive(Debug, Clone, Copy)]
pub struct ExtractConfig {
    /// Maximum number of blocks kept per document (default and ceiling: `MAX_SNIPPETS`).
    pub max_snippets: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_snippets: MAX_SNIPPETS }
    }
}

impl ExtractConfig {
    /// The cap actually applied, never above `MAX_SNIPPETS`.
    pub fn effective_cap(&self) -> usize {
        self.max_snippets.min(MAX_SNIPPETS)
    }
}

/// Stable extractor trait for code extraction.
pub trait Extractor: Send + Sync {
    /// Extract code blocks from one HTML document.
    fn extract(&self, html: &str, config: &ExtractConfig) -> Vec<CleanBlock>;
}

/// Selector + fence based extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeExtractor;

impl CodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for CodeExtractor {
    fn extract(&self, html: &str, config: &ExtractConfig) -> Vec<CleanBlock> {
        aggregate(scan(html), config.effective_cap())
    }
}

/// Classify, normalize, dedup and cap raw blocks.
///
/// Classification runs on the raw text; dedup runs on the normalized text.
pub fn aggregate(blocks: impl IntoIterator<Item = RawBlock>, max: usize) -> Vec<CleanBlock> {
    let cap = max.min(MAX_SNIPPETS);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for raw in blocks {
        if out.len() >= cap {
            break;
        }

        if !looks_like_code(&raw.text) {
            continue;
        }

        let clean = normalize(&raw);
        if clean.is_empty() || !seen.insert(clean.clone()) {
            continue;
        }

        out.push(clean);
    }

    out
}

/// Extract code blocks from HTML using the default extractor.
pub fn extract_code(html: &str) -> Vec<CleanBlock> {
    CodeExtractor::new().extract(html, &ExtractConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUTORIAL_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Fetch API tutorial</title></head>
        <body>
            <nav class="menu"><a href="/">Home</a> <a href="/docs">Docs</a></nav>
            <p>Use the fetch function to request data.</p>
            <pre><code class="language-js">const res = await fetch(url);
const data = await res.json();
console.log(data);</code></pre>
            <p>The <code>fetch</code> call returns a promise.</p>
            <div class="example">Try it yourself</div>
        </body>
        </html>
    "#;

    fn structural(text: &str) -> RawBlock {
        RawBlock::new(BlockOrigin::Structural { selector: "code" }, text)
    }

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_snippets, MAX_SNIPPETS);
    }

    #[test]
    fn test_effective_cap_never_exceeds_ceiling() {
        let config = ExtractConfig { max_snippets: 500 };
        assert_eq!(config.effective_cap(), MAX_SNIPPETS);
    }

    #[test]
    fn test_extract_tutorial_page() {
        let blocks = extract_code(TUTORIAL_HTML);

        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].as_str(),
            "const res = await fetch(url);\nconst data = await res.json();\nconsole.log(data);"
        );
    }

    #[test]
    fn test_extract_escaped_html_sample() {
        let blocks = extract_code("<pre><code>&lt;div&gt;hi&lt;/div&gt;</code></pre>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_str(), "<div>hi</div>");
    }

    #[test]
    fn test_extract_fenced_markdown_page() {
        let html = "<p>README</p>\n```python\ndef main():\n    return 1\n```\n";
        let blocks = extract_code(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_str(), "def main():\n    return 1");
    }

    #[test]
    fn test_extract_prose_page() {
        let html = "<html><body><p>No code here at all, only words.</p></body></html>";
        assert!(extract_code(html).is_empty());
    }

    #[test]
    fn test_extract_empty_html() {
        assert!(extract_code("").is_empty());
    }

    #[test]
    fn test_extract_malformed_html() {
        let blocks = extract_code("<pre><code>let a = [1, 2];\nlet b = a.len();<pre");
        assert!(blocks.iter().any(|b| b.as_str().contains("let a = [1, 2];")));
    }

    #[test]
    fn test_extract_skips_prose_and_container_markup() {
        let html = r#"
            <div class="example"><p>Try it yourself.</p></div>
            <div class="code-toolbar">
                <pre><code>let a = 1;
let b = 2;</code></pre>
                <div class="toolbar"><button>Copy</button></div>
            </div>
            <div class="snippet-intro"><p>Read the <em>whole</em> guide first.</p></div>
        "#;
        let blocks = extract_code(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].as_str(), "let a = 1;\nlet b = 2;");
    }

    #[test]
    fn test_aggregate_rejects_prose() {
        let blocks = vec![
            structural("Try it yourself."),
            structural("let a = 1;\nlet b = 2;"),
            structural("plain words"),
        ];
        let out = aggregate(blocks, MAX_SNIPPETS);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_str(), "let a = 1;\nlet b = 2;");
    }

    #[test]
    fn test_aggregate_classifies_raw_fenced_text() {
        // The fence line is not code-like, so a lone prose line is rejected.
        let blocks = vec![RawBlock::new(BlockOrigin::Fenced, "```\nsee the docs\n```")];
        assert!(aggregate(blocks, MAX_SNIPPETS).is_empty());
    }

    #[test]
    fn test_aggregate_dedups_after_normalizing() {
        let blocks = vec![
            structural("x();\ny();"),
            structural("x();\ny();   "),
            structural("<code>x();<br>y();</code>&nbsp;"),
            RawBlock::new(BlockOrigin::Fenced, "```\nx();\ny();\n```"),
        ];
        let out = aggregate(blocks, MAX_SNIPPETS);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_str(), "x();\ny();");
    }

    #[test]
    fn test_aggregate_preserves_discovery_order() {
        let blocks = vec![structural("b();"), structural("a();"), structural("b();")];
        let out: Vec<_> = aggregate(blocks, MAX_SNIPPETS).into_iter().map(CleanBlock::into_string).collect();
        assert_eq!(out, vec!["b();", "a();"]);
    }

    #[test]
    fn test_aggregate_caps_output() {
        let blocks = (0..50).map(|i| structural(&format!("call_{i}();")));
        let out = aggregate(blocks, MAX_SNIPPETS);

        assert_eq!(out.len(), MAX_SNIPPETS);
        let unique: HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn test_aggregate_respects_lower_cap() {
        let blocks = (0..50).map(|i| structural(&format!("call_{i}();")));
        assert_eq!(aggregate(blocks, 12).len(), 12);
    }

    #[test]
    fn test_aggregate_drops_blocks_empty_after_normalizing() {
        let blocks = vec![structural("<span>&nbsp;</span>")];
        assert!(aggregate(blocks, MAX_SNIPPETS).is_empty());
    }

    #[test]
    fn test_clean_block_serializes_as_string() {
        let block = CleanBlock::new("let a = 1;".to_string());
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"let a = 1;\"");
    }
}
