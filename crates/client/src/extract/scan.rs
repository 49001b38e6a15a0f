//! Candidate block discovery in one HTML document.
//!
//! Two independent strategies run over every page:
//! - **structural**: DOM elements matching a curated selector list
//! - **fenced**: markdown-style triple-backtick regions in the raw markup

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

use super::{BlockOrigin, RawBlock};

/// Selectors known to wrap code, tight containers first.
pub const CODE_SELECTORS: &[&str] = &[
    "pre code",
    "pre",
    "code",
    ".code",
    ".codesample",
    ".highlight",
    ".hljs",
    ".prettyprint",
    ".language-js",
    ".language-html",
    ".language-css",
    "[class*='code']",
    "[class*='snippet']",
    "[class*='example']",
    ".w3-code",
    ".w3-example",
];

static PARSED_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    CODE_SELECTORS
        .iter()
        .filter_map(|sel| match Selector::parse(sel) {
            Ok(parsed) => Some((*sel, parsed)),
            Err(e) => {
                tracing::warn!(selector = *sel, "skipping unparsable selector: {}", e);
                None
            }
        })
        .collect()
});

/// Selectors that match the code elements themselves rather than containers.
const CODE_ELEMENT_SELECTORS: &[&str] = &["pre code", "pre", "code"];

static NESTED_CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre, code").expect("NESTED_CODE selector is valid"));

/// Non-greedy: a fence closes at the nearest following fence.
static FENCED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("FENCED regex is valid"));

/// Run both strategies; structural blocks come first, in selector order.
pub fn scan(html: &str) -> Vec<RawBlock> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks = scan_structural(html);
    blocks.extend(scan_fenced(html));
    blocks
}

/// Text content of every element matched by every selector.
///
/// The same element may be reported once per matching selector. Containers
/// matched by the class-pattern selectors are skipped when they wrap a `pre`
/// or `code` element; that code is reported by the element selectors, without
/// the surrounding prose or toolbar text.
pub fn scan_structural(html: &str) -> Vec<RawBlock> {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();

    for (selector_str, selector) in PARSED_SELECTORS.iter() {
        let is_container = !CODE_ELEMENT_SELECTORS.contains(selector_str);

        for element in document.select(selector) {
            if is_container && element.select(&NESTED_CODE).next().is_some() {
                continue;
            }

            let content = text_content(element);
            let text = content.trim();
            if text.is_empty() {
                continue;
            }
            blocks.push(RawBlock::new(BlockOrigin::Structural { selector: *selector_str }, text));
        }
    }

    blocks
}

/// Rendered text of an element, with `<br>` kept as a line break.
fn text_content(element: ElementRef<'_>) -> String {
    let mut out = String::new();

    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }

    out
}

/// Triple-backtick regions found in the raw markup, fences included.
pub fn scan_fenced(html: &str) -> Vec<RawBlock> {
    FENCED
        .find_iter(html)
        .map(|m| RawBlock::new(BlockOrigin::Fenced, m.as_str()))
        .collect()
}
