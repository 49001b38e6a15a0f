//! Markup cleanup turning raw blocks into plain code text.
//!
//! ### Fenced blocks
//! - Opening fence plus the language tag on its line, closing fence.
//!
//! ### Structural blocks
//! The scanner hands over rendered text content, which is only trimmed
//! (non-breaking spaces become plain spaces). Text that still carries HTML
//! entities is serialized markup: every literal `<` in it opens a real tag.
//! For that text:
//! - `<br>` becomes a newline.
//! - Remaining tags and comments are removed.
//! - `&lt;`, `&gt;`, `&nbsp;`, `&quot;`, `&#39;` and `&amp;` are decoded in one
//!   pass, so `&amp;lt;` yields `&lt;`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{BlockOrigin, CleanBlock, RawBlock};

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:[A-Za-z0-9_+#.-]*[ \t]*\r?\n)?").expect("OPENING_FENCE regex is valid"));

static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```$").expect("CLOSING_FENCE regex is valid"));

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("LINE_BREAK regex is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^>]*>").expect("TAG regex is valid"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(lt|gt|nbsp|quot|#39|amp);").expect("ENTITY regex is valid"));

/// Normalize a raw block according to its origin. Never fails.
pub fn normalize(raw: &RawBlock) -> CleanBlock {
    let text = match raw.origin {
        BlockOrigin::Fenced => strip_fences(&raw.text),
        BlockOrigin::Structural { .. } if ENTITY.is_match(&raw.text) => strip_markup(&raw.text),
        BlockOrigin::Structural { .. } => raw.text.replace('\u{a0}', " ").trim().to_string(),
    };
    CleanBlock::new(text)
}

/// Remove the fences (and language tag) around a fenced block.
pub fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    let without_open = OPENING_FENCE.replace(trimmed, "");
    let without_close = CLOSING_FENCE.replace(&without_open, "");
    without_close.trim().to_string()
}

/// Turn serialized markup into plain text.
pub fn strip_markup(text: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(text, "\n");
    let without_tags = TAG.replace_all(&with_breaks, "");
    decode_entities(&without_tags).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "lt" => "<",
            "gt" => ">",
            "nbsp" => " ",
            "quot" => "\"",
            "#39" => "'",
            _ => "&",
        })
        .into_owned()
}
