//! Line-density heuristic deciding whether a block of text looks like code.

use regex::Regex;
use std::sync::LazyLock;

/// Absolute floor of code-like lines for blocks with two or more lines.
pub const MIN_CODE_LINES: usize = 2;

/// Fraction of lines that must look like code.
pub const CODE_LINE_RATIO: f64 = 0.25;

/// Punctuation, declaration keywords, statement keywords, or an HTML tag.
static CODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[{;}<>\[\]()]|function\s|\b(?:const|let|var|class|return)\b|</?[a-z][^>]*>")
        .expect("CODE_LINE regex is valid")
});

/// Whether a single line carries any code-characteristic token.
pub fn is_code_line(line: &str) -> bool {
    CODE_LINE.is_match(line)
}

/// Number of code-like lines a block of `total_lines` lines needs.
///
/// `max(MIN_CODE_LINES, ceil(CODE_LINE_RATIO * total_lines))`, clamped to
/// `total_lines` so a single code-like line can stand on its own.
pub fn required_code_lines(total_lines: usize) -> usize {
    let by_ratio = (total_lines as f64 * CODE_LINE_RATIO).ceil() as usize;
    by_ratio.max(MIN_CODE_LINES).min(total_lines)
}

/// Decide whether `text` looks like source code.
///
/// Lines are split on `\n` and `\r\n`. Empty or whitespace-only text is
/// never code.
pub fn looks_like_code(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let mut total = 0usize;
    let mut code_lines = 0usize;
    for line in text.split('\n') {
        total += 1;
        if is_code_line(line.strip_suffix('\r').unwrap_or(line)) {
            code_lines += 1;
        }
    }

    code_lines >= required_code_lines(total)
}
