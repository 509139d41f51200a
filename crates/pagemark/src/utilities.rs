//! Utility functions and constants shared by the extraction passes.

use url::Url;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "dir", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "li", "main", "menu", "nav", "ol", "p", "pre",
    "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Number of whitespace-delimited words
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Resolve a possibly relative URL against the document location.
///
/// Absolute and special-scheme URLs (data:, mailto:, ...) are returned
/// unchanged, as is everything when no base is known or joining fails.
pub fn resolve_url(url_str: &str, base: Option<&Url>) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if Url::parse(url_str).is_ok() {
        return url_str.to_string();
    }

    match base.map(|base| base.join(url_str)) {
        Some(Ok(resolved)) => resolved.to_string(),
        _ => url_str.to_string(),
    }
}
