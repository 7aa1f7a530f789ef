//! Utility functions and helpers

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("inline link pattern is valid")
});

/// Replace markdown inline links with their link text.
///
/// Schema descriptions carry documentation links that are noise in a
/// spreadsheet cell; `[text](url)` becomes `text`.
#[must_use]
pub fn strip_markdown_links(text: &str) -> String {
    INLINE_LINK.replace_all(text, |caps: &regex::Captures<'_>| caps[1].to_string())
        .into_owned()
}
