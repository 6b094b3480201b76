//! Response normalization. Turns raw model replies into displayable values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::llm_client::strip_code_fences;

/// Same shape the browser used to flatten markup: any tag, or a dangling `<…` at the end.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("valid tag regex"));

/// Fence-stripped reply, or `None` when nothing is left to display.
pub fn html_reply(raw: &str) -> Option<String> {
    let html = strip_code_fences(raw);
    if html.is_empty() {
        None
    } else {
        Some(html.to_string())
    }
}

/// Markup with every tag removed. Entities are left as-is.
pub fn plain_text(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// At most `max` chars of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
