//! Text normalization and tag extraction.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+").expect("valid url regex"));
static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid symbol regex"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

/// Strip URLs and punctuation, collapse whitespace.
///
/// Any run starting with `http` or `www` up to the next whitespace is removed.
/// Remaining characters that are neither word characters nor whitespace
/// become spaces. Returns an empty string for empty input.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let without_urls = URL_RE.replace_all(text, "");
    let without_symbols = SYMBOL_RE.replace_all(&without_urls, " ");
    without_symbols
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased hashtags without the leading `#`, in order of appearance.
///
/// Duplicates are kept.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    extract_prefixed(&HASHTAG_RE, text)
}

/// Lowercased mentions without the leading `@`, in order of appearance.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    extract_prefixed(&MENTION_RE, text)
}

fn extract_prefixed(re: &Regex, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    re.find_iter(&lowered)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}
