// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// Two passes over the raw text with regular expressions:
// 1. Inline links: [text](url)
// 2. Bare URLs: http(s)://... that are not part of an inline link
//
// Markdown links come first in the output, bare URLs after them, each pass in
// document order. Deduplication is a separate step so callers can report both
// "links found" and "unique URLs".
//
// Known limitations: URLs containing parentheses and <angle-bracket> link
// targets are truncated or missed. A URL written inside link text, as in
// "[see https://y.com](https://x.com)", belongs to that link and is not
// reported as a bare URL of its own.
// =============================================================================

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::OnceLock;

/// How a link was written in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// [text](url)
    Markdown,
    /// A URL in plain text
    Bare,
}

/// A link found in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Link text; for bare URLs this is the URL itself
    pub text: String,
    pub url: String,
    pub kind: LinkKind,
}

impl Link {
    pub fn markdown(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            kind: LinkKind::Markdown,
        }
    }

    pub fn bare(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: url.clone(),
            url,
            kind: LinkKind::Bare,
        }
    }
}

// The patterns are constants, so compiling them cannot fail at runtime
fn markdown_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid markdown link regex"))
}

fn bare_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bhttps?://[^\s)]+").expect("valid bare url regex"))
}

// Extracts every link from Markdown text, duplicates included
//
// Example input:
//   "See [Rust](https://www.rust-lang.org) or https://crates.io"
//
// Example output:
//   [Markdown("Rust", "https://www.rust-lang.org"), Bare("https://crates.io")]
pub fn extract_links(content: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut inline_spans = Vec::new();

    for caps in markdown_link_re().captures_iter(content) {
        // Group 0 always exists for a successful match
        if let Some(whole) = caps.get(0) {
            inline_spans.push(whole.range());
        }
        links.push(Link::markdown(&caps[1], &caps[2]));
    }

    for url in bare_urls(content, &inline_spans) {
        // A URL already captured by an inline link is not reported twice
        if !links.iter().any(|link: &Link| link.url == url) {
            links.push(Link::bare(url));
        }
    }

    links
}

// Finds bare URLs outside inline links
//
// A match is rejected when it starts inside an inline link, or when it sits
// directly after '(' (a parenthesised URL in prose). The regex crate has no
// look-behind, so a '(' rejection restarts the search one byte after the
// match start instead of after its end, so a URL nested inside the rejected
// one is still found.
fn bare_urls<'a>(content: &'a str, inline_spans: &[Range<usize>]) -> Vec<&'a str> {
    let re = bare_url_re();
    let mut urls = Vec::new();
    let mut start = 0;

    while let Some(m) = re.find_at(content, start) {
        if let Some(span) = inline_spans.iter().find(|span| span.contains(&m.start())) {
            start = span.end;
            continue;
        }
        if content[..m.start()].ends_with('(') {
            // Every match begins with the ASCII 'h', so +1 stays on a char boundary
            start = m.start() + 1;
            continue;
        }
        urls.push(m.as_str());
        start = m.end();
    }

    urls
}

// Removes links whose URL was already seen, keeping the first occurrence
//
// Matching is exact and case-sensitive: "http://X.com" and "http://x.com"
// are different URLs here.
pub fn dedupe_links(links: Vec<Link>) -> Vec<Link> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is OnceLock?
//    - A cell that is written exactly once, the first time it is read
//    - Lets us compile each regex once and reuse it for every call
//
// 2. Why does dedupe_links take Vec<Link> by value?
//    - It consumes the list and hands back the survivors
//    - No clones of whole links are needed, only of the URL for the set
//
// 3. What does HashSet::insert return?
//    - true if the value was new, false if it was already there
//    - That makes it a perfect filter for "first occurrence wins"
// -----------------------------------------------------------------------------
