// src/checker/filter.rs
// =============================================================================
// Decides which extracted links are never sent to the network.
//
// Two reasons to skip a link:
// - It is an in-page anchor (#section) or a relative path (docs/guide.md)
// - Its host is on the skip-domain list: sites that reject every automated
//   request and would otherwise show up as false failures
//
// Skip-domain matching uses the `url` crate to pull the host out, lowercases
// it, drops a leading "www." and accepts the domain itself or any subdomain.
// =============================================================================

use serde::Serialize;
use url::Url;

/// Why a link was not checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// "#anchor" or anything not starting with "http"
    AnchorOrRelative,
    /// Host is a configured skip domain
    BotProtected,
}

/// Returns the reason to skip `url`, or None when it should be checked.
///
/// Anchors and relative links are tested first, so a relative path never
/// reaches URL parsing.
pub fn skip_reason(url: &str, skip_domains: &[String]) -> Option<SkipReason> {
    if url.starts_with('#') || !url.starts_with("http") {
        return Some(SkipReason::AnchorOrRelative);
    }

    if is_skip_domain(url, skip_domains) {
        return Some(SkipReason::BotProtected);
    }

    None
}

// Returns true when the URL's host is a skip domain or one of its subdomains
//
// Unparseable URLs are never treated as skip domains; they go on to the
// checker and fail there with a proper error message.
pub fn is_skip_domain(url: &str, skip_domains: &[String]) -> bool {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => return false,
        },
        Err(_) => return false,
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);

    skip_domains.iter().any(|domain| {
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
