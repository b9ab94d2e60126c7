// src/checker/batch.rs
// =============================================================================
// Runs the link checker over a whole document's worth of links.
//
// Links are checked one at a time, in document order, with a fixed pause
// after every network check. Skipped links (anchors, relative paths, skip
// domains) never touch the network and are only counted.
//
// Rust concepts:
// - Generics with trait bounds: works with any Probe implementation
// - enumerate(): numbering progress lines as [i/n]
// =============================================================================

use tracing::{info, warn};

use super::filter::{skip_reason, SkipReason};
use super::http::{check_url, CheckResult, Probe};
use super::markdown::Link;
use crate::config::CheckerConfig;
use crate::report::{CheckedLink, LinkReport};

// Checks every link and builds the run's report
//
// Parameters:
//   links: deduplicated links in document order
//   total_found: how many links were extracted before deduplication
//   probe: the network probe (reqwest in production)
//   config: retry budget and delays
pub async fn check_links<P: Probe + ?Sized>(
    links: Vec<Link>,
    total_found: usize,
    probe: &P,
    config: &CheckerConfig,
) -> LinkReport {
    let mut report = LinkReport::new(total_found, links.len());
    let total = links.len();

    for (i, link) in links.into_iter().enumerate() {
        let position = i + 1;

        match skip_reason(&link.url, &config.skip_domains) {
            Some(SkipReason::AnchorOrRelative) => {
                info!("[{position}/{total}] Skipping: {}", link.url);
                report.skipped_anchor += 1;
                continue;
            }
            Some(SkipReason::BotProtected) => {
                info!("[{position}/{total}] Skipping (bot-protected): {}", link.url);
                report.skipped_bot_protected += 1;
                continue;
            }
            None => {}
        }

        info!("[{position}/{total}] Checking: {}", link.url);
        let result = check_url(probe, &link.url, config.max_retries, config.retry_delay).await;

        match &result {
            CheckResult::Success { status_code, .. } => info!("  OK (HTTP {status_code})"),
            CheckResult::Error { message, .. } => warn!(url = %link.url, "  FAILED: {message}"),
        }

        if result.is_success() {
            report.succeeded += 1;
        } else {
            report.failed.push(CheckedLink { link, result });
        }

        tokio::time::sleep(config.request_delay).await;
    }

    report
}
