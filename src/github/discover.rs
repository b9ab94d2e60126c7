// src/github/discover.rs
// =============================================================================
// Runs every category's queries and collects new, relevant repositories.
//
// For each search hit:
// 1. Drop it if the list already references it (repo or its organisation)
// 2. Drop it unless it mentions enough of the category's keywords
// 3. Drop it if an earlier query in the same category already found it
//
// A rate-limited query becomes a warning in the report; any other failed
// query is logged and skipped. Neither stops the run.
// =============================================================================

use std::time::Duration;
use tracing::{info, warn};

use super::existing::ExistingRepos;
use super::relevance::Category;
use super::search::{SearchApi, SearchError};
use crate::report::{CategoryHits, DiscoveryReport};

pub async fn discover<S: SearchApi + ?Sized>(
    plan: &[Category],
    existing: &ExistingRepos,
    api: &S,
    query_delay: Duration,
) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();

    for category in plan {
        info!("Searching: {}", category.name);
        let mut hits = CategoryHits::new(category.name);

        for query in category.queries {
            info!("  Query: {query}");

            let candidates = match api.search(query).await {
                Ok(repos) => repos,
                Err(SearchError::RateLimited) => {
                    let message = format!("Rate limited or forbidden for query: {query}");
                    warn!("  {message}");
                    report.rate_limit_errors.push(message);
                    Vec::new()
                }
                Err(e) => {
                    warn!("  Error: {e}");
                    Vec::new()
                }
            };

            let relevant: Vec<_> = candidates
                .into_iter()
                .filter(|repo| !existing.contains(&repo.full_name))
                .filter(|repo| category.is_relevant(repo))
                .collect();

            info!("  Found {} relevant new projects", relevant.len());

            for repo in relevant {
                if !hits.repos.iter().any(|r| r.full_name == repo.full_name) {
                    hits.repos.push(repo);
                }
            }

            tokio::time::sleep(query_delay).await;
        }

        report.categories.push(hits);
    }

    report
}
