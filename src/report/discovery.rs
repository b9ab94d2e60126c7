// src/report/discovery.rs
// =============================================================================
// The discovery digest: newly found repositories grouped by category, plus
// any queries that were rate limited.
//
// Written only when there is something to review (a discovery or a warning).
// =============================================================================

use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

use crate::error::GuardianError;
use crate::github::Repository;

/// New repositories found for one category
#[derive(Debug, Clone)]
pub struct CategoryHits {
    pub name: &'static str,
    pub repos: Vec<Repository>,
}

impl CategoryHits {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            repos: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// In search-plan order; categories with no hits are kept but not rendered
    pub categories: Vec<CategoryHits>,
    pub rate_limit_errors: Vec<String>,
}

impl DiscoveryReport {
    /// Total discoveries across categories
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.repos.len()).sum()
    }

    pub fn should_write(&self) -> bool {
        self.total() > 0 || !self.rate_limit_errors.is_empty()
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("📊 PROJECT DISCOVERY REPORT");
        println!("{}", "=".repeat(60));
        println!("Total new projects found: {}", self.total());
        if !self.rate_limit_errors.is_empty() {
            println!("⚠️  Encountered {} rate limit errors", self.rate_limit_errors.len());
        }
        println!();
    }

    pub fn render_markdown(&self, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();
        let total = self.total();

        // Writing into a String cannot fail
        let _ = writeln!(out, "# New Projects Discovery Report\n");
        let _ = writeln!(out, "**Date:** {}\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "**Total discoveries:** {total}\n");

        if !self.rate_limit_errors.is_empty() {
            let _ = writeln!(out, "## ⚠️ Rate Limit Errors\n");
            let _ = writeln!(out, "The following queries encountered rate limiting or access issues:\n");
            for error in &self.rate_limit_errors {
                let _ = writeln!(out, "- {error}");
            }
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "**Note:** Consider running the workflow again later or check the GitHub token permissions.\n"
            );
        }

        if total > 0 {
            let _ = writeln!(out, "## Suggested Additions\n");
            let _ = writeln!(
                out,
                "The following projects were discovered and may be relevant to add to the README:\n"
            );
        }

        for category in self.categories.iter().filter(|c| !c.repos.is_empty()) {
            let _ = writeln!(out, "### {}\n", category.name);
            for repo in &category.repos {
                render_repository(&mut out, repo);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "---\n");
        let _ = writeln!(
            out,
            "**Note:** Please review each project before adding to the README. \
             Verify that it is active, open-source, and relevant to blockchain greentech."
        );

        out
    }

    /// Writes the digest to `path` when there is something to report.
    ///
    /// Returns whether a file was written.
    pub fn write_if_needed(&self, path: &Path) -> Result<bool, GuardianError> {
        if !self.should_write() {
            return Ok(false);
        }

        std::fs::write(path, self.render_markdown(Utc::now())).map_err(|source| {
            GuardianError::WriteReport {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(true)
    }
}

fn render_repository(out: &mut String, repo: &Repository) {
    let _ = writeln!(out, "#### [{}]({}) ⭐ {}\n", repo.name, repo.url, repo.stars);
    let _ = writeln!(
        out,
        "- **Description:** {}",
        repo.description.as_deref().unwrap_or("No description")
    );
    let _ = writeln!(out, "- **Language:** {}", repo.language.as_deref().unwrap_or("Unknown"));
    if !repo.topics.is_empty() {
        let _ = writeln!(out, "- **Topics:** {}", repo.topics.join(", "));
    }
    // ISO timestamps: keep the date part only
    let updated: String = repo.updated_at.chars().take(10).collect();
    let _ = writeln!(out, "- **Last Updated:** {updated}");
    out.push('\n');
}
