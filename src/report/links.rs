// src/report/links.rs
// =============================================================================
// The link checker's report: counts for the console, and a markdown file
// listing every failed link.
//
// The file is written only when at least one link failed; a clean run leaves
// no file behind so CI can key off its presence.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::checker::{CheckResult, Link};
use crate::error::GuardianError;

/// A link paired with the outcome of checking it
#[derive(Debug, Clone, Serialize)]
pub struct CheckedLink {
    pub link: Link,
    pub result: CheckResult,
}

/// Aggregate outcome of one link-check run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkReport {
    /// Links extracted, duplicates included
    pub total_found: usize,
    /// Links left after deduplication
    pub unique: usize,
    pub skipped_anchor: usize,
    pub skipped_bot_protected: usize,
    pub succeeded: usize,
    /// Only failures keep their link and result
    pub failed: Vec<CheckedLink>,
}

impl LinkReport {
    pub fn new(total_found: usize, unique: usize) -> Self {
        Self {
            total_found,
            unique,
            ..Self::default()
        }
    }

    /// Links that were actually sent to the network
    pub fn checked(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped_anchor + self.skipped_bot_protected
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Prints the human-readable summary to stdout
    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("📊 LINK CHECK REPORT");
        println!("{}", "=".repeat(60));
        println!("Total links found: {}", self.total_found);
        println!("Unique URLs: {}", self.unique);
        println!("Links checked: {}", self.checked());
        println!("Links skipped (total): {}", self.skipped());
        println!("  - Anchors/relative: {}", self.skipped_anchor);
        println!("  - Bot-protected: {}", self.skipped_bot_protected);
        println!("✅ Successful: {}", self.succeeded);
        println!("❌ Failed: {}", self.failed.len());
        println!();
    }

    /// Renders the markdown report with one section per failed link
    pub fn render_markdown(&self, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "# Link Check Report\n");
        let _ = writeln!(out, "**Date:** {}\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "## Summary\n");
        let _ = writeln!(out, "- Total links found: {}", self.total_found);
        let _ = writeln!(out, "- Unique URLs: {}", self.unique);
        let _ = writeln!(out, "- Links checked: {}", self.checked());
        let _ = writeln!(out, "- Links skipped (total): {}", self.skipped());
        let _ = writeln!(out, "  - Anchors/relative: {}", self.skipped_anchor);
        let _ = writeln!(out, "  - Bot-protected: {}", self.skipped_bot_protected);
        let _ = writeln!(out, "- ✅ Successful: {}", self.succeeded);
        let _ = writeln!(out, "- ❌ Failed: {}\n", self.failed.len());

        if self.has_failures() {
            let _ = writeln!(out, "## Failed Links\n");
            for item in &self.failed {
                let _ = writeln!(out, "### [{}]({})\n", item.link.text, item.link.url);
                if let CheckResult::Error { message, .. } = &item.result {
                    let _ = writeln!(out, "- **Error:** {message}");
                }
                if let Some(code) = item.result.status_code() {
                    let _ = writeln!(out, "- **Status Code:** {code}");
                }
                out.push('\n');
            }
        }

        out
    }

    /// Writes the report to `path` when there are failures.
    ///
    /// Returns whether a file was written.
    pub fn write_if_failed(&self, path: &Path) -> Result<bool, GuardianError> {
        if !self.has_failures() {
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
