// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per maintenance job:
//   awesome-guardian check      -> verify every link in README.md
//   awesome-guardian discover   -> search GitHub for projects to add
//
// Every flag has a default, so CI runs both jobs with no arguments at all.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    CheckerConfig, DiscoveryConfig, DEFAULT_DISCOVERY_REPORT, DEFAULT_INPUT, DEFAULT_LINK_REPORT,
    DEFAULT_MAX_RETRIES,
};

#[derive(Parser, Debug)]
#[command(
    name = "awesome-guardian",
    version,
    about = "Maintenance bots for the awesome blockchain greentech list",
    long_about = "awesome-guardian checks every link in the list's README and searches GitHub \
                  for new projects worth adding. Findings are written to markdown reports; \
                  broken links never fail the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every link in the README and report the broken ones
    ///
    /// Example: awesome-guardian check --input README.md
    Check {
        /// Markdown document to scan
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Where to write the report when links fail
        #[arg(long, default_value = DEFAULT_LINK_REPORT)]
        report: PathBuf,

        /// Retries after a timeout or connection failure
        #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Extra domain to skip (repeatable), on top of the built-in list
        #[arg(long = "skip-domain", value_name = "DOMAIN")]
        skip_domains: Vec<String>,

        /// Print the report as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Search GitHub for new projects not yet in the README
    ///
    /// Example: GITHUB_TOKEN=... awesome-guardian discover
    Discover {
        /// Markdown document listing the existing projects
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Where to write the discovery digest
        #[arg(long, default_value = DEFAULT_DISCOVERY_REPORT)]
        report: PathBuf,

        /// GitHub token; without one the anonymous rate limit applies
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,
    },
}

impl Commands {
    /// Builds the checker settings from `check` flags
    pub fn checker_config(
        input: PathBuf,
        report: PathBuf,
        max_retries: usize,
        timeout: u64,
        skip_domains: &[String],
    ) -> CheckerConfig {
        let mut config = CheckerConfig::default()
            .with_max_retries(max_retries)
            .with_timeout(Duration::from_secs(timeout))
            .with_extra_skip_domains(skip_domains);
        config.input = input;
        config.report_path = report;
        config
    }

    /// Builds the discovery settings from `discover` flags
    pub fn discovery_config(input: PathBuf, report: PathBuf, token: Option<String>) -> DiscoveryConfig {
        let mut config = DiscoveryConfig::default().with_token(token);
        config.input = input;
        config.report_path = report;
        config
    }
}
