// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls the level, default "info")
// 2. Parse command-line arguments using clap
// 3. Dispatch to the check or discover job
// 4. Exit with proper code (0 = run completed, 1 = run could not complete)
//
// A broken link or a failed search query is a finding, not a failure: both
// jobs exit 0 once they have produced their report. Exit code 1 is reserved
// for a missing README or an I/O problem that stops the run.
// =============================================================================

mod checker;
mod cli;
mod config;
mod error;
mod github;
mod report;
#[cfg(test)]
mod test_http;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use cli::{Cli, Commands};
use config::{CheckerConfig, DiscoveryConfig};
use error::{read_input, GuardianError};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries the summary (or --json output)
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            report,
            max_retries,
            timeout,
            skip_domains,
            json,
        } => {
            let config = Commands::checker_config(input, report, max_retries, timeout, &skip_domains);
            handle_check(&config, json).await
        }
        Commands::Discover {
            input,
            report,
            github_token,
        } => {
            let config = Commands::discovery_config(input, report, github_token);
            handle_discover(&config).await
        }
    }
}

// Handles the 'check' subcommand
async fn handle_check(config: &CheckerConfig, json: bool) -> Result<i32> {
    info!("📖 Reading {}...", config.input.display());
    let content = read_input(&config.input)?;

    info!("🔍 Extracting links...");
    let links = checker::extract_links(&content);
    let total_found = links.len();
    info!("Found {total_found} links");

    let links = checker::dedupe_links(links);
    if links.len() < total_found {
        info!("Deduplicated to {} unique URLs", links.len());
    }

    let probe = checker::ReqwestProbe::new(config).map_err(GuardianError::from)?;
    let report = checker::check_links(links, total_found, &probe, config).await;

    if json {
        let output = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{output}");
    } else {
        report.print_summary();
    }

    if report.write_if_failed(&config.report_path)? {
        info!("Report saved to: {}", config.report_path.display());
        warn!("⚠️  Some links are broken!");
    } else {
        info!("✅ All links are working!");
    }

    // Broken links are reported, never fatal
    Ok(0)
}

// Handles the 'discover' subcommand
async fn handle_discover(config: &DiscoveryConfig) -> Result<i32> {
    info!("📖 Reading {}...", config.input.display());
    let content = read_input(&config.input)?;

    info!("🔍 Extracting existing repositories...");
    let existing = github::ExistingRepos::from_markdown(&content);
    info!("Found {} existing repositories", existing.len());

    if config.token.is_none() {
        warn!("⚠️  No GitHub token found. Rate limits will be strict.");
    }

    let api = github::GitHubSearch::new(config).map_err(GuardianError::from)?;
    let report = github::discover(github::CATEGORIES, &existing, &api, config.query_delay).await;

    report.print_summary();

    if report.write_if_needed(&config.report_path)? {
        info!("Report saved to: {}", config.report_path.display());
        info!("✅ Found {} new potential projects!", report.total());
    } else {
        info!("ℹ️  No new projects discovered this week.");
    }

    Ok(0)
}
