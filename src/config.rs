// src/config.rs
// =============================================================================
// Settings for both jobs (link checking and project discovery).
//
// Every knob has a fixed default matching how the list is maintained in CI.
// The CLI layer (cli.rs) builds these structs from command-line flags, and
// tests build them directly with the delays set to zero.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Markdown document both jobs read.
pub const DEFAULT_INPUT: &str = "README.md";

/// Where the link checker writes its failure report.
pub const DEFAULT_LINK_REPORT: &str = "link_check_report.md";

/// Where the discovery job writes its digest.
pub const DEFAULT_DISCOVERY_REPORT: &str = "new_projects_report.md";

/// Per-request timeout for link probes and search calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retries after the first attempt (2 retries = 3 attempts total).
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// Pause before retrying a timed-out or refused connection.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Pause after every probed link, across the whole batch.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Redirect hops a link probe follows before giving up.
pub const MAX_REDIRECTS: usize = 30;

/// Pause after every search API query.
pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_secs(2);

/// Browser-like agent; several hosts reject obvious bot agents outright.
pub const CHECKER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DISCOVERY_USER_AGENT: &str = "AwesomeBlockchainGreentechBot/1.0";

pub const GITHUB_API: &str = "https://api.github.com";

/// Domains that block automated requests no matter how polite they are.
pub const DEFAULT_SKIP_DOMAINS: &[&str] = &[
    "researchgate.net",
    "reddit.com",
    "medium.com",
    "substack.com",
    "mdpi.com",
];

/// Settings for `awesome-guardian check`.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub input: PathBuf,
    pub report_path: PathBuf,
    pub timeout: Duration,
    pub max_retries: usize,
    pub retry_delay: Duration,
    pub request_delay: Duration,
    pub user_agent: String,
    pub skip_domains: Vec<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            report_path: PathBuf::from(DEFAULT_LINK_REPORT),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_delay: DEFAULT_REQUEST_DELAY,
            user_agent: CHECKER_USER_AGENT.to_string(),
            skip_domains: DEFAULT_SKIP_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl CheckerConfig {
    /// Sets the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends extra skip domains on top of the defaults.
    ///
    /// Domains are lowercased so matching stays case-insensitive.
    #[must_use]
    pub fn with_extra_skip_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if !domain.is_empty() && !self.skip_domains.contains(&domain) {
                self.skip_domains.push(domain);
            }
        }
        self
    }
}

/// Settings for `awesome-guardian discover`.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub input: PathBuf,
    pub report_path: PathBuf,
    pub api_base: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub query_delay: Duration,
    pub user_agent: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            report_path: PathBuf::from(DEFAULT_DISCOVERY_REPORT),
            api_base: GITHUB_API.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            query_delay: DEFAULT_QUERY_DELAY,
            user_agent: DISCOVERY_USER_AGENT.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Sets the API token; empty strings count as no token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}
