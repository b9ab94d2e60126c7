// src/github/search.rs
// =============================================================================
// This module queries the GitHub repository search API.
//
// Each query is narrowed to projects with some traction and recent activity
// ("stars:>10 pushed:>2023-01-01") and sorted by stars, ten results per query.
//
// Authentication is optional: without a token GitHub applies the strict
// anonymous rate limit, which shows up as HTTP 403.
// =============================================================================

use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::DiscoveryConfig;

/// Extra qualifiers appended to every query
const QUERY_QUALIFIERS: &str = "stars:>10 pushed:>2023-01-01";

const RESULTS_PER_QUERY: &str = "10";

/// A repository as returned by the search API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    #[serde(rename = "html_url")]
    pub url: String,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

/// Why a search query returned nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// HTTP 403: rate limit hit or token lacks access
    #[error("Rate limited or forbidden")]
    RateLimited,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Runs one search query.
pub trait SearchApi {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Repository>, SearchError>>;
}

// Search client backed by reqwest
pub struct GitHubSearch {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl GitHubSearch {
    pub fn new(config: &DiscoveryConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/search/repositories", config.api_base.trim_end_matches('/')),
            token: config.token.clone(),
        })
    }
}

impl SearchApi for GitHubSearch {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Repository>, SearchError>> {
        Box::pin(async move {
            let q = format!("{query} {QUERY_QUALIFIERS}");
            let mut request = self.client.get(&self.endpoint).query(&[
                ("q", q.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", RESULTS_PER_QUERY),
            ]);

            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| SearchError::Request(truncate(&e.to_string())))?;

            match response.status() {
                StatusCode::OK => {}
                StatusCode::FORBIDDEN => return Err(SearchError::RateLimited),
                other => return Err(SearchError::Status(other.as_u16())),
            }

            let body: SearchResponse = response
                .json()
                .await
                .map_err(|e| SearchError::Decode(truncate(&e.to_string())))?;

            Ok(body.items)
        })
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(100).collect()
}
