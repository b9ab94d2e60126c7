// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Falls back to GET when HEAD is answered with 403 or 405
// - Retries timeouts and connection failures a fixed number of times
// - Turns every failure into a CheckResult instead of an error
//
// The network sits behind the `Probe` trait. Production code uses
// `ReqwestProbe`; tests script the responses to exercise the retry policy.
// =============================================================================

use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::{CheckerConfig, MAX_REDIRECTS};

/// Transport messages are cut to this many characters in results
const MAX_MESSAGE_CHARS: usize = 100;

/// HTTP method used for one probe request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Existence check without a body
    Head,
    /// Full content request
    Get,
}

/// What the server answered, after redirects were followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub final_url: String,
}

/// Why a probe request produced no response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Timeout")]
    Timeout,
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Request error: {0}")]
    Request(String),
}

impl ProbeError {
    /// Timeouts and refused connections are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Timeout | ProbeError::Connection(_))
    }
}

/// Sends a single request and reports the outcome.
///
/// Implementations must follow redirects and apply their own timeout.
pub trait Probe {
    fn probe<'a>(
        &'a self,
        method: Method,
        url: &'a str,
    ) -> BoxFuture<'a, Result<ProbeResponse, ProbeError>>;
}

/// Outcome of checking one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    /// Final status was below 400
    Success { status_code: u16, final_url: String },
    /// HTTP error status or transport failure
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
        message: String,
    },
}

impl CheckResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckResult::Success { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CheckResult::Success { status_code, .. } => Some(*status_code),
            CheckResult::Error { status_code, .. } => *status_code,
        }
    }

    fn from_error(error: &ProbeError) -> Self {
        CheckResult::Error {
            status_code: None,
            message: error.to_string(),
        }
    }
}

// Probe backed by a shared reqwest client
//
// The client carries the timeout, a browser-like User-Agent and the Accept
// headers that some CDNs insist on before answering.
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    pub fn new(config: &CheckerConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

impl Probe for ReqwestProbe {
    fn probe<'a>(
        &'a self,
        method: Method,
        url: &'a str,
    ) -> BoxFuture<'a, Result<ProbeResponse, ProbeError>> {
        Box::pin(async move {
            let request = match method {
                Method::Head => self.client.head(url),
                Method::Get => self.client.get(url),
            };

            match request.send().await {
                Ok(response) => Ok(ProbeResponse {
                    status: response.status().as_u16(),
                    final_url: response.url().to_string(),
                }),
                Err(e) => Err(categorize_error(&e)),
            }
        })
    }
}

// Sorts reqwest errors into the three transport failure kinds
//
// - Timeout: the per-request timeout elapsed
// - Connection: DNS failure, refused or reset connection
// - Request: everything else (TLS, redirect loops, malformed URLs, ...)
fn categorize_error(error: &reqwest::Error) -> ProbeError {
    let message = truncate(&error.to_string());

    if error.is_timeout() {
        ProbeError::Timeout
    } else if error.is_connect() {
        ProbeError::Connection(message)
    } else {
        ProbeError::Request(message)
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_MESSAGE_CHARS).collect()
}

// One attempt: HEAD, then GET if HEAD was refused with 403/405
//
// Some servers forbid or don't implement HEAD but serve GET fine, so the
// fallback belongs to the same attempt.
async fn attempt<P: Probe + ?Sized>(probe: &P, url: &str) -> Result<ProbeResponse, ProbeError> {
    let response = probe.probe(Method::Head, url).await?;

    let status = StatusCode::from_u16(response.status).ok();
    if matches!(status, Some(StatusCode::METHOD_NOT_ALLOWED | StatusCode::FORBIDDEN)) {
        debug!(url, status = response.status, "HEAD refused, retrying with GET");
        return probe.probe(Method::Get, url).await;
    }

    Ok(response)
}

/// Checks one URL with the configured retry budget.
///
/// Makes at most `max_retries + 1` attempts. Only timeouts and connection
/// failures are retried, each after `retry_delay`. An HTTP response is final
/// whatever its status.
pub async fn check_url<P: Probe + ?Sized>(
    probe: &P,
    url: &str,
    max_retries: usize,
    retry_delay: Duration,
) -> CheckResult {
    let mut attempt_no = 0;

    loop {
        match attempt(probe, url).await {
            Ok(response) if response.status < 400 => {
                return CheckResult::Success {
                    status_code: response.status,
                    final_url: response.final_url,
                };
            }
            Ok(response) => {
                return CheckResult::Error {
                    status_code: Some(response.status),
                    message: format!("HTTP {}", response.status),
                };
            }
            Err(error) if error.is_retryable() && attempt_no < max_retries => {
                attempt_no += 1;
                debug!(url, %error, attempt = attempt_no, "retrying after transport failure");
                tokio::time::sleep(retry_delay).await;
            }
            Err(error) => return CheckResult::from_error(&error),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture instead of `async fn` in the trait?
//    - A boxed future keeps the trait object-safe and works on older compilers
//    - `Box::pin(async move { ... })` turns an async block into one
//
// 2. What does `?Sized` on `P: Probe + ?Sized` allow?
//    - Callers may pass `&dyn Probe` as well as a concrete type
//
// 3. Why is `loop` used instead of `for attempt in 0..=max_retries`?
//    - Every arm either returns or sleeps and goes round again, so the
//      "retries exhausted" case is handled by the match guard itself
// -----------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::test_http::{closed_port, serve, serve_silent, Reply};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Probe that replays a fixed script and records every request
    pub(crate) struct ScriptedProbe {
        script: Mutex<VecDeque<Result<ProbeResponse, ProbeError>>>,
        pub(crate) calls: Mutex<Vec<(Method, String)>>,
    }

    impl ScriptedProbe {
        pub(crate) fn new(script: Vec<Result<ProbeResponse, ProbeError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn methods(&self) -> Vec<Method> {
            self.calls.lock().unwrap().iter().map(|(m, _)| *m).collect()
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(_, u)| u.clone()).collect()
        }
    }

    impl Probe for ScriptedProbe {
        fn probe<'a>(
            &'a self,
            method: Method,
            url: &'a str,
        ) -> BoxFuture<'a, Result<ProbeResponse, ProbeError>> {
            self.calls.lock().unwrap().push((method, url.to_string()));
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProbeError::Request("script exhausted".to_string())));
            Box::pin(async move { next })
        }
    }

    pub(crate) fn status(code: u16) -> Result<ProbeResponse, ProbeError> {
        Ok(ProbeResponse {
            status: code,
            final_url: "https://final.example/".to_string(),
        })
    }

    fn refused() -> Result<ProbeResponse, ProbeError> {
        Err(ProbeError::Connection("connection refused".to_string()))
    }

    #[tokio::test]
    async fn test_head_success() {
        let probe = ScriptedProbe::new(vec![status(200)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Success {
                status_code: 200,
                final_url: "https://final.example/".to_string()
            }
        );
        assert_eq!(probe.methods(), vec![Method::Head]);
    }

    #[tokio::test]
    async fn test_forbidden_head_falls_back_to_get_once() {
        let probe = ScriptedProbe::new(vec![status(403), status(200), status(200)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert!(result.is_success());
        assert_eq!(probe.methods(), vec![Method::Head, Method::Get]);
    }

    #[tokio::test]
    async fn test_forbidden_get_is_final() {
        let probe = ScriptedProbe::new(vec![status(403), status(403)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Error {
                status_code: Some(403),
                message: "HTTP 403".to_string()
            }
        );
        assert_eq!(probe.methods(), vec![Method::Head, Method::Get]);
    }

    #[tokio::test]
    async fn test_method_not_allowed_falls_back_to_get() {
        let probe = ScriptedProbe::new(vec![status(405), status(301)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(result.status_code(), Some(301));
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let probe = ScriptedProbe::new(vec![status(404)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(result.status_code(), Some(404));
        assert!(!result.is_success());
        assert_eq!(probe.methods(), vec![Method::Head]);
    }

    #[tokio::test]
    async fn test_connection_failure_exhausts_budget() {
        let probe = ScriptedProbe::new(vec![refused(), refused(), refused(), status(200)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Error {
                status_code: None,
                message: "Connection error: connection refused".to_string()
            }
        );
        assert_eq!(probe.methods().len(), 3);
    }

    #[tokio::test]
    async fn test_timeout_then_success() {
        let probe = ScriptedProbe::new(vec![Err(ProbeError::Timeout), status(204)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(result.status_code(), Some(204));
        assert_eq!(probe.methods().len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let probe = ScriptedProbe::new(vec![Err(ProbeError::Timeout)]);
        let result = check_url(&probe, "https://x.example", 0, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Error {
                status_code: None,
                message: "Timeout".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_timeout_during_get_fallback_is_retried() {
        let probe = ScriptedProbe::new(vec![status(403), Err(ProbeError::Timeout), status(200)]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert!(result.is_success());
        assert_eq!(probe.methods(), vec![Method::Head, Method::Get, Method::Head]);
    }

    #[tokio::test]
    async fn test_request_error_is_not_retried() {
        let probe = ScriptedProbe::new(vec![
            Err(ProbeError::Request("invalid certificate".to_string())),
            status(200),
        ]);
        let result = check_url(&probe, "https://x.example", 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Error {
                status_code: None,
                message: "Request error: invalid certificate".to_string()
            }
        );
        assert_eq!(probe.methods().len(), 1);
    }

    #[test]
    fn test_truncate_counts_chars() {
        let long = "é".repeat(150);
        assert_eq!(truncate(&long).chars().count(), 100);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_result_json_shape() {
        let result = CheckResult::Error {
            status_code: None,
            message: "Timeout".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "Timeout"}));
    }

    // -------------------------------------------------------------------------
    // ReqwestProbe against a local server
    // -------------------------------------------------------------------------

    fn local_probe(timeout: Duration) -> ReqwestProbe {
        let config = CheckerConfig {
            timeout,
            ..CheckerConfig::default()
        };
        ReqwestProbe::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_server_forbidding_head_is_asked_with_get() {
        let (base, server) = serve(vec![Reply::status(403), Reply::status(200)]).await;
        let probe = local_probe(Duration::from_secs(5));
        let url = format!("{base}/x");

        let result = check_url(&probe, &url, 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Success {
                status_code: 200,
                final_url: url.clone()
            }
        );
        let seen = server.await.unwrap();
        let requests: Vec<String> = seen.iter().map(|r| format!("{} {}", r.method, r.target)).collect();
        assert_eq!(requests, vec!["HEAD /x", "GET /x"]);
        assert!(seen[0].header("user-agent").unwrap().starts_with("Mozilla/5.0"));
        assert_eq!(seen[0].header("accept-language"), Some("en-US,en;q=0.9"));
    }

    #[tokio::test]
    async fn test_server_error_status_is_reported() {
        let (base, _server) = serve(vec![Reply::status(404)]).await;
        let probe = local_probe(Duration::from_secs(5));

        let result = check_url(&probe, &format!("{base}/gone"), 2, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Error {
                status_code: Some(404),
                message: "HTTP 404".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_refused_port_is_a_connection_error() {
        let url = closed_port().await;
        let probe = local_probe(Duration::from_secs(5));

        let error = probe.probe(Method::Head, &url).await.unwrap_err();
        assert!(matches!(error, ProbeError::Connection(_)), "got {error:?}");
        assert!(error.is_retryable());

        match check_url(&probe, &url, 2, Duration::ZERO).await {
            CheckResult::Error {
                status_code: None,
                message,
            } => {
                assert!(message.starts_with("Connection error: "), "got {message}");
                assert!(message.chars().count() <= "Connection error: ".len() + MAX_MESSAGE_CHARS);
            }
            other => panic!("expected a connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let url = serve_silent().await;
        let probe = local_probe(Duration::from_millis(200));

        let error = probe.probe(Method::Head, &url).await.unwrap_err();
        assert_eq!(error, ProbeError::Timeout);
    }

    #[tokio::test]
    async fn test_malformed_url_is_a_request_error() {
        let probe = local_probe(Duration::from_secs(5));

        let error = probe.probe(Method::Get, "not a url").await.unwrap_err();
        assert!(matches!(error, ProbeError::Request(_)), "got {error:?}");
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn test_long_redirect_chain_is_followed() {
        let mut replies: Vec<Reply> = (1..=12).map(|n| Reply::redirect(&format!("/hop/{n}"))).collect();
        replies.push(Reply::status(200));
        let (base, server) = serve(replies).await;
        let probe = local_probe(Duration::from_secs(5));

        let result = check_url(&probe, &format!("{base}/start"), 0, Duration::ZERO).await;

        assert_eq!(
            result,
            CheckResult::Success {
                status_code: 200,
                final_url: format!("{base}/hop/12")
            }
        );
        assert_eq!(server.await.unwrap().len(), 13);
    }
}
