//! Retrying HTTP transport

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client as ReqwestClient, IntoUrl, Method, RequestBuilder, Response, StatusCode};
use shopbridge_domain::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_MS};
use shopbridge_domain::{ApiConfig, ShopBridgeError};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Upper bound on a server-requested `Retry-After` wait.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);
const BASE_BACKOFF: Duration = Duration::from_millis(200);

/// What to do after one attempt.
enum Step {
    Done(Result<Response, ShopBridgeError>),
    Retry(Duration),
}

/// Retrying HTTP client shared by every store adapter.
///
/// Connection failures, timeouts and 5xx responses are retried with
/// exponential backoff. 429 responses wait for the server's `Retry-After`
/// (capped), or the backoff schedule when the header is absent. Any other
/// response is handed back untouched, including 4xx.
#[derive(Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.inner.request(method, url)
    }

    /// Send `builder`, retrying as described on [`HttpClient`].
    ///
    /// The body must be clonable (JSON bodies are).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ShopBridgeError> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| ShopBridgeError::Internal("request body is not replayable".into()))?
                .build()
                .map_err(into_domain)?;
            let (method, url) = (request.method().clone(), request.url().clone());
            debug!(attempt, %method, %url, "sending HTTP request");

            let result = self.inner.execute(request).await;
            match self.next_step(result, attempt) {
                Step::Done(outcome) => return outcome,
                Step::Retry(delay) => {
                    debug!(attempt, %method, %url, delay_ms = millis(delay), "retrying");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn next_step(&self, result: reqwest::Result<Response>, attempt: usize) -> Step {
        let can_retry = attempt < self.max_attempts;

        match result {
            Ok(response) if can_retry && response.status() == StatusCode::TOO_MANY_REQUESTS => {
                let delay = self.rate_limit_delay(response.headers(), attempt);
                warn!(url = %response.url(), delay_ms = millis(delay), "rate limited");
                Step::Retry(delay)
            }
            Ok(response) if can_retry && response.status().is_server_error() => {
                debug!(status = %response.status(), "server error");
                Step::Retry(self.backoff_delay(attempt))
            }
            Ok(response) => Step::Done(Ok(response)),
            Err(err) if can_retry && is_transient(&err) => {
                debug!(error = %err, "transport error");
                Step::Retry(self.backoff_delay(attempt))
            }
            Err(err) => Step::Done(Err(into_domain(err))),
        }
    }

    /// Doubles per attempt, starting at the base backoff.
    fn backoff_delay(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1 << exponent)
    }

    fn rate_limit_delay(&self, headers: &HeaderMap, attempt: usize) -> Duration {
        retry_after(headers).map_or_else(
            || self.backoff_delay(attempt),
            |delay| delay.min(self.max_retry_after),
        )
    }
}

/// `Retry-After` in its delta-seconds form. The platform may send fractional
/// seconds (`"2.0"`). Values too large for a `Duration` saturate; callers cap
/// them.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds: f64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

fn into_domain(err: reqwest::Error) -> ShopBridgeError {
    InfraError::from(err).into()
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
    user_agent: Option<String>,
    default_headers: HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: BASE_BACKOFF,
            max_retry_after: MAX_RETRY_AFTER,
            user_agent: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl HttpClientBuilder {
    /// Timeout, attempt budget and User-Agent from the API settings.
    pub fn from_api(api: &ApiConfig) -> Self {
        Self::default()
            .timeout(Duration::from_millis(api.effective_timeout_ms()))
            .max_attempts(api.max_attempts)
            .user_agent(api.user_agent.clone())
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts, first try included. Never below one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn max_retry_after(mut self, cap: Duration) -> Self {
        self.max_retry_after = cap;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent on every request, merged over any set earlier.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, ShopBridgeError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(HttpClient {
            inner: builder.build().map_err(into_domain)?,
            max_attempts: self.max_attempts,
            base_backoff: self.base_backoff,
            max_retry_after: self.max_retry_after,
        })
    }
}
