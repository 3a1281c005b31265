//! Tracing setup and per-request logging middleware

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info` (or `debug` when `verbose`).
/// `LOG_FORMAT=json` switches to newline-delimited JSON output. Calling this
/// more than once is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let result = if json { builder.json().try_init() } else { builder.compact().try_init() };

    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log every request with method, path, status and duration, inside a span
/// carrying a request id.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4();
    let span = info_span!("request", %request_id, %method, path = %path);

    async move {
        let started = Instant::now();
        info!("incoming request");
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            duration_ms = elapsed_ms(started),
            "request handled"
        );
        response
    }
    .instrument(span)
    .await
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn elapsed_ms_counts_whole_milliseconds() {
        if let Some(started) = Instant::now().checked_sub(Duration::from_millis(1_500)) {
            assert!(elapsed_ms(started) >= 1_500);
        }
        assert!(elapsed_ms(Instant::now()) < 1_000);
    }
}
