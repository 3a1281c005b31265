//! Health endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::AppContext;
use crate::utils::health::HealthReport;

/// `GET /health`
///
/// # Example Response
/// ```json
/// {
///   "ok": true,
///   "primary": "A",
///   "stores": [
///     { "key": "A", "domain": "primary.myshopify.com", "role": "primary" },
///     { "key": "B", "domain": "outlet.myshopify.com", "role": "secondary" }
///   ],
///   "checked_at": "2025-01-01T00:00:00Z"
/// }
/// ```
pub async fn health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<HealthReport>) {
    let report = ctx.health_check();
    let status = if report.ok { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
    (status, Json(report))
}
