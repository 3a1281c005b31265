//! Manually triggered routes: primary-store listing and bulk sync

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shopbridge_domain::constants::DEFAULT_BULK_LIMIT;
use tracing::{error, info};

use crate::context::AppContext;

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

impl LimitParams {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_BULK_LIMIT)
    }
}

/// `GET /customers?limit=N`
pub async fn list_customers(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<LimitParams>,
) -> Response {
    match ctx.sync.fetch_primary_customers(params.limit()).await {
        Ok(customers) => Json(json!({
            "success": true,
            "count": customers.len(),
            "customers": customers,
        }))
        .into_response(),
        Err(err) => {
            error!(error = %err, "listing primary customers failed");
            failure(err.to_string())
        }
    }
}

/// `POST /sync?limit=N`
pub async fn bulk_sync(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<LimitParams>,
) -> Response {
    let limit = params.limit();
    info!(limit, "manual bulk sync requested");

    match ctx.sync.sync_members(limit).await {
        Ok(results) => Json(json!({
            "success": true,
            "processed": results.len(),
            "details": results,
        }))
        .into_response(),
        Err(err) => {
            error!(error = %err, "bulk sync failed");
            failure(err.to_string())
        }
    }
}

fn failure(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": message })))
        .into_response()
}
