//! HTTP route handlers

pub mod health;
pub mod manual;
pub mod webhooks;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;
use crate::utils::logging::log_request;

/// Build the HTTP router with the given application context.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/webhooks/customer-create", post(webhooks::customer_create))
        .route("/webhooks/customer-update", post(webhooks::customer_update))
        .route("/webhooks/customer-delete", post(webhooks::customer_delete))
        .route("/customers", get(manual::list_customers))
        .route("/sync", post(manual::bulk_sync))
        .route("/health", get(health::health))
        .layer(middleware::from_fn(log_request))
        .with_state(ctx)
}
