//! Primary-store customer webhooks
//!
//! Handlers always answer 200 so the platform does not redeliver events
//! because of downstream sync failures. Outcomes are logged instead.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use shopbridge_domain::CustomerId;
use tracing::{info, warn};

use crate::context::AppContext;

/// Fields read from a customer webhook body. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerWebhook {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl CustomerWebhook {
    /// Parse a raw body; `None` when it is not a JSON object.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Numeric id, accepting both JSON numbers and numeric strings.
    pub fn customer_id(&self) -> Option<CustomerId> {
        let id = match self.id.as_ref()? {
            Value::Number(n) => n.as_u64().map(CustomerId::new),
            Value::String(s) => s.parse::<CustomerId>().ok(),
            _ => None,
        }?;
        (!id.is_unset()).then_some(id)
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// `POST /webhooks/customer-create`
pub async fn customer_create(State(ctx): State<Arc<AppContext>>, body: Bytes) -> StatusCode {
    upsert(&ctx, "create", &body).await
}

/// `POST /webhooks/customer-update`
pub async fn customer_update(State(ctx): State<Arc<AppContext>>, body: Bytes) -> StatusCode {
    upsert(&ctx, "update", &body).await
}

/// `POST /webhooks/customer-delete`
pub async fn customer_delete(State(ctx): State<Arc<AppContext>>, body: Bytes) -> StatusCode {
    let Some(id) = CustomerWebhook::parse(&body).as_ref().and_then(CustomerWebhook::customer_id)
    else {
        warn!("delete webhook without id; ignored");
        return StatusCode::OK;
    };

    info!(customer_id = %id, "delete webhook received");
    let report = ctx.sync.disable_customer(id).await;
    info!(
        customer_id = %id,
        status = ?report.status,
        disabled = report.disabled_count(),
        "delete webhook processed"
    );

    StatusCode::OK
}

async fn upsert(ctx: &AppContext, event: &'static str, body: &[u8]) -> StatusCode {
    let Some(payload) = CustomerWebhook::parse(body) else {
        warn!(event, "unparsable webhook payload; ignored");
        return StatusCode::OK;
    };

    let (Some(id), Some(email)) = (payload.customer_id(), payload.email()) else {
        warn!(event, "webhook payload missing id or email; ignored");
        return StatusCode::OK;
    };

    info!(
        event,
        customer_id = %id,
        email,
        tags = payload.tags.as_deref().unwrap_or("(not sent)"),
        "webhook received"
    );

    // The payload's tags only gate the work; the sync itself re-reads the
    // primary store.
    if !ctx.sync.is_member(payload.tags.as_deref()) {
        info!(event, customer_id = %id, email, "not a member; skipping");
        return StatusCode::OK;
    }

    let report = ctx.sync.sync_customer(id).await;
    info!(
        event,
        customer_id = %id,
        status = ?report.status,
        writes = report.writes(),
        success = report.is_success(),
        "webhook processed"
    );

    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_string_ids() {
        let numeric = CustomerWebhook::parse(br#"{"id": 42, "email": "a@x.com"}"#).unwrap();
        assert_eq!(numeric.customer_id(), Some(CustomerId::new(42)));

        let string = CustomerWebhook::parse(br#"{"id": "43"}"#).unwrap();
        assert_eq!(string.customer_id(), Some(CustomerId::new(43)));
    }

    #[test]
    fn rejects_missing_or_zero_ids() {
        let bodies: [&[u8]; 4] = [b"{}", br#"{"id": 0}"#, br#"{"id": null}"#, br#"{"id": "abc"}"#];
        for body in bodies {
            let payload = CustomerWebhook::parse(body).unwrap();
            assert_eq!(payload.customer_id(), None);
        }
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let payload = CustomerWebhook::parse(br#"{"id": 1, "email": "  "}"#).unwrap();
        assert_eq!(payload.email(), None);
    }

    #[test]
    fn non_json_is_unparsable() {
        assert!(CustomerWebhook::parse(b"not json").is_none());
        assert!(CustomerWebhook::parse(b"").is_none());
    }
}
