//! Health report served by `GET /health`
//!
//! Reports configuration validity and the configured stores. Access tokens are
//! never included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopbridge_domain::StoreSummary;

/// Configuration health snapshot
///
/// # Example
/// ```no_run
/// use shopbridge_app::utils::health::HealthReport;
///
/// let report = HealthReport::unhealthy("Primary store A is not configured.");
/// assert!(!report.ok);
/// assert!(report.stores.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub ok: bool,

    /// Key of the primary store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,

    /// Configured stores in declaration order
    #[serde(default)]
    pub stores: Vec<StoreSummary>,

    /// Validation failure, when `ok` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// `stores` lists the primary first; its key becomes `primary`.
    pub fn healthy(stores: Vec<StoreSummary>) -> Self {
        Self {
            ok: true,
            primary: stores.first().map(|store| store.key.clone()),
            stores,
            error: None,
            checked_at: Utc::now(),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            primary: None,
            stores: Vec::new(),
            error: Some(error.into()),
            checked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use shopbridge_domain::StoreRole;

    use super::*;

    fn summary(key: &str, role: StoreRole) -> StoreSummary {
        StoreSummary {
            key: key.into(),
            domain: format!("{}.myshopify.com", key.to_lowercase()),
            role,
        }
    }

    #[test]
    fn healthy_report_takes_primary_from_first_store() {
        let report = HealthReport::healthy(vec![
            summary("A", StoreRole::Primary),
            summary("B", StoreRole::Secondary),
        ]);
        assert!(report.ok);
        assert_eq!(report.primary.as_deref(), Some("A"));
        assert_eq!(report.stores.len(), 2);
        assert_eq!(report.stores[1].role, StoreRole::Secondary);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stores"][1]["domain"], "b.myshopify.com");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn unhealthy_report_carries_error() {
        let json = serde_json::to_value(HealthReport::unhealthy("boom")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("primary").is_none());
    }
}
