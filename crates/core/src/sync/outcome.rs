//! Typed per-store and per-customer outcomes
//!
//! Failures inside a single store never abort the surrounding run; they are
//! recorded here instead so callers and tests can inspect what happened.

use serde::Serialize;
use shopbridge_domain::CustomerId;

/// Why a store was left untouched during sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotMember,
    MissingEmail,
}

/// Result of reconciling one customer into one secondary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "detail", rename_all = "snake_case")]
pub enum StoreSyncOutcome {
    Created,
    Updated,
    Skipped(SkipReason),
    Failed(String),
}

/// Result of disabling one customer in one secondary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "detail", rename_all = "snake_case")]
pub enum StoreDisableOutcome {
    Disabled,
    NotFound,
    Failed(String),
}

/// Outcome tagged with the store it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreReport<T> {
    pub store: String,
    pub outcome: T,
}

/// Whether the primary record could be acted upon at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CustomerStatus {
    Processed,
    Invalid(String),
    FetchFailed(String),
}

/// Aggregate result of a single-customer sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSyncReport {
    pub customer_id: CustomerId,
    pub email: Option<String>,
    pub status: CustomerStatus,
    pub stores: Vec<StoreReport<StoreSyncOutcome>>,
}

impl CustomerSyncReport {
    pub(crate) fn rejected(
        customer_id: CustomerId,
        email: Option<String>,
        status: CustomerStatus,
    ) -> Self {
        Self { customer_id, email, status, stores: Vec::new() }
    }

    /// Processed, and no secondary store failed.
    pub fn is_success(&self) -> bool {
        self.status == CustomerStatus::Processed
            && self
                .stores
                .iter()
                .all(|report| !matches!(report.outcome, StoreSyncOutcome::Failed(_)))
    }

    /// Number of write calls that succeeded.
    pub fn writes(&self) -> usize {
        self.stores
            .iter()
            .filter(|report| {
                matches!(report.outcome, StoreSyncOutcome::Created | StoreSyncOutcome::Updated)
            })
            .count()
    }
}

/// Aggregate result of a single-customer disable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDisableReport {
    pub customer_id: CustomerId,
    pub email: Option<String>,
    pub status: CustomerStatus,
    pub stores: Vec<StoreReport<StoreDisableOutcome>>,
}

impl CustomerDisableReport {
    pub(crate) fn rejected(
        customer_id: CustomerId,
        email: Option<String>,
        status: CustomerStatus,
    ) -> Self {
        Self { customer_id, email, status, stores: Vec::new() }
    }

    pub fn disabled_count(&self) -> usize {
        self.stores
            .iter()
            .filter(|report| report.outcome == StoreDisableOutcome::Disabled)
            .count()
    }
}
