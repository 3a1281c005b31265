//! Bulk synchronization results

use serde::{Deserialize, Serialize};

use super::customer::{Customer, CustomerId};

/// Outcome of one customer within a bulk run. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub id: CustomerId,
    pub email: Option<String>,
    pub tags: Option<String>,
    pub synced: bool,
}

impl SyncResult {
    #[must_use]
    pub fn for_customer(customer: &Customer, synced: bool) -> Self {
        Self {
            id: customer.id,
            email: customer.email.clone(),
            tags: customer.tags.clone(),
            synced,
        }
    }
}
