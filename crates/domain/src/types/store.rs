//! Store descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Role a store plays in synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    /// Authoritative source of customer records.
    Primary,
    /// Downstream mirror of qualifying customers.
    Secondary,
}

impl_domain_status_conversions!(StoreRole {
    Primary => "primary",
    Secondary => "secondary",
});

/// Resolved connection details for one configured store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub key: String,
    pub domain: String,
    pub access_token: String,
    pub role: StoreRole,
}

// Tokens must never reach logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("key", &self.key)
            .field("domain", &self.domain)
            .field("access_token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}


/// Credential-free description of a store, safe to expose on the health
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub key: String,
    pub domain: String,
    pub role: StoreRole,
}
