//! Store handle registry
//!
//! One handle is built for the primary store and one for every other
//! configured store. Construction happens once at startup and fails fast when
//! the primary store is not configured.

use std::fmt;
use std::sync::Arc;

use shopbridge_domain::{Config, Result, StoreConfig, StoreRole, StoreSummary};
use tracing::{debug, info};

use super::ports::{CustomerStore, CustomerStoreFactory};

/// Authenticated client for one store plus its identifying metadata.
#[derive(Clone)]
pub struct StoreHandle {
    key: String,
    domain: String,
    role: StoreRole,
    client: Arc<dyn CustomerStore>,
}

impl StoreHandle {
    pub fn new(
        key: impl Into<String>,
        domain: impl Into<String>,
        role: StoreRole,
        client: Arc<dyn CustomerStore>,
    ) -> Self {
        Self { key: key.into(), domain: domain.into(), role, client }
    }

    fn from_config(store: &StoreConfig, factory: &dyn CustomerStoreFactory) -> Result<Self> {
        let client = factory.client_for(&store.domain, &store.access_token)?;
        debug!(
            store = %store.key,
            domain = %store.domain,
            role = %store.role,
            "built store client"
        );
        Ok(Self::new(store.key.clone(), store.domain.clone(), store.role, client))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub const fn role(&self) -> StoreRole {
        self.role
    }

    pub fn client(&self) -> &dyn CustomerStore {
        self.client.as_ref()
    }

    /// Credential-free description for status reporting.
    pub fn summary(&self) -> StoreSummary {
        StoreSummary { key: self.key.clone(), domain: self.domain.clone(), role: self.role }
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("key", &self.key)
            .field("domain", &self.domain)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Primary handle plus every secondary handle, in configuration order.
#[derive(Debug, Clone)]
pub struct StoreRegistry {
    primary: StoreHandle,
    secondaries: Vec<StoreHandle>,
}

impl StoreRegistry {
    pub const fn new(primary: StoreHandle, secondaries: Vec<StoreHandle>) -> Self {
        Self { primary, secondaries }
    }

    /// Materialize handles for all configured stores.
    ///
    /// # Errors
    /// Returns `ShopBridgeError::Config` when the primary store is missing, or
    /// whatever the factory reports for a store it cannot build.
    pub fn from_config(config: &Config, factory: &dyn CustomerStoreFactory) -> Result<Self> {
        let primary = StoreHandle::from_config(&config.primary()?, factory)?;
        let secondaries = config
            .secondaries()
            .iter()
            .map(|store| StoreHandle::from_config(store, factory))
            .collect::<Result<Vec<_>>>()?;

        info!(
            primary = %primary.key(),
            secondaries = secondaries.len(),
            "store registry ready"
        );

        Ok(Self::new(primary, secondaries))
    }

    pub const fn primary(&self) -> &StoreHandle {
        &self.primary
    }

    pub fn secondaries(&self) -> &[StoreHandle] {
        &self.secondaries
    }

    /// Primary first, then secondaries in configuration order.
    pub fn summaries(&self) -> Vec<StoreSummary> {
        std::iter::once(&self.primary).chain(&self.secondaries).map(StoreHandle::summary).collect()
    }
}
