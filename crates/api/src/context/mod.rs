//! Application context - dependency injection container

use std::sync::Arc;

use shopbridge_core::{CustomerStoreFactory, SyncService};
use shopbridge_domain::{Config, Result};
use shopbridge_infra::ShopifyStoreFactory;
use tracing::info;

use crate::utils::health::HealthReport;

/// Application context - holds the validated configuration and the sync
/// service shared by every route and the CLI.
pub struct AppContext {
    pub config: Config,
    pub sync: Arc<SyncService>,
}

impl AppContext {
    /// Build the context against the Shopify Admin API.
    ///
    /// # Errors
    /// Fails when the configuration is invalid (primary store missing) or a
    /// store client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let factory = ShopifyStoreFactory::new(config.api.clone());
        Self::with_factory(config, &factory)
    }

    /// Build the context with a caller-supplied store factory.
    ///
    /// # Errors
    /// Same as [`AppContext::new`].
    pub fn with_factory(config: Config, factory: &dyn CustomerStoreFactory) -> Result<Self> {
        config.validate()?;
        let sync = SyncService::from_config(&config, factory)?;

        info!(
            primary = %config.primary_store,
            secondaries = sync.registry().secondaries().len(),
            member_tags = ?config.required_tags(),
            "application context ready"
        );

        Ok(Self { config, sync: Arc::new(sync) })
    }

    /// Re-validate configuration and describe the stores the service writes to.
    pub fn health_check(&self) -> HealthReport {
        match self.config.validate() {
            Ok(()) => HealthReport::healthy(self.sync.registry().summaries()),
            Err(err) => HealthReport::unhealthy(err.to_string()),
        }
    }
}
