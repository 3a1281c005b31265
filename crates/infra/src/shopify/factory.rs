//! `CustomerStoreFactory` backed by `ShopifyClient`

use std::sync::Arc;

use shopbridge_core::{CustomerStore, CustomerStoreFactory};
use shopbridge_domain::{ApiConfig, Result};

use super::client::ShopifyClient;

/// Builds one Admin API client per store, sharing transport settings.
#[derive(Debug, Clone, Default)]
pub struct ShopifyStoreFactory {
    api: ApiConfig,
}

impl ShopifyStoreFactory {
    pub fn new(api: ApiConfig) -> Self {
        Self { api }
    }
}

impl CustomerStoreFactory for ShopifyStoreFactory {
    fn client_for(&self, domain: &str, access_token: &str) -> Result<Arc<dyn CustomerStore>> {
        Ok(Arc::new(ShopifyClient::new(domain, access_token, &self.api)?))
    }
}
