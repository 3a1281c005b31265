//! Port interfaces for remote customer stores
//!
//! These traits define the boundary between the sync logic and the commerce
//! platform's HTTP API. Implementations live in `shopbridge-infra`; tests use
//! in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use shopbridge_domain::{Customer, CustomerId, CustomerUpdate, NewCustomer, Result};

/// Customer operations offered by one store.
///
/// Implementations are stateless apart from connection pooling and may be
/// shared freely across tasks.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fetch a single customer. A missing record is `ShopBridgeError::NotFound`.
    async fn get_customer(&self, id: CustomerId) -> Result<Customer>;

    /// Fetch up to `limit` customers (single page).
    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>>;

    /// Search customers by exact email.
    async fn search_by_email(&self, email: &str) -> Result<Vec<Customer>>;

    /// Create a customer.
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer>;

    /// Apply a partial update to an existing customer.
    async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer>;
}

/// Builds authenticated store clients.
pub trait CustomerStoreFactory: Send + Sync {
    /// Construct a client for `domain` using `access_token`. Must not perform
    /// network I/O.
    fn client_for(&self, domain: &str, access_token: &str) -> Result<Arc<dyn CustomerStore>>;
}
