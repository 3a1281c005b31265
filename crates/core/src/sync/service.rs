//! Sync orchestrator - entry points used by webhook handlers and the CLI
//!
//! Every operation re-reads the primary store before acting. Per-store
//! failures are captured in the returned report and never abort sibling
//! stores or the surrounding bulk run.

use shopbridge_domain::{Config, Customer, CustomerId, Result, SyncResult};
use tracing::{debug, error, info, instrument, warn};

use super::matcher::find_by_email;
use super::membership::MembershipFilter;
use super::outcome::{
    CustomerDisableReport, CustomerStatus, CustomerSyncReport, StoreDisableOutcome, StoreReport,
    StoreSyncOutcome,
};
use super::reconciler::Reconciler;
use super::validation::validate_customer;
use crate::store::ports::CustomerStoreFactory;
use crate::store::registry::{StoreHandle, StoreRegistry};

/// Customer synchronization service
pub struct SyncService {
    registry: StoreRegistry,
    reconciler: Reconciler,
}

impl SyncService {
    pub fn new(registry: StoreRegistry, reconciler: Reconciler) -> Self {
        Self { registry, reconciler }
    }

    /// Build handles for every configured store and the membership rules.
    ///
    /// # Errors
    /// Fails when the primary store is not configured.
    pub fn from_config(config: &Config, factory: &dyn CustomerStoreFactory) -> Result<Self> {
        let registry = StoreRegistry::from_config(config, factory)?;
        let reconciler = Reconciler::new(MembershipFilter::from_config(config));
        Ok(Self::new(registry, reconciler))
    }

    pub const fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    pub const fn membership(&self) -> &MembershipFilter {
        self.reconciler.membership()
    }

    /// Membership pre-check on an untrusted tag string (e.g. a webhook body).
    pub fn is_member(&self, tags: Option<&str>) -> bool {
        self.membership().is_member(tags)
    }

    /// Mirror one primary customer into every secondary store.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn sync_customer(&self, id: CustomerId) -> CustomerSyncReport {
        if id.is_unset() {
            warn!("sync requested without a customer id");
            return CustomerSyncReport::rejected(
                id,
                None,
                CustomerStatus::Invalid("customer has no id".into()),
            );
        }

        let customer = match self.fetch_primary(id).await {
            Ok(customer) => customer,
            Err(err) => {
                error!(error = %err, "failed to fetch primary customer");
                return CustomerSyncReport::rejected(
                    id,
                    None,
                    CustomerStatus::FetchFailed(err.to_string()),
                );
            }
        };

        let email = match validate_customer(&customer) {
            Ok(email) => email.to_string(),
            Err(failure) => {
                warn!(reason = %failure, "skipping invalid customer");
                return CustomerSyncReport::rejected(
                    id,
                    customer.email.clone(),
                    CustomerStatus::Invalid(failure.to_string()),
                );
            }
        };

        let mut stores = Vec::with_capacity(self.registry.secondaries().len());
        for store in self.registry.secondaries() {
            let outcome = match self.sync_into(store, &customer, &email).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(store = %store.key(), email = %email, error = %err, "sync failed");
                    StoreSyncOutcome::Failed(err.to_string())
                }
            };
            stores.push(StoreReport { store: store.key().to_string(), outcome });
        }

        CustomerSyncReport {
            customer_id: id,
            email: Some(email),
            status: CustomerStatus::Processed,
            stores,
        }
    }

    /// Disable one customer in every secondary store where it exists.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn disable_customer(&self, id: CustomerId) -> CustomerDisableReport {
        if id.is_unset() {
            warn!("disable requested without a customer id");
            return CustomerDisableReport::rejected(
                id,
                None,
                CustomerStatus::Invalid("customer has no id".into()),
            );
        }

        // The primary record is often already gone when a delete event fires.
        let customer = match self.fetch_primary(id).await {
            Ok(customer) => customer,
            Err(err) => {
                warn!(error = %err, "could not fetch primary customer; nothing disabled");
                return CustomerDisableReport::rejected(
                    id,
                    None,
                    CustomerStatus::FetchFailed(err.to_string()),
                );
            }
        };

        let email = match validate_customer(&customer) {
            Ok(email) => email.to_string(),
            Err(failure) => {
                warn!(reason = %failure, "cannot disable customer without a usable email");
                return CustomerDisableReport::rejected(
                    id,
                    customer.email.clone(),
                    CustomerStatus::Invalid(failure.to_string()),
                );
            }
        };

        let mut stores = Vec::with_capacity(self.registry.secondaries().len());
        for store in self.registry.secondaries() {
            let outcome = match self.disable_in(store, &email).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(store = %store.key(), email = %email, error = %err, "disable failed");
                    StoreDisableOutcome::Failed(err.to_string())
                }
            };
            stores.push(StoreReport { store: store.key().to_string(), outcome });
        }

        CustomerDisableReport {
            customer_id: id,
            email: Some(email),
            status: CustomerStatus::Processed,
            stores,
        }
    }

    /// Sync every member among the first `limit` primary customers.
    ///
    /// # Errors
    /// Only the initial listing can fail the run; per-customer problems are
    /// reported through `SyncResult::synced`.
    #[instrument(skip(self))]
    pub async fn sync_members(&self, limit: u32) -> Result<Vec<SyncResult>> {
        let customers = self.fetch_primary_customers(limit).await?;
        let listed = customers.len();

        let mut results = Vec::new();
        for customer in customers.iter().filter(|c| self.is_member(c.tags.as_deref())) {
            let report = self.sync_customer(customer.id).await;
            results.push(SyncResult::for_customer(customer, report.is_success()));
        }

        info!(
            listed,
            members = results.len(),
            synced = results.iter().filter(|r| r.synced).count(),
            "bulk sync finished"
        );
        Ok(results)
    }

    /// List up to `limit` customers from the primary store. A zero limit
    /// returns nothing without calling the store.
    ///
    /// # Errors
    /// Propagates the store's error.
    pub async fn fetch_primary_customers(&self, limit: u32) -> Result<Vec<Customer>> {
        if limit == 0 {
            debug!("zero limit; primary store not queried");
            return Ok(Vec::new());
        }
        self.registry.primary().client().list_customers(limit).await
    }

    async fn fetch_primary(&self, id: CustomerId) -> Result<Customer> {
        self.registry.primary().client().get_customer(id).await
    }

    async fn sync_into(
        &self,
        store: &StoreHandle,
        customer: &Customer,
        email: &str,
    ) -> Result<StoreSyncOutcome> {
        let existing = find_by_email(store, email).await?;
        self.reconciler.reconcile(store, customer, existing.as_ref()).await
    }

    async fn disable_in(&self, store: &StoreHandle, email: &str) -> Result<StoreDisableOutcome> {
        match find_by_email(store, email).await? {
            Some(existing) => {
                self.reconciler.disable(store, &existing, email).await?;
                Ok(StoreDisableOutcome::Disabled)
            }
            None => {
                debug!(store = %store.key(), email, "customer not present; nothing to disable");
                Ok(StoreDisableOutcome::NotFound)
            }
        }
    }
}
