//! # ShopBridge Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for remote customer stores (traits)
//! - The store registry that materializes one handle per configured store
//! - Membership filtering, email matching and record reconciliation
//! - The sync orchestrator used by webhook handlers and the CLI
//!
//! ## Architecture Principles
//! - Only depends on `shopbridge-domain`
//! - No HTTP or environment access
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod store;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use store::ports::{CustomerStore, CustomerStoreFactory};
pub use store::registry::{StoreHandle, StoreRegistry};
pub use sync::matcher::find_by_email;
pub use sync::membership::MembershipFilter;
pub use sync::outcome::{
    CustomerDisableReport, CustomerStatus, CustomerSyncReport, SkipReason, StoreDisableOutcome,
    StoreReport, StoreSyncOutcome,
};
pub use sync::reconciler::{ReconcilePlan, Reconciler};
pub use sync::service::SyncService;
pub use sync::validation::{is_valid_email, validate_customer, ValidationFailure};
