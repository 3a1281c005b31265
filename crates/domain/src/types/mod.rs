//! Domain types and models

pub mod customer;
pub mod store;
pub mod sync;
pub mod tags;

pub use customer::{Customer, CustomerId, CustomerState, CustomerUpdate, NewCustomer};
pub use store::{StoreConfig, StoreRole, StoreSummary};
pub use sync::SyncResult;
pub use tags::TagSet;
