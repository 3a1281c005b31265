//! # ShopBridge Application
//!
//! Wires configuration, store clients and the sync service into the webhook
//! server (`shopbridge`) and the manual sync CLI (`shopbridge-sync`).

pub mod commands;
pub mod context;
pub mod utils;

pub use commands::build_router;
pub use context::AppContext;
