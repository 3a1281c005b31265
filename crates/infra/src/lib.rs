//! # ShopBridge Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The retrying HTTP client
//! - The Shopify Admin REST adapter (`CustomerStore` implementation)
//! - Configuration loading from the environment and files
//! - Conversions from transport errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `shopbridge-core`
//! - Depends on `shopbridge-domain` and `shopbridge-core`
//! - Contains all "impure" code (network, environment, filesystem)

pub mod config;
pub mod errors;
pub mod http;
pub mod shopify;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use shopify::{ShopifyClient, ShopifyStoreFactory};
