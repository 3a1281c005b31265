//! Shopify Admin REST adapter for the `CustomerStore` port

pub mod client;
pub mod factory;
pub mod types;

pub use client::{store_origin, ShopifyClient};
pub use factory::ShopifyStoreFactory;
