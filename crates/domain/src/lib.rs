//! # ShopBridge Domain
//!
//! Business domain types and models for ShopBridge.
//!
//! This crate contains:
//! - Customer records as exchanged with the commerce platform
//! - Tag-set semantics (parsing, union, case-insensitive lookup)
//! - Store and process configuration structures
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other ShopBridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
