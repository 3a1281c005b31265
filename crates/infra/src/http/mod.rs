//! HTTP transport shared by the store adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
