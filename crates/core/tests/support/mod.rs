//! Shared test helpers for `shopbridge-core` integration tests.
//!
//! In-memory store fakes that record every write, so sync tests can assert
//! on calls instead of log output.

#![allow(dead_code)]

pub mod stores;
