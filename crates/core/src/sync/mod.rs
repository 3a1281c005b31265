//! Customer synchronization between the primary and secondary stores

pub mod matcher;
pub mod membership;
pub mod outcome;
pub mod reconciler;
pub mod service;
pub mod validation;
