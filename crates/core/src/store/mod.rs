//! Remote store access: ports and the per-process handle registry

pub mod ports;
pub mod registry;
