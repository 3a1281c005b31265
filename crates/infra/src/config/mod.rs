//! Configuration loading
//!
//! Resolves a validated `Config` from the environment or a JSON/TOML file.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, search_config_paths};
