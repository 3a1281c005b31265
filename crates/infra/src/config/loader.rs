//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the primary store is not configured there, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Either way the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `STORES`: Comma-separated store keys (default `A,B`)
//! - `PRIMARY_STORE`: Key of the primary store (default `A`)
//! - `STORE_<KEY>_DOMAIN` / `STORE_<KEY>_TOKEN`: Per-store credentials
//! - `MEMBER_TAG`: Comma-separated membership tags (default `member`)
//! - `SHOPIFY_API_VERSION`: Admin API version (default `2025-01`)
//! - `SHOPIFY_TIMEOUT_MS`: Request timeout in milliseconds (default `15000`)
//! - `USER_AGENT`: User-Agent header (default `shopify-bridge/1.0`)
//! - `MAX_RETRIES`: Total attempts per request (default `3`)
//! - `PORT`: Webhook listener port (default `4000`)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./shopbridge.{json,toml}` (current working directory)
//! 2. The same names in the parent and grandparent directories
//! 3. Relative to executable location
//!
//! A generic `config.{json,toml}` in those directories is used only when no
//! `shopbridge.*` file exists anywhere, and a warning is logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use shopbridge_domain::constants::{
    DEFAULT_API_VERSION, DEFAULT_MAX_ATTEMPTS, DEFAULT_MEMBER_TAG, DEFAULT_PRIMARY_STORE,
    DEFAULT_SERVER_PORT, DEFAULT_STORE_KEYS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use shopbridge_domain::{
    normalize_store_key, ApiConfig, Config, Result, ServerConfig, ShopBridgeError,
    StoreCredentials,
};

const CONFIG_FILE_NAMES: [&str; 2] = ["shopbridge.json", "shopbridge.toml"];
/// Accepted only when no `shopbridge.*` file exists in any searched directory.
const GENERIC_CONFIG_FILE_NAMES: [&str; 2] = ["config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If that fails, falls
/// back to a config file; when no file exists the environment error is
/// returned, since it names the missing variables.
///
/// # Errors
/// Returns `ShopBridgeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The primary store is not configured
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(env_err) => {
            tracing::debug!(error = ?env_err, "Failed to load from environment, trying file");
            match search_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => Err(env_err),
            }
        }
    }
}

/// Load configuration from environment variables
///
/// Every variable has a default except the per-store credentials.
///
/// # Errors
/// Returns `ShopBridgeError::Config` if a numeric variable cannot be parsed
/// or the primary store lacks a domain/token pair.
pub fn load_from_env() -> Result<Config> {
    let mut store_keys: Vec<String> = Vec::new();
    for key in env_or("STORES", DEFAULT_STORE_KEYS).split(',').map(normalize_store_key) {
        if !key.is_empty() && !store_keys.contains(&key) {
            store_keys.push(key);
        }
    }
    let primary_store = normalize_store_key(&env_or("PRIMARY_STORE", DEFAULT_PRIMARY_STORE));

    let mut stores = BTreeMap::new();
    for key in &store_keys {
        let domain = env_opt(&format!("STORE_{key}_DOMAIN"));
        let token = env_opt(&format!("STORE_{key}_TOKEN"));
        if let (Some(domain), Some(access_token)) = (domain, token) {
            stores.insert(key.clone(), StoreCredentials { domain, access_token });
        }
    }

    let member_tags = vec![env_or("MEMBER_TAG", DEFAULT_MEMBER_TAG)];

    let api = ApiConfig {
        api_version: env_or("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
        timeout_ms: env_parse("SHOPIFY_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
        user_agent: env_or("USER_AGENT", DEFAULT_USER_AGENT),
        max_attempts: env_parse::<usize>("MAX_RETRIES", DEFAULT_MAX_ATTEMPTS)?.max(1),
    };
    let server = ServerConfig { port: env_parse("PORT", DEFAULT_SERVER_PORT)? };

    let config = Config { store_keys, primary_store, stores, member_tags, api, server };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`search_config_paths`].
///
/// # Errors
/// Returns `ShopBridgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The primary store is not configured
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShopBridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => search_config_paths().ok_or_else(|| {
            ShopBridgeError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ShopBridgeError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ShopBridgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ShopBridgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ShopBridgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, then the
/// executable's directory and its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn search_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    find_config_in(&roots)
}

/// `shopbridge.*` anywhere under `roots` wins over a generic `config.*`.
fn find_config_in(roots: &[PathBuf]) -> Option<PathBuf> {
    let first_existing = |names: &'static [&'static str]| {
        roots
            .iter()
            .flat_map(|root| names.iter().map(move |name| root.join(name)))
            .find(|path| path.exists())
    };

    first_existing(&CONFIG_FILE_NAMES[..]).or_else(|| {
        let path = first_existing(&GENERIC_CONFIG_FILE_NAMES[..])?;
        tracing::warn!(
            path = %path.display(),
            "using generic config file name; rename it to shopbridge.json or shopbridge.toml"
        );
        Some(path)
    })
}

/// Non-blank environment variable, trimmed.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, using `default` when it is unset or blank.
///
/// # Errors
/// Returns `ShopBridgeError::Config` if the value does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ShopBridgeError::Config(format!("Invalid {key} '{raw}': {e}"))),
        None => Ok(default),
    }
}
