//! Process configuration
//!
//! A `Config` is resolved once at startup (see `shopbridge-infra`'s loader)
//! and passed by reference to everything that needs it. Nothing in the core
//! reads the environment directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_MAX_ATTEMPTS, DEFAULT_MEMBER_TAG, DEFAULT_PRIMARY_STORE,
    DEFAULT_SERVER_PORT, DEFAULT_STORE_KEYS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
    MIN_TIMEOUT_MS,
};
use crate::errors::{Result, ShopBridgeError};
use crate::types::{StoreConfig, StoreRole};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Declared store keys in processing order.
    #[serde(default = "default_store_keys")]
    pub store_keys: Vec<String>,
    #[serde(default = "default_primary_store")]
    pub primary_store: String,
    /// Credentials by store key. Keys without an entry here are declared but
    /// unconfigured.
    #[serde(default)]
    pub stores: BTreeMap<String, StoreCredentials>,
    /// Required membership tags, lowercased.
    #[serde(default = "default_member_tags")]
    pub member_tags: Vec<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Domain/token pair for a single store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCredentials {
    pub domain: String,
    pub access_token: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("domain", &self.domain)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl StoreCredentials {
    fn is_complete(&self) -> bool {
        !self.domain.trim().is_empty() && !self.access_token.trim().is_empty()
    }
}

/// Commerce platform API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_version: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Total attempts per request (initial try + retries).
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ApiConfig {
    /// Timeout with the lower bound applied.
    #[must_use]
    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms.max(MIN_TIMEOUT_MS)
    }
}

/// Webhook listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_SERVER_PORT }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_keys: default_store_keys(),
            primary_store: default_primary_store(),
            stores: BTreeMap::new(),
            member_tags: default_member_tags(),
            api: ApiConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Stores that are both declared and fully configured, in declaration
    /// order.
    #[must_use]
    pub fn configured_stores(&self) -> Vec<StoreConfig> {
        let primary = normalize_store_key(&self.primary_store);
        self.declared_keys()
            .into_iter()
            .filter_map(|key| {
                let credentials = self.credentials_for(&key)?;
                if !credentials.is_complete() {
                    return None;
                }
                let role =
                    if key == primary { StoreRole::Primary } else { StoreRole::Secondary };
                Some(StoreConfig {
                    domain: credentials.domain.trim().to_string(),
                    access_token: credentials.access_token.trim().to_string(),
                    key,
                    role,
                })
            })
            .collect()
    }

    /// The primary store.
    ///
    /// # Errors
    /// Returns `ShopBridgeError::Config` when the primary store is not declared
    /// or lacks a domain/token pair.
    pub fn primary(&self) -> Result<StoreConfig> {
        self.validate()?;
        self.configured_stores()
            .into_iter()
            .find(|store| store.role == StoreRole::Primary)
            .ok_or_else(|| self.primary_unconfigured())
    }

    /// Every configured store except the primary.
    #[must_use]
    pub fn secondaries(&self) -> Vec<StoreConfig> {
        self.configured_stores()
            .into_iter()
            .filter(|store| store.role == StoreRole::Secondary)
            .collect()
    }

    /// Lowercased, de-blanked membership tags.
    #[must_use]
    pub fn required_tags(&self) -> Vec<String> {
        self.member_tags
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Normalized store keys in declaration order. Blank keys are dropped and
    /// a key repeated under any casing is kept once, at its first position.
    #[must_use]
    pub fn declared_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(self.store_keys.len());
        for key in self.store_keys.iter().map(|key| normalize_store_key(key)) {
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Check that the primary store is declared and configured.
    ///
    /// # Errors
    /// Returns `ShopBridgeError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let primary = normalize_store_key(&self.primary_store);
        let declared = self.declared_keys();

        if !declared.contains(&primary) {
            return Err(ShopBridgeError::Config(format!(
                "PRIMARY_STORE ({}) must be one of STORES: {}",
                primary,
                declared.join(",")
            )));
        }

        match self.credentials_for(&primary) {
            Some(credentials) if credentials.is_complete() => Ok(()),
            _ => Err(self.primary_unconfigured()),
        }
    }

    fn credentials_for(&self, key: &str) -> Option<&StoreCredentials> {
        self.stores.get(key).or_else(|| {
            self.stores
                .iter()
                .find(|(candidate, _)| normalize_store_key(candidate) == key)
                .map(|(_, credentials)| credentials)
        })
    }

    fn primary_unconfigured(&self) -> ShopBridgeError {
        let primary = normalize_store_key(&self.primary_store);
        ShopBridgeError::Config(format!(
            "Primary store {primary} is not configured. Ensure STORE_{primary}_DOMAIN and \
             STORE_{primary}_TOKEN are set."
        ))
    }
}

/// Store keys are compared trimmed and upper-cased.
#[must_use]
pub fn normalize_store_key(key: &str) -> String {
    key.trim().to_uppercase()
}

fn default_store_keys() -> Vec<String> {
    DEFAULT_STORE_KEYS.split(',').map(normalize_store_key).collect()
}

fn default_primary_store() -> String {
    DEFAULT_PRIMARY_STORE.to_string()
}

fn default_member_tags() -> Vec<String> {
    vec![DEFAULT_MEMBER_TAG.to_string()]
}
