//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Store selection defaults
pub const DEFAULT_STORE_KEYS: &str = "A,B";
pub const DEFAULT_PRIMARY_STORE: &str = "A";

// Membership
pub const DEFAULT_MEMBER_TAG: &str = "member";
/// Tag appended to a secondary record when it is disabled after an upstream
/// deletion.
pub const DISABLED_PROVENANCE_TAG: &str = "deleted-from-primary";

// Commerce platform API
pub const DEFAULT_API_VERSION: &str = "2025-01";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const MIN_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_USER_AGENT: &str = "shopify-bridge/1.0";
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

// Customer listing
pub const DEFAULT_BULK_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 250;

// HTTP surface
pub const DEFAULT_SERVER_PORT: u16 = 4000;
