//! Customer records
//!
//! Field names follow the commerce platform's REST representation
//! (`first_name`, `last_name`, comma-separated `tags`) so the same types can be
//! used for API payloads, webhook bodies and the HTTP surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tags::TagSet;
use crate::errors::ShopBridgeError;
use crate::impl_domain_status_conversions;

/// Store-local customer identifier.
///
/// Identifiers are only meaningful inside the store that issued them; records
/// are matched across stores by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u64);

impl CustomerId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The platform never issues id `0`; it marks an absent identifier.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = ShopBridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ShopBridgeError::InvalidInput(format!("Invalid customer id '{s}': {e}")))
    }
}

impl From<u64> for CustomerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Account lifecycle state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerState {
    Enabled,
    Disabled,
    Invited,
    Declined,
    #[serde(other)]
    Unknown,
}

impl_domain_status_conversions!(CustomerState {
    Enabled => "enabled",
    Disabled => "disabled",
    Invited => "invited",
    Declined => "declined",
    Unknown => "unknown",
});

/// Customer record read from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CustomerState>,
}

impl Customer {
    /// Minimal record, mostly useful for fixtures.
    #[must_use]
    pub fn new(id: impl Into<CustomerId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            first_name: None,
            last_name: None,
            tags: None,
            state: None,
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    #[must_use]
    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Parsed tag set (empty when the record carries no tags).
    #[must_use]
    pub fn tag_set(&self) -> TagSet {
        TagSet::from_optional(self.tags.as_deref())
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state == Some(CustomerState::Disabled)
    }
}

/// Body of a customer-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub tags: String,
    pub send_email_invite: bool,
}

/// Body of a customer-update call. Only populated fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CustomerState>,
}

impl CustomerUpdate {
    #[must_use]
    pub const fn new(id: CustomerId) -> Self {
        Self { id, first_name: None, last_name: None, tags: None, state: None }
    }

    #[must_use]
    pub fn with_names(mut self, first: Option<String>, last: Option<String>) -> Self {
        self.first_name = first;
        self.last_name = last;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: &TagSet) -> Self {
        self.tags = Some(tags.to_string());
        self
    }

    #[must_use]
    pub const fn with_state(mut self, state: CustomerState) -> Self {
        self.state = Some(state);
        self
    }
}
