//! Customer validation ahead of synchronization

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use shopbridge_domain::Customer;

lazy_static! {
    static ref EMAIL_SHAPE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

/// Why a primary-store record cannot be synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    MissingId,
    MissingEmail,
    MalformedEmail(String),
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => f.write_str("customer has no id"),
            Self::MissingEmail => f.write_str("customer has no email"),
            Self::MalformedEmail(email) => write!(f, "invalid email: {email}"),
        }
    }
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Validate a record and return its email.
///
/// # Errors
/// Returns the first failing check.
pub fn validate_customer(customer: &Customer) -> Result<&str, ValidationFailure> {
    if customer.id.is_unset() {
        return Err(ValidationFailure::MissingId);
    }

    let email = customer
        .email
        .as_deref()
        .filter(|email| !email.trim().is_empty())
        .ok_or(ValidationFailure::MissingEmail)?;

    if !is_valid_email(email) {
        return Err(ValidationFailure::MalformedEmail(email.to_string()));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use shopbridge_domain::CustomerId;

    use super::*;

    #[test]
    fn accepts_basic_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@shop.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "plain", "a@x", "@x.com", "a b@x.com", "a@@x.com"] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn validate_returns_email() {
        let customer = Customer::new(1, "a@x.com");
        assert_eq!(validate_customer(&customer), Ok("a@x.com"));
    }

    #[test]
    fn validate_reports_each_failure() {
        let unset = Customer::new(CustomerId::new(0), "a@x.com");
        assert_eq!(validate_customer(&unset), Err(ValidationFailure::MissingId));

        let mut no_email = Customer::new(1, "");
        assert_eq!(validate_customer(&no_email), Err(ValidationFailure::MissingEmail));
        no_email.email = None;
        assert_eq!(validate_customer(&no_email), Err(ValidationFailure::MissingEmail));

        let malformed = Customer::new(1, "not-an-email");
        assert_eq!(
            validate_customer(&malformed),
            Err(ValidationFailure::MalformedEmail("not-an-email".into()))
        );
    }
}
