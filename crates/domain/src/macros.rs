//! Macro for implementing Display and FromStr for label enums
//!
//! Several domain enums (store roles, customer states) travel as lowercase
//! strings in configuration, logs and the commerce platform's JSON. This macro
//! keeps their `Display`/`FromStr` pairs in one place.
//!
//! # Example
//!
//! ```rust
//! use shopbridge_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Webhook,
//!     Manual,
//! }
//!
//! impl_domain_status_conversions!(Channel {
//!     Webhook => "webhook",
//!     Manual => "manual",
//! });
//!
//! assert_eq!(Channel::Webhook.to_string(), "webhook");
//! assert_eq!("MANUAL".parse::<Channel>().unwrap(), Channel::Manual);
//! ```

/// Implements Display and FromStr traits for label enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "DISABLED", "disabled", "Disabled" all work)
/// - Consistent lowercase string output
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Trigger {
        Create,
        Update,
        Delete,
    }

    impl_domain_status_conversions!(Trigger {
        Create => "create",
        Update => "update",
        Delete => "delete",
    });

    #[test]
    fn displays_lowercase_label() {
        assert_eq!(Trigger::Create.to_string(), "create");
        assert_eq!(Trigger::Delete.to_string(), "delete");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Trigger::from_str("update").unwrap(), Trigger::Update);
        assert_eq!(Trigger::from_str("UPDATE").unwrap(), Trigger::Update);
        assert_eq!(Trigger::from_str("DeLeTe").unwrap(), Trigger::Delete);
    }

    #[test]
    fn rejects_unknown_label() {
        let err = Trigger::from_str("merge").unwrap_err();
        assert!(err.contains("Invalid Trigger: merge"));
        assert!(Trigger::from_str("").is_err());
    }
}
