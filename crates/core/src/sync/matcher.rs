//! Customer matcher
//!
//! Cross-store identity is the email address. The platform's search endpoint
//! is token based and can return near matches, so results are narrowed to
//! records whose email equals the requested one (ignoring ASCII case).

use shopbridge_domain::{Customer, Result};
use tracing::{debug, warn};

use crate::store::registry::StoreHandle;

/// Find at most one customer in `store` with the given email.
///
/// When several records match, the first one returned by the store wins.
///
/// # Errors
/// Transport and API errors are returned unchanged; there is no retry here.
pub async fn find_by_email(store: &StoreHandle, email: &str) -> Result<Option<Customer>> {
    let results = store.client().search_by_email(email).await?;
    let returned = results.len();

    let mut matches = results.into_iter().filter(|candidate| {
        candidate
            .email
            .as_deref()
            .is_some_and(|found| found.trim().eq_ignore_ascii_case(email.trim()))
    });

    let first = matches.next();
    let extra = matches.count();

    if extra > 0 {
        warn!(
            store = %store.key(),
            email,
            matches = extra + 1,
            "multiple customers share this email; using the first result"
        );
    }
    if first.is_none() && returned > 0 {
        debug!(store = %store.key(), email, returned, "search returned only non-exact matches");
    }

    Ok(first)
}
