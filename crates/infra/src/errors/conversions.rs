//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reqwest::StatusCode;
use shopbridge_domain::ShopBridgeError;

/// Longest response body excerpt carried in an error message.
const BODY_EXCERPT_LIMIT: usize = 300;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ShopBridgeError);

impl From<InfraError> for ShopBridgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ShopBridgeError> for InfraError {
    fn from(value: ShopBridgeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoShopBridgeError {
    fn into_shopbridge(self) -> ShopBridgeError;
}

/* -------------------------------------------------------------------------- */
/* HTTP status → ShopBridgeError */
/* -------------------------------------------------------------------------- */

fn classify_status(status: StatusCode, message: String) -> ShopBridgeError {
    match status.as_u16() {
        401 | 403 => ShopBridgeError::Auth(message),
        404 => ShopBridgeError::NotFound(message),
        429 => ShopBridgeError::RateLimited(message),
        400..=499 => ShopBridgeError::InvalidInput(message),
        _ => ShopBridgeError::Network(message),
    }
}

fn status_line(status: StatusCode) -> String {
    format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or("unknown status"))
}

/// Build the domain error for a non-success response.
///
/// The message carries the status line and, when present, a trimmed excerpt
/// of the response body (the platform puts validation details there).
pub fn status_error(status: StatusCode, body: &str) -> ShopBridgeError {
    let mut message = status_line(status);

    let body = body.trim();
    if !body.is_empty() {
        let excerpt: String = body.chars().take(BODY_EXCERPT_LIMIT).collect();
        message.push_str(": ");
        message.push_str(&excerpt);
        if body.chars().count() > BODY_EXCERPT_LIMIT {
            message.push('…');
        }
    }

    classify_status(status, message)
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ShopBridgeError */
/* -------------------------------------------------------------------------- */

impl IntoShopBridgeError for HttpError {
    fn into_shopbridge(self) -> ShopBridgeError {
        if self.is_timeout() {
            return ShopBridgeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ShopBridgeError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return ShopBridgeError::Internal(format!("invalid HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return classify_status(status, status_line(status));
        }

        if self.is_builder() {
            return ShopBridgeError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        ShopBridgeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_shopbridge())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
