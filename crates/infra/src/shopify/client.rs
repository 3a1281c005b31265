//! Per-store Admin API client

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shopbridge_core::CustomerStore;
use shopbridge_domain::constants::{ACCESS_TOKEN_HEADER, MAX_PAGE_LIMIT};
use shopbridge_domain::{
    ApiConfig, Customer, CustomerId, CustomerUpdate, NewCustomer, Result, ShopBridgeError,
};
use tracing::debug;
use url::Url;

use super::types::{CustomerBody, CustomerEnvelope, CustomersEnvelope};
use crate::errors::status_error;
use crate::http::{HttpClient, HttpClientBuilder};

/// Resolve the origin for a store domain.
///
/// Bare shop domains get `https://`; a value that already carries a scheme is
/// used as-is (local proxies, test servers).
///
/// # Errors
/// Returns `ShopBridgeError::Config` if the result is not a valid URL.
pub fn store_origin(domain: &str) -> Result<Url> {
    let domain = domain.trim();
    let candidate =
        if domain.contains("://") { domain.to_string() } else { format!("https://{domain}") };

    let url = Url::parse(&candidate)
        .map_err(|e| ShopBridgeError::Config(format!("invalid store domain '{domain}': {e}")))?;
    if url.host_str().is_none() {
        return Err(ShopBridgeError::Config(format!("store domain '{domain}' has no host")));
    }
    Ok(url)
}

/// Admin REST client bound to one store and access token.
#[derive(Clone)]
pub struct ShopifyClient {
    base_url: String,
    http: HttpClient,
}

impl fmt::Debug for ShopifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ShopifyClient {
    /// Build a client. No network I/O happens here.
    ///
    /// # Errors
    /// Returns `ShopBridgeError::Config` for an unusable domain or token.
    pub fn new(domain: &str, access_token: &str, api: &ApiConfig) -> Result<Self> {
        let origin = store_origin(domain)?;
        let base_url = format!(
            "{}/admin/api/{}",
            origin.as_str().trim_end_matches('/'),
            api.api_version.trim()
        );

        let mut token = HeaderValue::from_str(access_token.trim()).map_err(|_| {
            ShopBridgeError::Config(format!(
                "access token for {domain} is not a valid header value"
            ))
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let token_header = HeaderName::from_bytes(ACCESS_TOKEN_HEADER.as_bytes())
            .map_err(|e| ShopBridgeError::Internal(format!("invalid token header name: {e}")))?;
        headers.insert(token_header, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClientBuilder::from_api(api).default_headers(headers).build()?;

        Ok(Self { base_url, http })
    }

    /// `<origin>/admin/api/<version>`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.http.send(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ShopBridgeError::Internal(format!("unexpected response body: {e}")))
    }
}

#[async_trait]
impl CustomerStore for ShopifyClient {
    async fn get_customer(&self, id: CustomerId) -> Result<Customer> {
        let url = self.endpoint(&format!("customers/{id}.json"));
        debug!(%url, "fetching customer");
        let envelope: CustomerEnvelope = self.execute(self.http.request(Method::GET, &url)).await?;
        Ok(envelope.customer)
    }

    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>> {
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let url = self.endpoint("customers.json");
        debug!(%url, limit, "listing customers");
        let envelope: CustomersEnvelope = self
            .execute(self.http.request(Method::GET, &url).query(&[("limit", limit)]))
            .await?;
        Ok(envelope.customers)
    }

    async fn search_by_email(&self, email: &str) -> Result<Vec<Customer>> {
        let url = self.endpoint("customers/search.json");
        let query = format!("email:{}", email.trim());
        debug!(%url, %query, "searching customers");
        let envelope: CustomersEnvelope = self
            .execute(self.http.request(Method::GET, &url).query(&[("query", query.as_str())]))
            .await?;
        Ok(envelope.customers)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let url = self.endpoint("customers.json");
        let envelope: CustomerEnvelope = self
            .execute(self.http.request(Method::POST, &url).json(&CustomerBody { customer }))
            .await?;
        Ok(envelope.customer)
    }

    async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer> {
        let url = self.endpoint(&format!("customers/{}.json", update.id));
        let envelope: CustomerEnvelope = self
            .execute(self.http.request(Method::PUT, &url).json(&CustomerBody { customer: update }))
            .await?;
        Ok(envelope.customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domains_use_https() {
        let origin = store_origin("shop-a.myshopify.com").unwrap();
        assert_eq!(origin.as_str(), "https://shop-a.myshopify.com/");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let origin = store_origin("http://127.0.0.1:8080/").unwrap();
        assert_eq!(origin.scheme(), "http");
        assert_eq!(origin.port(), Some(8080));
    }

    #[test]
    fn invalid_domain_is_a_config_error() {
        assert!(matches!(store_origin("http://"), Err(ShopBridgeError::Config(_))));
    }

    #[test]
    fn base_url_includes_api_version() {
        let client =
            ShopifyClient::new("shop-a.myshopify.com", "shpat_123", &ApiConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://shop-a.myshopify.com/admin/api/2025-01");
        assert_eq!(
            client.endpoint("/customers.json"),
            "https://shop-a.myshopify.com/admin/api/2025-01/customers.json"
        );
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = ShopifyClient::new("shop.myshopify.com", "bad\ntoken", &ApiConfig::default())
            .unwrap_err();
        assert!(matches!(err, ShopBridgeError::Config(_)));
    }

    #[test]
    fn debug_output_hides_token() {
        let client =
            ShopifyClient::new("shop.myshopify.com", "shpat_secret", &ApiConfig::default()).unwrap();
        assert!(!format!("{client:?}").contains("shpat_secret"));
    }
}
