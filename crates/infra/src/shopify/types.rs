//! Admin REST request and response envelopes
//!
//! Every customer payload is wrapped in a `customer` (single) or `customers`
//! (list) key.

use serde::{Deserialize, Serialize};
use shopbridge_domain::Customer;

#[derive(Debug, Deserialize)]
pub struct CustomerEnvelope {
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub struct CustomersEnvelope {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// Outbound `{ "customer": ... }` body.
#[derive(Debug, Serialize)]
pub struct CustomerBody<'a, T: Serialize> {
    pub customer: &'a T,
}
