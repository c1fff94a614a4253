//! Response bodies for the payments API.
//!
//! Every successful body is a `{"data": ..., "links": {...}}` envelope:
//!
//! - [`PaymentResponse`] - A single payment
//! - [`PaymentsResponse`] - A window of the payment collection

pub mod links;

use serde::Serialize;

use crate::model::Payment;

pub use links::{LinkBuilder, Links};

/// Body of fetch, create and update responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    /// The payment.
    pub data: Payment,
    /// Link to the payment.
    pub links: Links,
}

impl PaymentResponse {
    /// Wraps a payment with its self link.
    pub fn new(data: Payment, links: &LinkBuilder) -> Self {
        let links = links.for_payment(&data.id);
        Self { data, links }
    }
}

/// Body of list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentsResponse {
    /// Payments in the served window.
    pub data: Vec<Payment>,
    /// Window navigation links.
    pub links: Links,
}
