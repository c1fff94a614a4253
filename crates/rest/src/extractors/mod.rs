//! Axum extractors for payment requests.
//!
//! - [`PaymentBody`] - Extract the payment from a request body
//! - [`ListWindow`] - Resolve `from`/`to` into a bounded window
//! - [`ExpectedVersion`] - Extract the `version` of a delete

mod payment_body;
mod range;

pub use payment_body::{PaymentBody, PaymentBodyRejection};
pub use range::{ExpectedVersion, ListQuery, ListWindow};
