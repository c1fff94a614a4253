//! Payment body extractor.
//!
//! Extracts the `{"data": {...}}` envelope from request bodies.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

use crate::error::RestError;
use crate::model::{Payment, PaymentRequest};

/// Axum extractor for the payment carried in a request body.
///
/// Only checks that the body is a well-formed envelope; field validation is
/// left to [`Payment::validate`].
///
/// # Example
///
/// ```rust,ignore
/// use payments_rest::extractors::PaymentBody;
///
/// async fn create_handler(PaymentBody(payment): PaymentBody) {
///     println!("Creating payment {}", payment.id);
/// }
/// ```
#[derive(Debug)]
pub struct PaymentBody(pub Payment);

impl PaymentBody {
    /// Consumes the extractor and returns the payment.
    pub fn into_inner(self) -> Payment {
        self.0
    }
}

/// Error type for payment body extraction failures.
#[derive(Debug)]
pub enum PaymentBodyRejection {
    /// The body could not be read.
    Unreadable(String),
    /// The body is not a payment envelope.
    InvalidJson(String),
}

impl IntoResponse for PaymentBodyRejection {
    fn into_response(self) -> Response {
        let error = match self {
            PaymentBodyRejection::Unreadable(msg) => {
                RestError::bad_request(format!("Unreadable body: {}", msg))
            }
            PaymentBodyRejection::InvalidJson(msg) => {
                RestError::bad_request(format!("Invalid JSON: {}", msg))
            }
        };
        error.into_response()
    }
}

impl<S> FromRequest<S> for PaymentBody
where
    S: Send + Sync,
{
    type Rejection = PaymentBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| PaymentBodyRejection::Unreadable(e.to_string()))?;

        let request: PaymentRequest = serde_json::from_slice(&bytes)
            .map_err(|e| PaymentBodyRejection::InvalidJson(e.to_string()))?;

        Ok(PaymentBody(request.data))
    }
}
