//! The payment resource as seen by API clients.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The only accepted value of a payment's `type` field.
pub const PAYMENT_TYPE: &str = "Payment";

/// A payment.
///
/// Only `amount` is interpreted; every other attribute is carried through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Client-chosen identifier.
    #[serde(default)]
    pub id: String,

    /// Resource type, always `"Payment"`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Version the client last saw. Ignored on create.
    #[serde(default)]
    pub version: i64,

    /// Owning organisation.
    #[serde(rename = "organisation_id", default)]
    pub organisation: String,

    /// Payment attributes.
    #[serde(default)]
    pub attributes: PaymentAttributes,
}

/// Attributes of a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttributes {
    /// Amount as sent by the client: a decimal string, or a JSON number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,

    /// Everything else, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reasons a payment is rejected before reaching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank or missing id.
    #[error("id is empty")]
    MissingId,

    /// `type` is not `"Payment"`.
    #[error("invalid type: {0:?}")]
    InvalidType(String),

    /// Blank or missing organisation.
    #[error("organisation is empty")]
    MissingOrganisation,

    /// No amount attribute.
    #[error("amount is missing")]
    MissingAmount,

    /// Amount is not a decimal.
    #[error("invalid payment amount: {0}")]
    InvalidAmount(String),

    /// Amount is zero or negative.
    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(String),
}

impl Payment {
    /// Checks the fields the service relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }

        if self.kind != PAYMENT_TYPE {
            return Err(ValidationError::InvalidType(self.kind.clone()));
        }

        if self.organisation.trim().is_empty() {
            return Err(ValidationError::MissingOrganisation);
        }

        self.attributes.validate()
    }
}

impl PaymentAttributes {
    /// Checks that `amount` is a decimal greater than zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let raw = match &self.amount {
            None | Some(Value::Null) => return Err(ValidationError::MissingAmount),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(ValidationError::InvalidAmount(other.to_string())),
        };

        let amount = Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| ValidationError::InvalidAmount(raw.clone()))?;

        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(raw));
        }

        Ok(())
    }
}

/// Request body wrapping a single payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    /// The payment.
    pub data: Payment,
}
