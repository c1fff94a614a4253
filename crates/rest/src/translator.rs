//! Conversion between API payments and stored items.
//!
//! Attributes travel through the store as serialized JSON bytes. A stored
//! payload that no longer parses is a [`TranslationError`], distinct from
//! both storage failures and client validation errors.

use payments_persistence::StoredItem;
use thiserror::Error;

use crate::model::{PAYMENT_TYPE, Payment, PaymentAttributes};

/// Failure converting between [`Payment`] and [`StoredItem`].
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Attributes could not be serialized for storage.
    #[error("unable to serialize attributes of payment {id}")]
    Serialize {
        /// Payment id.
        id: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A stored payload is not valid attribute JSON.
    #[error("stored attributes of payment {id} are malformed")]
    Deserialize {
        /// Payment id.
        id: String,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
}

/// Converts a payment into the item the store persists.
pub fn to_stored(payment: &Payment) -> Result<StoredItem, TranslationError> {
    let attributes =
        serde_json::to_vec(&payment.attributes).map_err(|source| TranslationError::Serialize {
            id: payment.id.clone(),
            source,
        })?;

    Ok(StoredItem {
        id: payment.id.clone(),
        version: payment.version,
        organisation: payment.organisation.clone(),
        attributes,
    })
}

/// Converts a stored item back into a payment. An empty payload yields empty
/// attributes.
pub fn from_stored(item: StoredItem) -> Result<Payment, TranslationError> {
    let attributes = if item.attributes.is_empty() {
        PaymentAttributes::default()
    } else {
        serde_json::from_slice(&item.attributes).map_err(|source| {
            TranslationError::Deserialize {
                id: item.id.clone(),
                source,
            }
        })?
    };

    Ok(Payment {
        id: item.id,
        kind: PAYMENT_TYPE.to_string(),
        version: item.version,
        organisation: item.organisation,
        attributes,
    })
}

/// Converts a page of stored items, failing on the first bad payload.
pub fn from_stored_all(items: Vec<StoredItem>) -> Result<Vec<Payment>, TranslationError> {
    items.into_iter().map(from_stored).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Payment {
        serde_json::from_value(json!({
            "id": "p1",
            "type": "Payment",
            "version": 3,
            "organisation_id": "org1",
            "attributes": {"amount": "10.00", "beneficiary_party": {"name": "W Owens"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_to_stored_keeps_fields() {
        let item = to_stored(&sample()).unwrap();
        assert_eq!(item.id, "p1");
        assert_eq!(item.version, 3);
        assert_eq!(item.organisation, "org1");

        let attrs: serde_json::Value = serde_json::from_slice(&item.attributes).unwrap();
        assert_eq!(attrs["amount"], "10.00");
        assert_eq!(attrs["beneficiary_party"]["name"], "W Owens");
    }

    #[test]
    fn test_round_trip() {
        let original = sample();
        let back = from_stored(to_stored(&original).unwrap()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_from_stored_sets_type() {
        let item = StoredItem::new("p9", "org1", br#"{"amount":"1"}"#.to_vec());
        let payment = from_stored(item).unwrap();
        assert_eq!(payment.kind, "Payment");
    }

    #[test]
    fn test_empty_payload_is_empty_attributes() {
        let payment = from_stored(StoredItem::new("p1", "org1", Vec::new())).unwrap();
        assert_eq!(payment.attributes, PaymentAttributes::default());
    }

    #[test]
    fn test_malformed_payload() {
        let err = from_stored(StoredItem::new("p1", "org1", b"{not json".to_vec())).unwrap_err();
        assert!(matches!(err, TranslationError::Deserialize { ref id, .. } if id == "p1"));
    }

    #[test]
    fn test_from_stored_all_fails_fast() {
        let items = vec![
            StoredItem::new("p1", "org1", Vec::new()),
            StoredItem::new("p2", "org1", b"[".to_vec()),
        ];
        assert!(from_stored_all(items).is_err());
    }
}
