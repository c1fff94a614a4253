//! Payment request bodies for REST API tests.

use serde_json::{Value, json};

/// Organisation used by every fixture unless a test says otherwise.
pub const ORG: &str = "743d5b63-8e6f-432e-a8fa-c5d8d2ee5fcb";

/// A create body for payment `id` with the given amount.
pub fn payment(id: &str, amount: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "type": "Payment",
            "organisation_id": ORG,
            "attributes": {
                "amount": amount,
                "currency": "GBP",
                "beneficiary_party": {"name": "W Owens", "account_number": "31926819"}
            }
        }
    })
}

/// An update body for payment `id`, expected to be at `version`.
pub fn payment_at(id: &str, version: i64, amount: &str) -> Value {
    let mut body = payment(id, amount);
    body["data"]["version"] = json!(version);
    body
}
