//! Absolute links for payment resources.

use serde::Serialize;
use url::form_urlencoded;

use crate::extractors::ListWindow;

/// Builds links rooted at `{external_url}/{api_version}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Creates a builder for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Link to a single payment.
    pub fn payment(&self, id: &str) -> String {
        format!("{}/payments/{}", self.base_url, encode_segment(id))
    }

    /// Link to a window of the payment collection.
    pub fn payments(&self, from: usize, to: usize) -> String {
        format!("{}/payments?from={}&to={}", self.base_url, from, to)
    }

    /// Links for a single-payment response.
    pub fn for_payment(&self, id: &str) -> Links {
        Links {
            self_link: self.payment(id),
            next: None,
            prev: None,
        }
    }

    /// Links for a list response served over `window`.
    pub fn for_window(&self, window: &ListWindow) -> Links {
        let (self_from, self_to) = window.served();
        let (next_from, next_to) = window.next();
        Links {
            self_link: self.payments(self_from, self_to),
            next: Some(self.payments(next_from, next_to)),
            prev: window.prev().map(|(from, to)| self.payments(from, to)),
        }
    }
}

/// Percent-encodes `id` as a single path segment.
///
/// The form serializer writes a space as `+`, which a path does not decode.
fn encode_segment(id: &str) -> String {
    form_urlencoded::byte_serialize(id.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// The `links` object of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    /// The resource or window just returned.
    #[serde(rename = "self")]
    pub self_link: String,

    /// The following window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// The preceding window, absent on the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}
