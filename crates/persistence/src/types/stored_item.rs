//! The unit persisted by an item store.

use serde::{Deserialize, Serialize};

/// A versioned item as held by the store.
///
/// The store never interprets `attributes`; it is an opaque serialized payload
/// owned by the caller. `version` starts at 0 and is bumped by exactly one on
/// every successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    /// Caller-supplied identifier, immutable after creation.
    pub id: String,

    /// Optimistic-lock token.
    pub version: i64,

    /// Free-form grouping attribute.
    pub organisation: String,

    /// Opaque payload bytes.
    #[serde(default)]
    pub attributes: Vec<u8>,
}

impl StoredItem {
    /// Creates an item at version 0.
    pub fn new(id: impl Into<String>, organisation: impl Into<String>, attributes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            version: 0,
            organisation: organisation.into(),
            attributes,
        }
    }

    /// Sets the version this item is expected to be at.
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }
}

/// Statistics reported by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    /// Number of non-deleted items.
    pub count: u64,
}
