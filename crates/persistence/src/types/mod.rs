//! Core types for the persistence layer.

mod stored_item;

pub use stored_item::{StoreInfo, StoredItem};
