//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test servers over in-memory SQLite
//! - [`fixtures`] - Payment request bodies

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
