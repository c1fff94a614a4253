//! Route configuration for the payments API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod payment_routes;

pub use payment_routes::create_routes;
