//! HTTP request handlers for the payments API.
//!
//! - [`list`] - List a window of payments
//! - [`fetch`] - Read a payment by id
//! - [`create`] - Create a payment
//! - [`update`] - Update a payment at a known version
//! - [`delete`] - Soft-delete a payment at a known version
//! - [`health`] - Health check endpoint
//! - [`admin`] - Repository statistics and wipe

pub mod admin;
pub mod create;
pub mod delete;
pub mod fetch;
pub mod health;
pub mod list;
pub mod update;

// Re-export handlers for convenience
pub use admin::{repo_clear_handler, repo_info_handler};
pub use create::create_handler;
pub use delete::delete_handler;
pub use fetch::fetch_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use update::update_handler;
