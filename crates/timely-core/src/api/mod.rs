//! REST resource client.
//!
//! A generic CRUD client over the remote resource store. Every entity
//! family (`/entries`, `/tasks`, ...) is addressed through the
//! [`Resource`] trait; requests carry the bearer token when one is set.
//! Failures are returned to the caller, never retried.

pub mod auth;
pub mod client;
pub mod resource;

pub use auth::TOKEN_KEY;
pub use client::ApiClient;
pub use resource::Resource;
