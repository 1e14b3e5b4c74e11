//! REST transport layer for the budgeting backend.
//!
//! This module provides the `Transport` seam (the raw `send`/`send_binary`
//! contract), the reqwest-backed `ApiClient`, and the typed `Gateway`
//! that knows the server's routes and parses responses into models.
//!
//! Requests carry a per-session authority token header when one is
//! available; a missing token downgrades to an unauthenticated request
//! with a logged warning instead of blocking the call.

pub mod client;
pub mod error;
pub mod gateway;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ApiClient, Transport};
pub use error::ApiError;
pub use gateway::Gateway;
