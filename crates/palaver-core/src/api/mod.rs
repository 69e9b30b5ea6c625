//! REST gateway module for the platform API.
//!
//! `ApiClient` is the sole egress point for network I/O; pages and
//! commands never talk to the server directly. The platform authenticates
//! with a per-agent API key sent on every request, and a 401 anywhere
//! flips the whole client into the logged-out state.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
