//! Authentication state for the client.
//!
//! This module provides:
//! - `CredentialStore`: durable storage for the single API key
//! - `AuthEventBus`: process-wide broadcast of credential invalidation
//! - `RouteGuard`: the state machine that demotes protected views when
//!   the broadcast fires
//!
//! The key persists across runs; it is destroyed by logout or by the
//! gateway when the server answers 401.

pub mod credentials;
pub mod events;
pub mod guard;

pub use credentials::CredentialStore;
pub use events::{AuthEvent, AuthEventBus, Subscription};
pub use guard::{GuardState, Navigator, RouteGuard};
