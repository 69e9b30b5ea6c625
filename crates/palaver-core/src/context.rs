//! Process-scoped wiring of the client's shared services.

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiClient;
use crate::auth::{AuthEventBus, CredentialStore};
use crate::config::Config;

/// Everything the client shares across views: configuration, the
/// credential store, and the auth event bus.
///
/// Construct one per process - or one per test - and hand the pieces to
/// whoever needs them. Nothing here lives in module globals, so teardown
/// is dropping the context.
pub struct ClientContext {
    pub config: Config,
    pub credentials: Arc<CredentialStore>,
    pub auth_events: AuthEventBus,
}

impl ClientContext {
    pub fn new(config: Config) -> Self {
        let credentials = Arc::new(CredentialStore::new(config.home.clone()));
        Self {
            config,
            credentials,
            auth_events: AuthEventBus::new(),
        }
    }

    /// Load configuration from the environment and build the context.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }

    /// A gateway wired to this context's store and bus.
    pub fn api(&self) -> Result<ApiClient> {
        let api = ApiClient::new(
            self.config.api_base.clone(),
            Arc::clone(&self.credentials),
            self.auth_events.clone(),
        )?;
        Ok(api)
    }
}
