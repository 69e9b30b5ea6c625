//! Client configuration.
//!
//! Read once from the environment at startup: the platform base URL and
//! the home directory where the credential file lives.
//!
//! - `PALAVER_API_BASE`: platform endpoint (default `http://127.0.0.1:8000`)
//! - `PALAVER_HOME`: client home directory (default `<config dir>/palaver`)

use std::path::PathBuf;

use anyhow::Result;

/// App name used for the default home directory.
const APP_NAME: &str = "palaver";

/// Platform endpoint used when `PALAVER_API_BASE` is unset.
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every server-relative path is joined to.
    pub api_base: String,
    /// Directory holding the client's persisted state (the credential).
    pub home: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    pub fn load() -> Result<Self> {
        let api_base =
            std::env::var("PALAVER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let home = match std::env::var_os("PALAVER_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
                .join(APP_NAME),
        };

        Ok(Self { api_base, home })
    }
}
