//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::env::{vars, EnvError, Environment};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestrConfig {
    /// HTTP client settings.
    pub client: ClientSettings,
    /// Logging settings.
    pub log: LogSettings,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Upstream proxy for all schemes.
    pub proxy: Option<String>,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Keep a cookie jar across requests.
    pub cookie_store: bool,
    /// Transparently decompress gzip responses.
    pub gzip: bool,
    /// Override the default user agent.
    pub user_agent: Option<String>,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            accept_invalid_certs: true,
            cookie_store: true,
            gzip: false,
            user_agent: None,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: Option<String>,
    /// Output format (`pretty`, `compact`, `json`).
    pub format: Option<String>,
    /// Also append log lines to this file.
    pub file: Option<PathBuf>,
}

impl RequestrConfig {
    /// Let environment variables override file values.
    ///
    /// A non-empty `HTTP_PROXY` replaces the configured proxy.
    pub fn apply_env(&mut self) -> Result<(), EnvError> {
        if let Some(proxy) = Environment::get(vars::HTTP_PROXY).filter(|p| !p.is_empty()) {
            self.client.proxy = Some(proxy);
        }

        if let Some(insecure) = Environment::get_bool(vars::REQUESTR_ACCEPT_INVALID_CERTS) {
            self.client.accept_invalid_certs = insecure;
        }

        if let Some(secs) = Environment::get_int::<u64>(vars::REQUESTR_TIMEOUT_SECS)? {
            self.client.request_timeout_secs = Some(secs);
        }

        Ok(())
    }
}
