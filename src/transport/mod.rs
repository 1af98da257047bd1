//! HTTP transport shared by the Ocilion and Odoo REST clients.

pub mod http;

pub use http::{Auth, HttpTransport, TransportError};

use serde::{Deserialize, Serialize};
use std::env;

/// Transport settings. Values from the config file are overridden by
/// `REST_NODES_HTTP_TIMEOUT_SECS` and `REST_NODES_PROXY_URL` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            proxy_url: None,
        }
    }
}

impl TransportConfig {
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(secs) = env::var("REST_NODES_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.timeout_secs = secs;
        }
        if let Ok(proxy_url) = env::var("REST_NODES_PROXY_URL") {
            if !proxy_url.is_empty() {
                self.proxy_url = Some(proxy_url);
            }
        }
        self
    }
}
