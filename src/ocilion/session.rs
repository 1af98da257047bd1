//! Session cookie acquisition.

use super::types::OcilionCredentials;
use crate::transport::{Auth, HttpTransport};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::{debug, info};

/// A logged-in session, valid for one execution batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcilionSession {
    cookie: String,
}

impl OcilionSession {
    pub fn from_cookie(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
        }
    }

    /// Exchange the credentials for a session cookie.
    pub async fn login(transport: &HttpTransport, credentials: &OcilionCredentials) -> Result<Self> {
        let password = credentials.resolve_password()?;
        let payload = serde_json::json!({
            "username": credentials.username,
            "password": password,
        });

        debug!(username = %credentials.username, path = %credentials.login_path, "logging in");
        let response = transport.post_raw(&credentials.login_path, &payload).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::authentication(format!(
                "login returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let cookie = cookie_from_headers(response.headers()).ok_or_else(|| {
            Error::authentication("login response did not set a session cookie")
        })?;
        info!(username = %credentials.username, "session established");
        Ok(Self { cookie })
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    pub fn auth(&self) -> Auth {
        Auth::Cookie(self.cookie.clone())
    }
}

/// Join the `name=value` part of every `Set-Cookie` header with `; `.
pub(crate) fn cookie_from_headers(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
