use super::TransportConfig;
use crate::types::RequestDescriptor;
use crate::{Error, Result};
use reqwest::Proxy;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Credentials attached to an outgoing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    #[default]
    None,
    /// Session cookie obtained from a login call.
    Cookie(String),
    /// Static header such as an API key.
    Header { name: String, value: String },
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, config: &TransportConfig) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs.max(1)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| Error::Transport(TransportError::Other(format!("Invalid proxy URL: {}", e))))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body and hand back the raw response, for callers that
    /// need headers (the session login).
    pub async fn post_raw(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        self.client
            .post(self.url_for(path))
            .header("x-request-id", Uuid::new_v4().to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))
    }

    /// Send one request and decode the response body as JSON.
    pub async fn execute(&self, request: &RequestDescriptor, auth: &Auth) -> Result<Value> {
        let url = self.url_for(&request.path);
        let request_id = Uuid::new_v4().to_string();
        let mut req = self
            .client
            .request(request.method.into(), &url)
            .header("x-request-id", &request_id)
            .header("accept", "application/json");

        match auth {
            Auth::None => {}
            Auth::Cookie(cookie) => req = req.header("cookie", cookie),
            Auth::Header { name, value } => req = req.header(name.as_str(), value),
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        debug!(method = %request.method, url = %url, request_id = %request_id, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: text,
            });
        }
        decode_body(&text)
    }
}

/// Decode a response body. An empty body becomes an empty object.
pub(crate) fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(text).map_err(|e| Error::InvalidResponse {
        message: e.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
