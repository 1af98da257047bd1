use super::types::OdooRestCredentials;
use crate::transport::{Auth, HttpTransport, TransportConfig};
use crate::types::RequestDescriptor;
use crate::Result;
use serde_json::Value;

/// Client for an Odoo REST gateway.
pub struct OdooRestClient {
    transport: HttpTransport,
    credentials: OdooRestCredentials,
}

impl OdooRestClient {
    pub fn new(credentials: OdooRestCredentials, config: &TransportConfig) -> Result<Self> {
        let transport = HttpTransport::new(&credentials.url, config)?;
        Ok(Self {
            transport,
            credentials,
        })
    }

    pub fn credentials(&self) -> &OdooRestCredentials {
        &self.credentials
    }

    /// The API key header sent with every request.
    pub fn auth(&self) -> Result<Auth> {
        Ok(Auth::Header {
            name: self.credentials.api_key_header.clone(),
            value: self.credentials.resolve_api_key()?,
        })
    }

    pub async fn request(&self, request: &RequestDescriptor, auth: &Auth) -> Result<Value> {
        self.transport.execute(request, auth).await
    }
}
