use super::session::OcilionSession;
use super::types::OcilionCredentials;
use crate::transport::{HttpTransport, TransportConfig};
use crate::types::RequestDescriptor;
use crate::Result;
use serde_json::Value;

/// Client for the Ocilion REST API.
pub struct OcilionClient {
    transport: HttpTransport,
    credentials: OcilionCredentials,
}

impl OcilionClient {
    pub fn new(credentials: OcilionCredentials, config: &TransportConfig) -> Result<Self> {
        let transport = HttpTransport::new(&credentials.url, config)?;
        Ok(Self {
            transport,
            credentials,
        })
    }

    pub fn credentials(&self) -> &OcilionCredentials {
        &self.credentials
    }

    pub async fn login(&self) -> Result<OcilionSession> {
        OcilionSession::login(&self.transport, &self.credentials).await
    }

    pub async fn request(&self, request: &RequestDescriptor, session: &OcilionSession) -> Result<Value> {
        self.transport.execute(request, &session.auth()).await
    }
}
