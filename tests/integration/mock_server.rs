//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use rest_nodes::ocilion::{OcilionCredentials, OcilionParameters};
use rest_nodes::odoo::{OdooParameters, OdooRestCredentials};
use rest_nodes::transport::TransportConfig;
use rest_nodes::{ExecutionSettings, Item, OcilionNode, OdooRestNode};
use serde_json::Value;

pub const USERNAME: &str = "svc-user";
pub const PASSWORD: &str = "svc-pass";
pub const SESSION_COOKIE: &str = "SESSION=abc123";
pub const API_KEY: &str = "odoo-key-1";

/// Test fixture that owns a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn ocilion_node(&self, parameters: OcilionParameters, continue_on_fail: bool) -> OcilionNode {
        OcilionNode::from_config(
            OcilionCredentials::new(&self.base_url, USERNAME, PASSWORD),
            parameters,
            ExecutionSettings { continue_on_fail },
            &TransportConfig::default(),
        )
        .expect("ocilion node")
    }

    pub fn odoo_node(&self, parameters: OdooParameters, continue_on_fail: bool) -> OdooRestNode {
        OdooRestNode::from_config(
            OdooRestCredentials::new(&self.base_url, API_KEY),
            parameters,
            ExecutionSettings { continue_on_fail },
            &TransportConfig::default(),
        )
        .expect("odoo node")
    }

    /// Successful Ocilion login that sets the session cookie, expected `hits` times.
    pub async fn mock_login(&mut self, hits: usize) -> Mock {
        self.server
            .mock("POST", "/login")
            .match_body(Matcher::Json(serde_json::json!({
                "username": USERNAME,
                "password": PASSWORD,
            })))
            .with_status(200)
            .with_header("set-cookie", &format!("{}; Path=/; HttpOnly", SESSION_COOKIE))
            .with_body("{}")
            .expect(hits)
            .create_async()
            .await
    }

    /// Ocilion call authenticated with the session cookie.
    pub async fn mock_ocilion(&mut self, method: &str, path: &str, status: usize, body: &Value, hits: usize) -> Mock {
        self.server
            .mock(method, path)
            .match_header("cookie", SESSION_COOKIE)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    /// Odoo REST call authenticated with the API key header.
    pub async fn mock_odoo(&mut self, method: &str, path: &str, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock(method, path)
            .match_header("api-key", API_KEY)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}

pub fn items(values: Vec<Value>) -> Vec<Item> {
    values.into_iter().map(Item::new).collect()
}
