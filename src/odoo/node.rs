use super::client::OdooRestClient;
use super::types::{OdooParameters, OdooRestCredentials, KNOWN_MODELS};
use crate::node::{
    map_response, ExecutionSettings, ItemExecutor, ItemOperation, Node, NodeDescription,
    OptionDescription,
};
use crate::transport::{Auth, TransportConfig};
use crate::types::Item;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

/// The Odoo REST node.
pub struct OdooRestNode {
    client: OdooRestClient,
    parameters: OdooParameters,
    executor: ItemExecutor,
}

impl OdooRestNode {
    pub fn new(client: OdooRestClient, parameters: OdooParameters, settings: ExecutionSettings) -> Self {
        Self {
            client,
            parameters,
            executor: ItemExecutor::new(settings),
        }
    }

    pub fn from_config(
        credentials: OdooRestCredentials,
        parameters: OdooParameters,
        settings: ExecutionSettings,
        transport: &TransportConfig,
    ) -> Result<Self> {
        let client = OdooRestClient::new(credentials, transport)?;
        Ok(Self::new(client, parameters, settings))
    }

    pub fn parameters(&self) -> &OdooParameters {
        &self.parameters
    }

    pub fn static_description() -> NodeDescription {
        NodeDescription {
            name: "odooRest",
            display_name: "Odoo Rest",
            description: "Odoo Rest Api Addon",
            version: 1,
            credentials: vec!["odooRest"],
            resources: KNOWN_MODELS
                .iter()
                .map(|&(name, value)| OptionDescription::new(name, value))
                .collect(),
            sub_resources: Vec::new(),
            operations: vec![
                OptionDescription::described("Search", "search", "Search record(s)"),
                OptionDescription::described("Get", "get", "Get a record by Id"),
                OptionDescription::described("Update", "update", "Update a record by Id"),
                OptionDescription::described("Delete", "delete", "Delete a record by Id"),
                OptionDescription::described("Create", "create", "Create a new record"),
                OptionDescription::described("Execute", "execute", "Execute a Function"),
                OptionDescription::described(
                    "Schema",
                    "schema",
                    "Retrieve the schema of the Resource",
                ),
            ],
        }
    }
}

struct OdooBatch<'a> {
    node: &'a OdooRestNode,
    auth: Auth,
}

#[async_trait]
impl<'a> ItemOperation for OdooBatch<'a> {
    async fn run_item(&self, index: usize, item: &Item) -> Result<Vec<Item>> {
        let params = self.node.parameters.resolve(item)?;
        let request = params.build_request()?;
        debug!(index, method = %request.method, path = %request.path, "odoo request");
        let body = self.node.client.request(&request, &self.auth).await?;
        Ok(map_response(body, params.splits()))
    }
}

#[async_trait]
impl Node for OdooRestNode {
    fn description(&self) -> NodeDescription {
        Self::static_description()
    }

    fn parameter_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(OdooParameters)).unwrap_or_default()
    }

    async fn execute(&self, items: &[Item]) -> Result<Vec<Item>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            operation = self.parameters.operation.as_str(),
            model = %self.parameters.resource,
            items = items.len(),
            "executing odoo rest node"
        );

        let auth = match self.client.auth() {
            Ok(auth) => auth,
            Err(e) => return self.executor.fail_batch(items, e),
        };

        let batch = OdooBatch { node: self, auth };
        let out = self.executor.execute(&batch, items).await?;
        info!(%run_id, outputs = out.len(), "odoo rest node finished");
        Ok(out)
    }
}
