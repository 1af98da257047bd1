use super::client::OcilionClient;
use super::session::OcilionSession;
use super::types::{OcilionParameters, OcilionSubResource};
use crate::node::{
    map_response, ExecutionSettings, ItemExecutor, ItemOperation, Node, NodeDescription,
    OptionDescription,
};
use crate::transport::TransportConfig;
use crate::types::Item;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The Ocilion node.
pub struct OcilionNode {
    client: OcilionClient,
    parameters: OcilionParameters,
    executor: ItemExecutor,
}

impl OcilionNode {
    pub fn new(
        client: OcilionClient,
        parameters: OcilionParameters,
        settings: ExecutionSettings,
    ) -> Self {
        Self {
            client,
            parameters,
            executor: ItemExecutor::new(settings),
        }
    }

    pub fn from_config(
        credentials: super::OcilionCredentials,
        parameters: OcilionParameters,
        settings: ExecutionSettings,
        transport: &TransportConfig,
    ) -> Result<Self> {
        let client = OcilionClient::new(credentials, transport)?;
        Ok(Self::new(client, parameters, settings))
    }

    pub fn parameters(&self) -> &OcilionParameters {
        &self.parameters
    }

    pub fn static_description() -> NodeDescription {
        NodeDescription {
            name: "ocilion",
            display_name: "Ocilion",
            description: "Ocilion Api",
            version: 1,
            credentials: vec!["ocilion"],
            resources: vec![
                OptionDescription::new("Customers", "customers"),
                OptionDescription::new("Devices", "devices"),
            ],
            sub_resources: vec![
                OptionDescription::new("None", "none"),
                OptionDescription::new("Profiles", "profiles"),
                OptionDescription::new("Devices", "devices"),
                OptionDescription::new("Subscriptions", "subscriptons"),
                OptionDescription::new("Subscriptions Change", "subscriptonchange"),
                OptionDescription::new("Billing", "billing"),
            ],
            operations: vec![
                OptionDescription::described("Create", "create", "Create a record"),
                OptionDescription::described("Get", "get", "Retrieve a record"),
                OptionDescription::described("GetAll", "getAll", "Retrieve all records"),
                OptionDescription::described("Update", "update", "Update a record"),
            ],
        }
    }

    fn warn_unused_parameters(&self) {
        if self.parameters.subresource != OcilionSubResource::None {
            warn!(subresource = ?self.parameters.subresource, "subresource is not used by any operation and is ignored");
        }
        if !self.parameters.subid.is_empty() {
            warn!("subid is not used by any operation and is ignored");
        }
    }
}

/// One batch bound to its session.
struct OcilionBatch<'a> {
    node: &'a OcilionNode,
    session: OcilionSession,
}

#[async_trait]
impl<'a> ItemOperation for OcilionBatch<'a> {
    async fn run_item(&self, index: usize, item: &Item) -> Result<Vec<Item>> {
        let params = self.node.parameters.resolve(item)?;
        let request = params.build_request()?;
        debug!(index, method = %request.method, path = %request.path, "ocilion request");
        let body = self.node.client.request(&request, &self.session).await?;
        Ok(map_response(body, params.splits()))
    }
}

#[async_trait]
impl Node for OcilionNode {
    fn description(&self) -> NodeDescription {
        Self::static_description()
    }

    fn parameter_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(OcilionParameters)).unwrap_or_default()
    }

    async fn execute(&self, items: &[Item]) -> Result<Vec<Item>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            operation = self.parameters.operation.as_str(),
            resource = self.parameters.resource.as_str(),
            items = items.len(),
            "executing ocilion node"
        );
        self.warn_unused_parameters();

        let session = match self.client.login().await {
            Ok(session) => session,
            Err(e) => return self.executor.fail_batch(items, e),
        };

        let batch = OcilionBatch {
            node: self,
            session,
        };
        let out = self.executor.execute(&batch, items).await?;
        info!(%run_id, outputs = out.len(), "ocilion node finished");
        Ok(out)
    }
}
