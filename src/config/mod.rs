//! Run configuration: which node to run, its credentials and typed parameters.
//!
//! ```yaml
//! node: ocilion
//! continue_on_fail: true
//! transport:
//!   timeout_secs: 20
//! credentials:
//!   url: https://api.ocilion.example/v1
//!   username: integration
//! parameters:
//!   resource: customers
//!   operation: getAll
//!   world_id: 280bf646-c09a-4d67-a0d5-21ecf0f2e114
//! ```

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{load_items, ConfigLoader};

use crate::node::{ExecutionSettings, Node};
use crate::ocilion::{OcilionCredentials, OcilionNode, OcilionParameters};
use crate::odoo::{OdooParameters, OdooRestCredentials, OdooRestNode};
use crate::registry::NodeKind;
use crate::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Node selection with its credentials and parameters, tagged by `node`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum NodeConfig {
    Ocilion {
        credentials: OcilionCredentials,
        #[serde(default)]
        parameters: OcilionParameters,
    },
    #[serde(alias = "odooRest", alias = "odoo")]
    OdooRest {
        credentials: OdooRestCredentials,
        #[serde(default)]
        parameters: OdooParameters,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    pub node: NodeConfig,
    #[serde(default)]
    pub continue_on_fail: bool,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl RunConfig {
    pub fn kind(&self) -> NodeKind {
        match self.node {
            NodeConfig::Ocilion { .. } => NodeKind::Ocilion,
            NodeConfig::OdooRest { .. } => NodeKind::OdooRest,
        }
    }

    pub fn settings(&self) -> ExecutionSettings {
        ExecutionSettings {
            continue_on_fail: self.continue_on_fail,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "transport.timeout_secs",
                "timeout must be at least one second",
            ));
        }
        if let Some(proxy) = &self.transport.proxy_url {
            url::Url::parse(proxy)
                .map_err(|e| ConfigError::invalid("transport.proxy_url", e.to_string()))?;
        }
        match &self.node {
            NodeConfig::Ocilion {
                credentials,
                parameters,
            } => {
                credentials.validate()?;
                parameters.validate()
            }
            NodeConfig::OdooRest {
                credentials,
                parameters,
            } => {
                credentials.validate()?;
                parameters.validate()
            }
        }
    }

    /// Instantiate the configured node.
    pub fn build_node(&self) -> crate::Result<Box<dyn Node>> {
        let settings = self.settings();
        let node: Box<dyn Node> = match &self.node {
            NodeConfig::Ocilion {
                credentials,
                parameters,
            } => Box::new(OcilionNode::from_config(
                credentials.clone(),
                parameters.clone(),
                settings,
                &self.transport,
            )?),
            NodeConfig::OdooRest {
                credentials,
                parameters,
            } => Box::new(OdooRestNode::from_config(
                credentials.clone(),
                parameters.clone(),
                settings,
                &self.transport,
            )?),
        };
        Ok(node)
    }
}
