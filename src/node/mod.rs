//! Node abstraction shared by the Ocilion and Odoo REST implementations.
//!
//! A node receives the batch of input items, resolves its typed parameters per
//! item, issues one request per item and returns the mapped output items.
//! Failure handling across the batch lives in [`executor`], response splitting
//! in [`response`].

pub mod executor;
pub mod response;

pub use executor::{ExecutionSettings, ItemExecutor, ItemOperation};
pub use response::{map_response, SPLIT_FIELD};

use crate::types::Item;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// One entry of a resource or operation option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescription {
    pub name: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl OptionDescription {
    pub const fn new(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value,
            description: None,
        }
    }

    pub const fn described(name: &'static str, value: &'static str, description: &'static str) -> Self {
        Self {
            name,
            value,
            description: Some(description),
        }
    }
}

/// Static description a node publishes to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub version: u32,
    pub credentials: Vec<&'static str>,
    pub resources: Vec<OptionDescription>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_resources: Vec<OptionDescription>,
    pub operations: Vec<OptionDescription>,
}

#[async_trait]
pub trait Node: Send + Sync {
    fn description(&self) -> NodeDescription;

    /// JSON Schema of the node's parameter struct.
    fn parameter_schema(&self) -> Value;

    /// Run the node over a batch of input items.
    async fn execute(&self, items: &[Item]) -> Result<Vec<Item>>;
}
