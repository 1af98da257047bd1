//! Registry of the nodes this crate provides.

use crate::node::NodeDescription;
use crate::ocilion::{OcilionNode, OcilionParameters};
use crate::odoo::{OdooParameters, OdooRestNode};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Ocilion,
    OdooRest,
}

impl NodeKind {
    pub const ALL: [NodeKind; 2] = [NodeKind::Ocilion, NodeKind::OdooRest];

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Ocilion => "ocilion",
            NodeKind::OdooRest => "odoo_rest",
        }
    }

    pub fn description(&self) -> NodeDescription {
        match self {
            NodeKind::Ocilion => OcilionNode::static_description(),
            NodeKind::OdooRest => OdooRestNode::static_description(),
        }
    }

    /// JSON Schema of the node's parameters.
    pub fn parameter_schema(&self) -> Value {
        let schema = match self {
            NodeKind::Ocilion => schemars::schema_for!(OcilionParameters),
            NodeKind::OdooRest => schemars::schema_for!(OdooParameters),
        };
        serde_json::to_value(schema).unwrap_or_default()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "ocilion" => Ok(NodeKind::Ocilion),
            "odoo_rest" | "odoorest" | "odoo" => Ok(NodeKind::OdooRest),
            other => Err(format!(
                "unknown node '{}' (expected one of: ocilion, odoo_rest)",
                other
            )),
        }
    }
}
