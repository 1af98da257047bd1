//! Pipeline items exchanged with the host runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A binary attachment. Output items produced by the nodes never carry one,
/// but input items may and the type must round-trip through the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Base64 encoded content, as handed over by the host.
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// One unit of data flowing through the host pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub json: Value,
    #[serde(default)]
    pub binary: BTreeMap<String, BinaryData>,
}

impl Item {
    pub fn new(json: Value) -> Self {
        Self {
            json,
            binary: BTreeMap::new(),
        }
    }

    /// The record emitted in place of a failed item when continue-on-fail is set.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(serde_json::json!({ "error": message.into() }))
    }

    /// Returns the error message if this is an error record.
    pub fn error_message(&self) -> Option<&str> {
        self.json.get("error").and_then(Value::as_str)
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()))
    }
}

impl From<Value> for Item {
    fn from(json: Value) -> Self {
        Self::new(json)
    }
}
