//! Loading run configurations and input items from disk.

use super::{ConfigError, RunConfig};
use crate::types::Item;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a run configuration. `.json` files are read as JSON,
    /// everything else as YAML. Transport environment overrides are applied.
    pub async fn load(path: impl AsRef<Path>) -> Result<RunConfig, ConfigError> {
        let path = path.as_ref();
        let content = read_file(path).await?;

        let mut config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => parse_json(&content)?,
            _ => parse_yaml(&content)?,
        };
        // Overrides replace file values before validation sees them.
        config.transport = config.transport.with_env_overrides();
        config.validate()?;

        debug!(path = %path.display(), node = config.kind().name(), "configuration loaded");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<RunConfig, ConfigError> {
        let config = parse_yaml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<RunConfig, ConfigError> {
        let config = parse_json(content)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_yaml(content: &str) -> Result<RunConfig, ConfigError> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::Syntax(format!("invalid YAML: {}", e)))
}

fn parse_json(content: &str) -> Result<RunConfig, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::Syntax(format!("invalid JSON: {}", e)))
}

/// Load input items from a JSON file holding an array.
///
/// Elements shaped like `{"json": ...}` are read as full items; any other
/// element becomes the JSON payload of a new item.
pub async fn load_items(path: impl AsRef<Path>) -> Result<Vec<Item>, ConfigError> {
    let path = path.as_ref();
    let content = read_file(path).await?;
    parse_items(&content)
}

pub(crate) fn parse_items(content: &str) -> Result<Vec<Item>, ConfigError> {
    let values: Vec<Value> = serde_json::from_str(content)
        .map_err(|e| ConfigError::Syntax(format!("items must be a JSON array: {}", e)))?;

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let is_item = value
                .as_object()
                .map(|o| o.contains_key("json"))
                .unwrap_or(false);
            if is_item {
                serde_json::from_value(value)
                    .map_err(|e| ConfigError::invalid(format!("items[{}]", i), e.to_string()))
            } else {
                Ok(Item::new(value))
            }
        })
        .collect()
}

async fn read_file(path: &Path) -> Result<String, ConfigError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        ConfigError::LoadError {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
            hint: None,
        }
        .with_hint("Check if the file exists and you have read permissions.")
    })
}
