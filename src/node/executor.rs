//! Sequential per-item execution with continue-on-fail handling.

use crate::types::Item;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The work done for a single input item.
#[async_trait]
pub trait ItemOperation: Send + Sync {
    async fn run_item(&self, index: usize, item: &Item) -> Result<Vec<Item>>;
}

/// Host-level execution settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSettings {
    /// Turn per-item failures into `{error: message}` records instead of aborting.
    #[serde(default)]
    pub continue_on_fail: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemExecutor {
    settings: ExecutionSettings,
}

impl ItemExecutor {
    pub fn new(settings: ExecutionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExecutionSettings {
        &self.settings
    }

    /// Run `op` over every item in order, awaiting each before the next.
    ///
    /// Without continue-on-fail the first failure aborts the batch and is
    /// returned wrapped with the failing item's index.
    pub async fn execute<O>(&self, op: &O, items: &[Item]) -> Result<Vec<Item>>
    where
        O: ItemOperation + ?Sized,
    {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match op.run_item(index, item).await {
                Ok(produced) => out.extend(produced),
                Err(e) if self.settings.continue_on_fail => {
                    warn!(index, error = %e, "item failed, continuing");
                    out.push(Item::error(e.to_string()));
                }
                Err(e) => return Err(e.at_item(index)),
            }
        }
        Ok(out)
    }

    /// Handle a failure that happened before any item ran (e.g. login).
    ///
    /// With continue-on-fail every input item becomes an error record.
    pub fn fail_batch(&self, items: &[Item], err: Error) -> Result<Vec<Item>> {
        if !self.settings.continue_on_fail {
            return Err(err);
        }
        warn!(items = items.len(), error = %err, "batch setup failed, emitting error records");
        let message = err.to_string();
        Ok(items.iter().map(|_| Item::error(message.clone())).collect())
    }
}
