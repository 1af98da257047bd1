//! # rest-nodes
//!
//! Workflow nodes for two REST backends: the Ocilion API and an Odoo REST
//! gateway. Each node takes a batch of pipeline items, resolves its typed
//! parameters per item, issues one request per item and maps the JSON
//! response back onto output items.
//!
//! ## Overview
//!
//! - **Typed parameters**: resources and operations are closed enums, other
//!   parameters are plain fields that may carry `{{ path }}` expressions
//!   evaluated against each input item
//! - **Session auth**: Ocilion logs in once per batch and reuses the cookie;
//!   Odoo REST sends an API key header
//! - **Splitting**: list responses can be fanned out into one item per record
//! - **Continue-on-fail**: failing items become `{error: message}` records
//!   instead of aborting the batch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_nodes::config::ConfigLoader;
//! use rest_nodes::Item;
//!
//! #[tokio::main]
//! async fn main() -> rest_nodes::Result<()> {
//!     let config = ConfigLoader::load("ocilion.yaml").await?;
//!     let node = config.build_node()?;
//!
//!     let items = vec![Item::new(serde_json::json!({"customer_id": "c-17"}))];
//!     for out in node.execute(&items).await? {
//!         println!("{}", out.json);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Run configuration loading and validation |
//! | [`node`] | Node trait, per-item executor and response mapping |
//! | [`ocilion`] | Ocilion node, session login and client |
//! | [`odoo`] | Odoo REST node and client |
//! | [`registry`] | Node lookup by name, descriptions and parameter schemas |
//! | [`transport`] | HTTP transport |
//! | [`types`] | Items and request descriptors |
//! | [`utils`] | Path lookup and expression rendering |

pub mod config;
pub mod node;
pub mod ocilion;
pub mod odoo;
pub mod registry;
pub mod transport;
pub mod types;
pub mod utils;

mod credentials;

pub use config::{ConfigLoader, RunConfig};
pub use node::{ExecutionSettings, Node, NodeDescription};
pub use ocilion::OcilionNode;
pub use odoo::OdooRestNode;
pub use registry::NodeKind;
pub use types::Item;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
