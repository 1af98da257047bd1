//! Odoo REST node: CRUD, method execution and schema retrieval for any Odoo model.
//!
//! Requests are authenticated with a static API key header.

mod client;
mod node;
mod types;

pub use client::OdooRestClient;
pub use node::OdooRestNode;
pub use types::{
    OdooModel, OdooOperation, OdooParameters, OdooRestCredentials, DEFAULT_API_KEY_HEADER,
    DEFAULT_LIMIT, KNOWN_MODELS,
};
