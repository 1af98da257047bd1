//! Core data types shared by both nodes.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Item`] | One unit of pipeline data: JSON payload plus binary attachments |
//! | [`BinaryData`] | A binary attachment carried alongside an item |
//! | [`HttpMethod`] | The four request methods the remote APIs accept |
//! | [`RequestDescriptor`] | Method, path, query and body for a single call |
//!
//! ## Example
//!
//! ```rust
//! use rest_nodes::types::{parse_body, HttpMethod, Item, RequestDescriptor};
//!
//! let body = parse_body(r#"{"name": "Jane"}"#).unwrap();
//! let request = RequestDescriptor::new(HttpMethod::Post, "res.partner/create").with_body(body);
//! assert_eq!(request.method, HttpMethod::Post);
//!
//! let item = Item::new(serde_json::json!({"id": 7}));
//! assert!(item.binary.is_empty());
//! ```

pub mod item;
pub mod request;

pub use item::{BinaryData, Item};
pub use request::{parse_body, HttpMethod, RequestDescriptor};
