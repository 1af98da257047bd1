//! Ocilion node: customers and devices addressed per world.
//!
//! Every batch starts with a login that yields a session cookie
//! ([`OcilionSession`]); the cookie is then sent with each item's request.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `get` | `GET {world}/{resource}/{id}` |
//! | `getAll` | `GET {world}/{resource}?filter=...` |
//! | `create` | `POST {world}/{resource}[/{id}]` |
//! | `update` | `PUT {world}/{resource}/{id}` |

mod client;
mod node;
mod session;
mod types;

pub use client::OcilionClient;
pub use node::OcilionNode;
pub use session::OcilionSession;
pub use types::{
    OcilionCredentials, OcilionOperation, OcilionParameters, OcilionResource,
    OcilionSubResource, DEFAULT_FILTER, DEFAULT_WORLD_ID,
};
