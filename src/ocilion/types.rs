use crate::config::ConfigError;
use crate::credentials::{lookup_secret, OCILION_KEYRING_SERVICE};
use crate::types::{parse_body, HttpMethod, Item, RequestDescriptor};
use crate::utils::render_template;
use crate::{Error, ErrorContext, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// World used when the parameter is omitted.
pub const DEFAULT_WORLD_ID: &str = "280bf646-c09a-4d67-a0d5-21ecf0f2e114";

/// Filter pre-filled for `getAll`.
pub const DEFAULT_FILTER: &str = r#"[{"property":"","value":"","op":"="}]"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OcilionResource {
    #[default]
    Customers,
    Devices,
}

impl OcilionResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcilionResource::Customers => "customers",
            OcilionResource::Devices => "devices",
        }
    }
}

/// Accepted for compatibility; no operation uses it when building requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OcilionSubResource {
    #[default]
    None,
    Profiles,
    Devices,
    #[serde(rename = "subscriptons", alias = "subscriptions")]
    Subscriptions,
    #[serde(rename = "subscriptonchange", alias = "subscriptionchange")]
    SubscriptionChange,
    Billing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OcilionOperation {
    Create,
    #[default]
    Get,
    GetAll,
    Update,
}

impl OcilionOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcilionOperation::Create => "create",
            OcilionOperation::Get => "get",
            OcilionOperation::GetAll => "getAll",
            OcilionOperation::Update => "update",
        }
    }
}

fn default_world_id() -> String {
    DEFAULT_WORLD_ID.to_string()
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

fn default_split() -> bool {
    true
}

/// Parameters of the Ocilion node.
///
/// String fields may contain `{{ path }}` expressions evaluated per item.
/// `resource`, `subresource` and `operation` apply to the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OcilionParameters {
    #[serde(default)]
    pub resource: OcilionResource,
    #[serde(default)]
    pub subresource: OcilionSubResource,
    #[serde(default)]
    pub operation: OcilionOperation,
    /// World (tenant) id of the resource.
    #[serde(default = "default_world_id", alias = "worldId")]
    pub world_id: String,
    /// Id of the resource (get, create, update).
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subid: String,
    /// Filter sent with getAll; left out of the query when empty.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Split the `data` array of a getAll response into separate items.
    #[serde(default = "default_split")]
    pub split: bool,
    /// JSON request body (create, update).
    #[serde(default)]
    pub body: String,
}

impl Default for OcilionParameters {
    fn default() -> Self {
        Self {
            resource: OcilionResource::default(),
            subresource: OcilionSubResource::default(),
            operation: OcilionOperation::default(),
            world_id: default_world_id(),
            id: String::new(),
            subid: String::new(),
            filter: default_filter(),
            split: default_split(),
            body: String::new(),
        }
    }
}

impl OcilionParameters {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.world_id.trim().is_empty() {
            return Err(ConfigError::invalid(
                "parameters.world_id",
                "world id must not be empty",
            ));
        }
        Ok(())
    }

    /// Evaluate the per-item expressions against `item`.
    ///
    /// `subid` is left as written since no request uses it.
    pub fn resolve(&self, item: &Item) -> Result<Self> {
        Ok(Self {
            world_id: render_template(&self.world_id, &item.json, "world_id")?,
            id: render_template(&self.id, &item.json, "id")?,
            filter: render_template(&self.filter, &item.json, "filter")?,
            body: render_template(&self.body, &item.json, "body")?,
            ..self.clone()
        })
    }

    /// Whether the response should be split into one item per record.
    pub fn splits(&self) -> bool {
        match self.operation {
            OcilionOperation::GetAll => self.split,
            OcilionOperation::Get | OcilionOperation::Create | OcilionOperation::Update => false,
        }
    }

    /// Build the request for the already resolved parameters.
    pub fn build_request(&self) -> Result<RequestDescriptor> {
        // A non-empty body is validated even for operations that do not send one.
        let body = parse_body(&self.body)?;
        let collection = format!("{}/{}", self.world_id, self.resource.as_str());

        let request = match self.operation {
            OcilionOperation::Get => {
                RequestDescriptor::new(HttpMethod::Get, format!("{}/{}", collection, self.require_id()?))
            }
            OcilionOperation::GetAll => {
                let request = RequestDescriptor::new(HttpMethod::Get, collection);
                if self.filter.is_empty() {
                    request
                } else {
                    request.with_query("filter", self.filter.as_str())
                }
            }
            OcilionOperation::Create => {
                let path = if self.id.is_empty() {
                    collection
                } else {
                    format!("{}/{}", collection, self.id)
                };
                RequestDescriptor::new(HttpMethod::Post, path).with_body(body)
            }
            OcilionOperation::Update => RequestDescriptor::new(
                HttpMethod::Put,
                format!("{}/{}", collection, self.require_id()?),
            )
            .with_body(body),
        };
        Ok(request)
    }

    fn require_id(&self) -> Result<&str> {
        if self.id.is_empty() {
            return Err(Error::validation_with_context(
                format!("an id is required for the '{}' operation", self.operation.as_str()),
                ErrorContext::new().with_field_path("id"),
            ));
        }
        Ok(&self.id)
    }
}

fn default_login_path() -> String {
    "login".to_string()
}

/// Stored Ocilion credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct OcilionCredentials {
    /// API base URL, e.g. `https://api.ocilion.example/v1`.
    pub url: String,
    pub username: String,
    /// Falls back to the OS keyring, then `OCILION_PASSWORD`.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl fmt::Debug for OcilionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcilionCredentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl OcilionCredentials {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: Some(password.into()),
            login_path: default_login_path(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid("credentials.url", e.to_string()))?;
        if self.username.trim().is_empty() {
            return Err(ConfigError::invalid(
                "credentials.username",
                "username must not be empty",
            ));
        }
        Ok(())
    }

    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        lookup_secret(OCILION_KEYRING_SERVICE, &self.username, "OCILION_PASSWORD").ok_or_else(
            || {
                Error::authentication(format!(
                    "no password configured for '{}' (set it in the config, the keyring or OCILION_PASSWORD)",
                    self.username
                ))
            },
        )
    }
}
