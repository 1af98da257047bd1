use crate::config::ConfigError;
use crate::credentials::{lookup_secret, ODOO_KEYRING_SERVICE};
use crate::types::{parse_body, HttpMethod, Item, RequestDescriptor};
use crate::utils::render_template;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_API_KEY_HEADER: &str = "api-key";

/// Models offered in the node's resource list. Other well-formed model names are accepted too.
pub const KNOWN_MODELS: &[(&str, &str)] = &[
    ("Partner", "res.partner"),
    ("Installation", "res.partner.installation"),
    ("User", "res.users"),
    ("Project Task", "project.task"),
    ("Project Task Type", "project.task.type"),
    ("Sale Order", "sale.order"),
    ("Sale Order Line", "sale.order.line"),
    ("Sale Order Line Dynamic Info", "sale.product.dynamic.info"),
    ("Helpdesk", "helpdesk.ticket"),
    ("Phone Number", "phone.number.info"),
    ("Domains", "web.domain.info"),
    ("CPE", "cpe.dynamic.info"),
    ("Set-Top-Box", "settop.dynamic.info"),
    ("E-Mail", "email.dynamic.info"),
    ("E-Mail Alias", "emailalias.dynamic.info"),
    ("SLA-PIN", "slapin.dynamic.info"),
    ("Bank Statement", "account.bank.statement"),
    ("Bank Statement Lines", "account.bank.statement.line"),
    ("Domain Handle", "domain.contact.handle"),
    ("Domain Documentation", "domain.domain.registry"),
    ("Domain Registrars", "domain.registrar"),
    ("Domain Nameserver", "domain.nameserver"),
    ("Webserver Subscriptions", "webserver.subscriptions"),
    ("Webserver Config", "webserver.config"),
    ("StadwerkBilling", "stadwerk.billing"),
    ("StadwerkBillingLine", "stadwerk.billing.line"),
    ("Employee", "hr.employee"),
    ("Attendance", "hr.attendance"),
    ("LogNote", "mail.message"),
];

static MODEL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z0-9_]+)*$").expect("model name pattern is valid")
});

/// An Odoo model name such as `res.partner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct OdooModel(String);

impl OdooModel {
    pub fn new(name: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        let model = Self(name.into());
        model.validate()?;
        Ok(model)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_MODELS.iter().any(|(_, name)| *name == self.0)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if MODEL_NAME.is_match(&self.0) {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                "parameters.resource",
                format!("'{}' is not a valid Odoo model name", self.0),
            ))
        }
    }
}

impl Default for OdooModel {
    fn default() -> Self {
        Self("res.partner".to_string())
    }
}

impl fmt::Display for OdooModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OdooOperation {
    Search,
    #[default]
    Get,
    Update,
    Delete,
    Create,
    Execute,
    Schema,
}

impl OdooOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            OdooOperation::Search => "search",
            OdooOperation::Get => "get",
            OdooOperation::Update => "update",
            OdooOperation::Delete => "delete",
            OdooOperation::Create => "create",
            OdooOperation::Execute => "execute",
            OdooOperation::Schema => "schema",
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_split() -> bool {
    true
}

/// Parameters of the Odoo REST node.
///
/// String fields may contain `{{ path }}` expressions evaluated per item;
/// `resource` and `operation` apply to the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OdooParameters {
    /// Object model to use.
    #[serde(default, alias = "model")]
    pub resource: OdooModel,
    #[serde(default)]
    pub operation: OdooOperation,
    /// Record id (get, update, delete).
    #[serde(default)]
    pub id: String,
    /// JSON request body (create, update, execute).
    #[serde(default)]
    pub body: String,
    /// Search domain.
    #[serde(default)]
    pub domain: String,
    /// Fields to retrieve.
    #[serde(default)]
    pub fields: String,
    /// Maximum number of records a search returns.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Split the `data` array of get, search and schema responses into separate items.
    #[serde(default = "default_split")]
    pub split: bool,
}

impl Default for OdooParameters {
    fn default() -> Self {
        Self {
            resource: OdooModel::default(),
            operation: OdooOperation::default(),
            id: String::new(),
            body: String::new(),
            domain: String::new(),
            fields: String::new(),
            limit: default_limit(),
            split: default_split(),
        }
    }
}

impl OdooParameters {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.resource.validate()
    }

    /// Evaluate the per-item expressions against `item`.
    pub fn resolve(&self, item: &Item) -> Result<Self> {
        Ok(Self {
            id: render_template(&self.id, &item.json, "id")?,
            body: render_template(&self.body, &item.json, "body")?,
            domain: render_template(&self.domain, &item.json, "domain")?,
            fields: render_template(&self.fields, &item.json, "fields")?,
            ..self.clone()
        })
    }

    pub fn splits(&self) -> bool {
        match self.operation {
            OdooOperation::Get | OdooOperation::Search | OdooOperation::Schema => self.split,
            OdooOperation::Update
            | OdooOperation::Delete
            | OdooOperation::Create
            | OdooOperation::Execute => false,
        }
    }

    /// Build the request for the already resolved parameters.
    pub fn build_request(&self) -> Result<RequestDescriptor> {
        // A non-empty body is validated even for operations that do not send one.
        let body = parse_body(&self.body)?;
        let model = self.resource.as_str();

        let request = match self.operation {
            OdooOperation::Search => {
                RequestDescriptor::new(HttpMethod::Get, format!("{}/search", model))
                    .with_query("domain", self.domain.as_str())
                    .with_query("fields", self.fields.as_str())
                    .with_query("limit", self.limit.to_string())
            }
            OdooOperation::Get => {
                RequestDescriptor::new(HttpMethod::Get, format!("{}/{}", model, self.require_id()?))
            }
            OdooOperation::Update => {
                RequestDescriptor::new(HttpMethod::Put, format!("{}/{}", model, self.require_id()?))
                    .with_body(body)
            }
            OdooOperation::Delete => RequestDescriptor::new(
                HttpMethod::Delete,
                format!("{}/{}", model, self.require_id()?),
            ),
            OdooOperation::Create => {
                RequestDescriptor::new(HttpMethod::Post, format!("{}/create", model)).with_body(body)
            }
            OdooOperation::Execute => {
                RequestDescriptor::new(HttpMethod::Post, format!("{}/execute_kw", model))
                    .with_body(body)
            }
            OdooOperation::Schema => {
                RequestDescriptor::new(HttpMethod::Get, format!("{}/schema", model))
            }
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

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

/// Stored Odoo REST credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct OdooRestCredentials {
    /// Gateway base URL, e.g. `https://odoo.example.com/api`.
    pub url: String,
    /// Falls back to the OS keyring (account = url), then `ODOO_REST_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl fmt::Debug for OdooRestCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdooRestCredentials")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_header", &self.api_key_header)
            .finish()
    }
}

impl OdooRestCredentials {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: Some(api_key.into()),
            api_key_header: default_api_key_header(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid("credentials.url", e.to_string()))?;
        reqwest::header::HeaderName::from_bytes(self.api_key_header.as_bytes()).map_err(|_| {
            ConfigError::invalid(
                "credentials.api_key_header",
                format!("'{}' is not a valid header name", self.api_key_header),
            )
        })?;
        Ok(())
    }

    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        lookup_secret(ODOO_KEYRING_SERVICE, &self.url, "ODOO_REST_API_KEY").ok_or_else(|| {
            Error::authentication(format!(
                "no API key configured for {} (set it in the config, the keyring or ODOO_REST_API_KEY)",
                self.url
            ))
        })
    }
}
