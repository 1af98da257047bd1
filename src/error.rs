use crate::config::ConfigError;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for pinpointing which parameter or stage failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Parameter or configuration key that caused the error (e.g., "parameters.world_id")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Stage that raised the error (e.g., "config_loader", "ocilion_session")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Unified error type for node execution.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid parameter: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Request body is not valid JSON: {body} ({reason})")]
    MalformedBody { body: String, reason: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Response is not valid JSON: {message}")]
    InvalidResponse { message: String },

    #[error("Item {index} failed: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Error::Authentication {
            message: msg.into(),
        }
    }

    pub fn malformed_body(body: impl Into<String>, reason: impl ToString) -> Self {
        Error::MalformedBody {
            body: body.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap an error with the index of the input item that produced it.
    pub fn at_item(self, index: usize) -> Self {
        Error::Item {
            index,
            source: Box::new(self),
        }
    }

    /// Index of the failing item, when the batch was aborted.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Error::Item { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } => Some(context),
            Error::Item { source, .. } => source.context(),
            _ => None,
        }
    }
}
