//! Configuration error types

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    LoadError {
        path: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Invalid configuration at {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Configuration syntax error: {0}")]
    Syntax(String),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attach an actionable hint to a load error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        if let ConfigError::LoadError {
            hint: ref mut slot, ..
        } = self
        {
            *slot = Some(hint.into());
        }
        self
    }
}
