//! `{{ path }}` placeholder substitution for per-item parameters.

use super::json_path::PathMapper;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("placeholder pattern is valid")
});

/// Returns true if the text contains at least one placeholder.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Replace every `{{ path }}` in `template` with the value at `path` in `item`.
///
/// `field` names the parameter and is only used in error messages.
pub fn render_template(template: &str, item: &Value, field: &str) -> Result<String> {
    if !has_placeholders(template) {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let path = &caps[1];
        let value = PathMapper::get_string(item, path).ok_or_else(|| {
            Error::validation_with_context(
                format!("expression '{{{{ {} }}}}' did not resolve against the input item", path),
                ErrorContext::new()
                    .with_field_path(field)
                    .with_source("template"),
            )
        })?;
        out.push_str(&template[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}
