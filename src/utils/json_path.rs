//! Dot-notation path lookup into item JSON.
//!
//! Supports:
//! - Nested keys (`customer.address.city`)
//! - Bracket indexing (`lines[0].sku`)
//! - Dot indexing (`lines.0.sku`)
//! - An optional `$.` or `$json.` prefix

use serde_json::Value;

/// Path mapper for extracting values from JSON using dot-notation paths.
pub struct PathMapper;

impl PathMapper {
    /// Get value from JSON using a dot-notation path.
    ///
    /// Examples:
    /// - "customer.id"
    /// - "$json.lines[0].sku"
    /// - "lines.1"
    pub fn get_path<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
        let normalized = Self::normalize(path);
        if normalized.is_empty() {
            return None;
        }

        let mut current = obj;
        for part in normalized.split('.') {
            if part.is_empty() {
                return None;
            }

            if let Some(bracket_pos) = part.find('[') {
                let key = &part[..bracket_pos];
                if !key.is_empty() {
                    current = current.as_object()?.get(key)?;
                }
                // "a[0][1]" walks nested arrays
                for idx_str in part[bracket_pos..].split('[').skip(1) {
                    let idx = idx_str.strip_suffix(']')?.parse::<usize>().ok()?;
                    current = current.as_array()?.get(idx)?;
                }
            } else {
                current = match current {
                    Value::Object(map) => map.get(part)?,
                    Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                    _ => return None,
                };
            }
        }

        Some(current)
    }

    /// Get a value as text: strings verbatim, everything else as serialized JSON.
    pub fn get_string(obj: &Value, path: &str) -> Option<String> {
        Self::get_path(obj, path).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn normalize(path: &str) -> &str {
        let trimmed = path.trim();
        if trimmed == "$json" || trimmed == "$" {
            return "";
        }
        trimmed
            .strip_prefix("$json.")
            .or_else(|| trimmed.strip_prefix("$."))
            .unwrap_or(trimmed)
    }
}
