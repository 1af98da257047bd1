//! Helpers for resolving per-item parameter expressions.

pub mod json_path;
pub mod template;

pub use json_path::PathMapper;
pub use template::render_template;
