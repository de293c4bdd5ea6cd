// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::ExecutionState;
use crate::observability::messages::template::TemplatePathMissing;
use crate::observability::messages::StructuredLog;
use crate::template::path::lookup_path;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitutes `{{path}}` references against accumulated run state.
///
/// Resolution is soft: a missing path yields null (or an empty string when
/// interpolating into a larger string) and logs a warning, favoring partial
/// results over total failure.
pub struct TemplateResolver;

impl TemplateResolver {
    /// Resolve a template value recursively.
    ///
    /// * A string that is exactly one `{{path}}` token substitutes the
    ///   referenced value with its original type.
    /// * A string mixing literals and tokens interpolates rendered text.
    /// * Arrays and objects resolve element-wise.
    /// * Everything else passes through unchanged.
    pub fn resolve(template: &Value, state: &ExecutionState) -> Value {
        match template {
            Value::String(s) => Self::resolve_string(s, state),
            Value::Array(items) => Value::Array(
                items.iter().map(|item| Self::resolve(item, state)).collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::resolve(v, state)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn resolve_string(s: &str, state: &ExecutionState) -> Value {
        match Self::single_token(s) {
            Some(path) => Self::lookup_soft(path, state).cloned().unwrap_or(Value::Null),
            None if s.contains(OPEN) => Value::String(Self::interpolate(s, state)),
            None => Value::String(s.to_string()),
        }
    }

    /// The inner path when the whole string is a single `{{path}}` token.
    fn single_token(s: &str) -> Option<&str> {
        let trimmed = s.trim();
        let inner = trimmed.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
        if inner.contains(OPEN) || inner.contains(CLOSE) {
            return None;
        }
        Some(inner.trim())
    }

    fn interpolate(s: &str, state: &ExecutionState) -> String {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            match after_open.find(CLOSE) {
                Some(end) => {
                    let path = after_open[..end].trim();
                    if let Some(value) = Self::lookup_soft(path, state) {
                        out.push_str(&Self::render(value));
                    }
                    rest = &after_open[end + CLOSE.len()..];
                }
                None => {
                    // Unterminated token: keep the rest as a literal.
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn lookup_soft<'a>(path: &str, state: &'a ExecutionState) -> Option<&'a Value> {
        let found = lookup_path(state, path);
        if found.is_none() {
            TemplatePathMissing { path }.log();
        }
        found
    }

    /// Render a value for string interpolation.
    fn render(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            composite => serde_json::to_string(composite).unwrap_or_default(),
        }
    }
}
