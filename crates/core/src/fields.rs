//! Loosely-typed request fields.
//!
//! Upload and update bodies arrive as JSON, urlencoded or multipart forms,
//! so every body is normalised into a [`FieldMap`] of JSON values before the
//! resolution policies in [`crate::world`] look at it. The helpers here give
//! those values a consistent truthiness and text reading.

use serde_json::Value;

/// A parsed request body: field name to raw value.
pub type FieldMap = serde_json::Map<String, Value>;

/// Whether a supplied value counts as "given".
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy; everything else is
/// truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a supplied value as stored text.
///
/// Strings are kept verbatim, `null` becomes the empty string and anything
/// else is rendered as its JSON text (so `2.1` becomes `"2.1"`).
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The value for `key` if it is present and truthy.
pub fn truthy_field<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| is_truthy(v))
}
