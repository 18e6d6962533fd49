//! Typed parameter extraction from a `serde_json::Value` object.
//!
//! A missing key yields the supplied default. A key that is present but
//! holds the wrong JSON type is an error, so a typo in a host's params
//! object surfaces at load time instead of as a silently ignored value.

use crate::error::FlowError;
use serde_json::Value;

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() && n.as_i64().is_some_and(|v| v < 0) => "negative integer",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> FlowError {
    FlowError::ParamTypeMismatch {
        name: name.to_owned(),
        expected: expected.to_owned(),
        got: json_type_name(got).to_owned(),
    }
}

/// Extracts an `f64` from `params[name]`.
///
/// Integers are accepted and converted. Returns `default` when the key is
/// missing or `params` is not an object.
pub fn require_f64(params: &Value, name: &str, default: f64) -> Result<f64, FlowError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Extracts a non-negative integer count from `params[name]`.
///
/// Negative or fractional numbers are rejected rather than truncated.
pub fn require_count(params: &Value, name: &str, default: usize) -> Result<usize, FlowError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}
