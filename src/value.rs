//! Value model — classification of dynamic input values.
//!
//! Inputs arrive as [`serde_json::Value`]. Classification maps each value
//! onto the small set of kinds a [`ToolType`] is checked against.

use crate::spec::ToolType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of a dynamic value as seen by the type check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    /// Null, arrays and objects. Never satisfies a tool type.
    Unknown,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value by its decoded representation.
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::String(_) => ValueKind::String,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
        Value::Number(_) => ValueKind::Float,
        Value::Null | Value::Array(_) | Value::Object(_) => ValueKind::Unknown,
    }
}

/// Classify a value for a parameter of type `expected`.
///
/// Decoders that cannot tell integers from floats hand over `4.0` for `4`.
/// For integer parameters a float with no fractional part is therefore
/// reconciled to an integer; a fractional one stays a float.
pub fn classify_for(expected: &ToolType, value: &Value) -> ValueKind {
    match (expected, value) {
        (ToolType::Integer, Value::Number(n)) if n.is_f64() => match n.as_f64() {
            Some(f) if is_whole(f) => ValueKind::Integer,
            _ => ValueKind::Float,
        },
        _ => classify(value),
    }
}

fn is_whole(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}

/// Runtime type name used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
