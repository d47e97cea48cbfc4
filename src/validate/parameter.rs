//! Parameter validation — single values and whole parameter maps.

use super::{format_list, sort_errors, ErrorKind, Field, ValidationError, ValidationReport};
use crate::spec::{ParameterSpec, ToolSpec, ToolType};
use crate::value::{classify_for, type_name};
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Validate an entire parameter map against the tool's declared parameters.
///
/// Declared parameters present in `inputs` are checked with
/// [`validate_parameter`]. Undeclared names are rejected with `not-allowed`
/// only when `fail_on_extra` is set. Declared parameters missing from
/// `inputs` are reported as `required` unless they are optional or carry a
/// default. Defaults are not applied here.
pub fn validate_parameters(
    spec: &ToolSpec,
    inputs: &BTreeMap<String, Value>,
    fail_on_extra: bool,
) -> ValidationReport {
    let mut errors = Vec::new();

    for (name, value) in inputs {
        match spec.parameters.get(name) {
            Some(param) => {
                if let Err(err) = validate_parameter(param, value) {
                    errors.push(err);
                }
            }
            None if fail_on_extra => errors.push(not_allowed(spec, name)),
            None => trace!(parameter = %name, "ignoring undeclared parameter"),
        }
    }

    for (name, param) in &spec.parameters {
        if param.is_required() && !inputs.contains_key(name) {
            errors.push(ValidationError::new(
                Field::Parameters,
                name.as_str(),
                ErrorKind::Required,
                "not null",
                "null",
                format!("{name} is a required parameter but was not provided"),
            ));
        }
    }

    sort_errors(&mut errors);
    debug!(
        tool = %spec.name,
        errors = errors.len(),
        fail_on_extra,
        "validated parameters"
    );
    ValidationReport::from(errors)
}

fn not_allowed(spec: &ToolSpec, name: &str) -> ValidationError {
    let allowed = format_list(&spec.parameter_names());
    ValidationError::new(
        Field::Parameters,
        name,
        ErrorKind::NotAllowed,
        format!("one of {allowed}"),
        name,
        format!("parameter {name} is not allowed, allowed parameters are: {allowed}"),
    )
}

/// Validate one value against one parameter spec.
///
/// Returns the first violated rule. For array parameters each element is
/// checked as a scalar and the first failing element is reported.
pub fn validate_parameter(spec: &ParameterSpec, value: &Value) -> Result<(), ValidationError> {
    if !spec.is_array {
        return check_scalar(spec, value, &spec.name);
    }

    let Value::Array(items) = value else {
        return Err(ValidationError::new(
            Field::Parameters,
            spec.name.as_str(),
            ErrorKind::NotArray,
            spec.display_type(),
            type_name(value),
            format!("expected {} to be an array of {}", spec.name, spec.tool_type),
        ));
    };

    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| check_scalar(spec, item, &format!("{}[{}]", spec.name, i)))
}

/// Checks for a non-array value. `label` names the value in messages.
fn check_scalar(spec: &ParameterSpec, value: &Value, label: &str) -> Result<(), ValidationError> {
    let fail = |kind: ErrorKind,
                expected: String,
                actual: String,
                message: String|
     -> Result<(), ValidationError> {
        Err(ValidationError::new(
            Field::Parameters,
            spec.name.as_str(),
            kind,
            expected,
            actual,
            message,
        ))
    };

    if value.is_null() {
        if spec.optional {
            return Ok(());
        }
        return fail(
            ErrorKind::Required,
            "not nil".to_string(),
            "nil".to_string(),
            format!("{label} is required"),
        );
    }

    let kind = classify_for(&spec.tool_type, value);
    if !spec.tool_type.accepts(kind) {
        let expected = spec.tool_type.value_kind();
        return fail(
            ErrorKind::WrongType,
            expected.to_string(),
            kind.to_string(),
            format!("expected {label} to be of type {expected}"),
        );
    }

    if spec.tool_type.is_numeric() {
        // accepts() guarantees a number here
        let n = value.as_f64().unwrap_or(f64::NAN);
        if let Some(min) = spec.min {
            if n < min {
                return fail(
                    ErrorKind::OutOfRange,
                    format!(">= {min:.2}"),
                    format!("{n:.2}"),
                    format!("{label} must be >= {min:.2}"),
                );
            }
        }
        if let Some(max) = spec.max {
            if n > max {
                return fail(
                    ErrorKind::OutOfRange,
                    format!("<= {max:.2}"),
                    format!("{n:.2}"),
                    format!("{label} must be <= {max:.2}"),
                );
            }
        }
    }

    if let Some(text) = value.as_str() {
        if spec.tool_type == ToolType::Enum && !spec.values.iter().any(|v| v == text) {
            let allowed = format_list(&spec.values);
            return fail(
                ErrorKind::NotInEnum,
                format!("one of {allowed}"),
                text.to_string(),
                format!("{label} must be one of {allowed}"),
            );
        }

        if spec.tool_type.is_temporal() && !is_iso8601(&spec.tool_type, text) {
            return fail(
                ErrorKind::InvalidDatetime,
                format!("a valid ISO 8601 {} string", spec.tool_type),
                text.to_string(),
                format!("{label} must be a valid ISO 8601 {} string", spec.tool_type),
            );
        }
    }

    Ok(())
}

/// RFC 3339 timestamps are accepted for every temporal type; `date` and
/// `time` additionally accept the bare ISO 8601 date or time.
fn is_iso8601(tool_type: &ToolType, text: &str) -> bool {
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    match tool_type {
        ToolType::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        ToolType::Time => NaiveTime::parse_from_str(text, "%H:%M:%S%.f").is_ok(),
        _ => false,
    }
}
