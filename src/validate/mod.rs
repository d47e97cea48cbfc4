//! Invocation validation — parameters and datasets against a [`ToolSpec`].
//!
//! Every check collects structured [`ValidationError`]s instead of failing
//! fast, so a caller sees every problem with an invocation at once. Output is
//! deterministic: errors are ordered by name, then kind, and parameter
//! errors always come before data errors.

pub mod data;
pub mod parameter;

pub use data::validate_data;
pub use parameter::{validate_parameter, validate_parameters};

use crate::inputs::ToolInput;
use crate::spec::ToolSpec;
use crate::types::ValidationConfig;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// Error model
// =============================================================================

/// Which half of the invocation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Parameters,
    Data,
}

/// Rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Required,
    WrongType,
    NotArray,
    OutOfRange,
    NotInEnum,
    InvalidDatetime,
    NotAllowed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::WrongType => "wrong-type",
            ErrorKind::NotArray => "not-array",
            ErrorKind::OutOfRange => "out-of-range",
            ErrorKind::NotInEnum => "not-in-enum",
            ErrorKind::InvalidDatetime => "invalid-datetime",
            ErrorKind::NotAllowed => "not-allowed",
        }
    }
}

/// One rule violation.
///
/// Serializes as a flat record `{field, name, type, expected, actual, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{name}: {message} (expected {expected}, got {actual})")]
pub struct ValidationError {
    pub field: Field,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub expected: String,
    pub actual: String,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(
        field: Field,
        name: impl Into<String>,
        kind: ErrorKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            name: name.into(),
            kind,
            expected: expected.into(),
            actual: actual.into(),
            message: message.into(),
        }
    }
}

/// Sort errors by name, then kind.
pub(crate) fn sort_errors(errors: &mut [ValidationError]) {
    errors.sort_by(|a, b| (a.name.as_str(), a.kind).cmp(&(b.name.as_str(), b.kind)));
}

/// Render a list the way diagnostics show it: `[a, b]`.
pub(crate) fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    let joined: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(", "))
}

// =============================================================================
// Report
// =============================================================================

/// Outcome of a validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append another report's errors after this one's.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }
}

impl From<Vec<ValidationError>> for ValidationReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Validate one invocation: parameters (extra names tolerated), then data.
pub fn validate_inputs(spec: &ToolSpec, input: &ToolInput) -> ValidationReport {
    validate_inputs_with(spec, input, &ValidationConfig::default())
}

/// Validate one invocation under an explicit policy.
pub fn validate_inputs_with(
    spec: &ToolSpec,
    input: &ToolInput,
    config: &ValidationConfig,
) -> ValidationReport {
    let mut report = validate_parameters(spec, &input.parameters, config.fail_on_extra);
    report.merge(validate_data(spec, &input.datasets));

    debug!(
        tool = %spec.name,
        errors = report.len(),
        fail_on_extra = config.fail_on_extra,
        "validated tool inputs"
    );
    report
}

// =============================================================================
// Tests
// =============================================================================
