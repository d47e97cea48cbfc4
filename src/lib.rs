//! # tool-spec - Tool Invocation Validation
//!
//! Checks the parameters and data files handed to a containerised tool
//! against the tool's declarative specification before the tool runs:
//! - Typed parameters (string, integer, float, boolean, enum, datetime, asset)
//! - Array parameters, numeric ranges, enum membership, ISO 8601 timestamps
//! - Required, optional and defaulted parameters, and an extra-parameter policy
//! - Required datasets and accepted file extensions
//!
//! ## Architecture
//!
//! ```text
//!   tool.yml ──► SpecFile ──► ToolSpec ──┐
//!                                        ├──► validate_inputs ──► ValidationReport
//!   inputs.json ► InputFile ► ToolInput ─┘        │
//!                                   ┌─────────────┴─────────────┐
//!                          validate_parameters              validate_data
//!                                   │
//!                          validate_parameter (per value, per array element)
//! ```
//!
//! Validation is pure: no I/O, no shared state, and every violation is
//! collected as a [`ValidationError`] rather than returned as an `Err`.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod inputs;
pub mod spec;
pub mod types;
pub mod validate;
pub mod value;

// Internal utilities
pub mod observability;

pub use inputs::{InputFile, ToolInput};
pub use spec::{DataSpec, ParameterSpec, SpecFile, ToolSpec, ToolType};
pub use types::{Config, Error, Result};
pub use validate::{
    validate_data, validate_inputs, validate_inputs_with, validate_parameter, validate_parameters,
    ErrorKind, Field, ValidationError, ValidationReport,
};
