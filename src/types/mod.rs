//! Core types for the tool-spec crate.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for logging and validation policy

mod config;
mod errors;

pub use config::{Config, ObservabilityConfig, ValidationConfig};
pub use errors::{Error, Result};
