//! Application error types.
//!
//! These cover document loading and lookup only. Rule violations found while
//! validating an invocation are data, see [`crate::validate::ValidationError`].

use std::path::PathBuf;
use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the tool-spec crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool missing from a specification or input document.
    #[error("not found: {0}")]
    NotFound(String),

    /// The specification document could not be parsed.
    #[error("specification document could not be parsed: {0}")]
    SpecParse(#[source] serde_yaml::Error),

    /// The input document could not be parsed.
    #[error("input document could not be parsed: {0}")]
    InputParse(#[source] serde_json::Error),

    /// A document or config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience constructors
impl Error {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from decoding a document rather than from
    /// I/O or lookup.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::SpecParse(_) | Error::InputParse(_))
    }
}
