//! Input document decoding — per-tool parameter values and dataset paths.

use crate::spec::ToolSpec;
use crate::types::{Error, Result};
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One concrete invocation of a tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolInput {
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    #[serde(rename = "data", default)]
    pub datasets: BTreeMap<String, String>,
}

impl ToolInput {
    /// Insert declared defaults for parameters the input leaves out.
    ///
    /// Provided values are never overwritten. Returns the number of defaults
    /// inserted. Validation does not call this; it belongs to whoever runs
    /// the tool.
    pub fn fill_defaults(&mut self, spec: &ToolSpec) -> usize {
        let mut filled = 0;
        for (name, param) in &spec.parameters {
            if let Some(default) = &param.default {
                if !self.parameters.contains_key(name) {
                    self.parameters.insert(name.clone(), default.clone());
                    filled += 1;
                }
            }
        }
        filled
    }
}

/// A decoded input document: tool name → [`ToolInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InputFile {
    pub tools: BTreeMap<String, ToolInput>,
}

impl InputFile {
    /// Decode a JSON input document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: InputFile = serde_json::from_str(raw).map_err(Error::InputParse)?;
        debug!(tools = file.tools.len(), "decoded input document");
        Ok(file)
    }

    /// Read and decode a JSON input document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        debug!(path = %path.display(), "loading input document");
        Self::from_json_str(&raw)
    }

    /// Look up the input for a tool by name.
    pub fn get_tool_input(&self, tool_name: &str) -> Result<&ToolInput> {
        self.tools.get(tool_name).ok_or_else(|| {
            Error::not_found(format!(
                "tool input {tool_name} was not found in the inputs file"
            ))
        })
    }

    /// JSON Schema describing the input document format.
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(InputFile)
    }
}
