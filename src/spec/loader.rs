//! Specification document decoding.

use super::ToolSpec;
use crate::types::{Error, Result};
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A decoded specification document: tool name → [`ToolSpec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpecFile {
    #[serde(default)]
    pub tools: BTreeMap<String, ToolSpec>,
}

impl SpecFile {
    /// Decode a YAML specification document.
    ///
    /// Tool and parameter names are filled in from their map keys.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let mut file: SpecFile = serde_yaml::from_str(raw).map_err(Error::SpecParse)?;
        file.populate_names();
        debug!(tools = file.tools.len(), "decoded specification document");
        Ok(file)
    }

    /// Read and decode a YAML specification document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        debug!(path = %path.display(), "loading specification document");
        Self::from_yaml_str(&raw)
    }

    fn populate_names(&mut self) {
        for (tool_name, tool) in &mut self.tools {
            tool.name.clone_from(tool_name);
            for (param_name, param) in &mut tool.parameters {
                param.name.clone_from(param_name);
            }
        }
    }

    /// Look up a tool by name.
    pub fn get_tool(&self, tool_name: &str) -> Result<&ToolSpec> {
        self.tools.get(tool_name).ok_or_else(|| {
            Error::not_found(format!(
                "tool {tool_name} was not found in the given specification file"
            ))
        })
    }

    /// All tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// JSON Schema describing the specification document format.
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(SpecFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ToolType;

    const SPEC: &str = r#"
tools:
  foobar:
    title: Foobar
    description: A tool that does foo and bar
    parameters:
      foo_int:
        type: integer
        min: 0
        max: 10
      foo_names:
        type: string
        array: true
        optional: true
    data:
      foo_csv:
        path: /in/foo.csv
        extension: csv
  other:
    title: Other
"#;

    #[test]
    fn test_names_populated_from_keys() {
        let file = SpecFile::from_yaml_str(SPEC).unwrap();
        let tool = file.get_tool("foobar").unwrap();
        assert_eq!(tool.name, "foobar");
        assert_eq!(tool.parameters["foo_int"].name, "foo_int");
        assert_eq!(tool.parameters["foo_names"].name, "foo_names");
        assert_eq!(tool.parameters["foo_int"].tool_type, ToolType::Integer);
        assert!(tool.parameters["foo_names"].is_array);
        assert_eq!(tool.data["foo_csv"].extensions, vec!["csv"]);
    }

    #[test]
    fn test_key_overrides_declared_name() {
        let raw = "tools:\n  real:\n    name: fake\n    parameters:\n      p:\n        name: q\n        type: boolean\n";
        let file = SpecFile::from_yaml_str(raw).unwrap();
        let tool = file.get_tool("real").unwrap();
        assert_eq!(tool.name, "real");
        assert_eq!(tool.parameters["p"].name, "p");
    }

    #[test]
    fn test_tool_names_sorted() {
        let file = SpecFile::from_yaml_str(SPEC).unwrap();
        assert_eq!(file.tool_names(), vec!["foobar", "other"]);
    }

    #[test]
    fn test_get_tool_not_found() {
        let file = SpecFile::from_yaml_str(SPEC).unwrap();
        let err = file.get_tool("missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("tool missing was not found"));
    }

    #[test]
    fn test_malformed_document() {
        let err = SpecFile::from_yaml_str("tools: [unterminated").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SpecFile::load("/nonexistent/src/tool.yml").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_json_schema_mentions_tools() {
        let schema = serde_json::to_value(SpecFile::json_schema()).unwrap();
        assert!(schema["properties"]["tools"].is_object());
    }
}
