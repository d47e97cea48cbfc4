//! Tool specification model — typed parameter and data contracts.
//!
//! A [`ToolSpec`] is decoded once from the specification document and then
//! only read. Map keys double as parameter and tool names; the loader copies
//! them into the `name` fields.

mod loader;

pub use loader::SpecFile;

use crate::value::ValueKind;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Tool types
// =============================================================================

/// Logical parameter type declared in the specification.
///
/// Unrecognised tags are kept verbatim in [`ToolType::Unknown`]; such a
/// parameter accepts no value at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolType {
    String,
    Integer,
    Float,
    Boolean,
    Enum,
    Datetime,
    Date,
    Time,
    Asset,
    Unknown(String),
}

impl ToolType {
    pub fn as_str(&self) -> &str {
        match self {
            ToolType::String => "string",
            ToolType::Integer => "integer",
            ToolType::Float => "float",
            ToolType::Boolean => "boolean",
            ToolType::Enum => "enum",
            ToolType::Datetime => "datetime",
            ToolType::Date => "date",
            ToolType::Time => "time",
            ToolType::Asset => "asset",
            ToolType::Unknown(tag) => tag,
        }
    }

    /// The value kind this type is checked against.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ToolType::String
            | ToolType::Asset
            | ToolType::Enum
            | ToolType::Datetime
            | ToolType::Date
            | ToolType::Time => ValueKind::String,
            ToolType::Integer => ValueKind::Integer,
            ToolType::Float => ValueKind::Float,
            ToolType::Boolean => ValueKind::Boolean,
            ToolType::Unknown(_) => ValueKind::Unknown,
        }
    }

    /// Whether a value classified as `kind` satisfies this type.
    ///
    /// Floats accept whole numbers as well.
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match (self.value_kind(), kind) {
            (ValueKind::Unknown, _) => false,
            (ValueKind::Float, ValueKind::Integer) => true,
            (expected, actual) => expected == actual,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ToolType::Integer | ToolType::Float)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, ToolType::Datetime | ToolType::Date | ToolType::Time)
    }
}

impl Default for ToolType {
    fn default() -> Self {
        ToolType::Unknown(String::new())
    }
}

impl From<String> for ToolType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "string" => ToolType::String,
            "integer" => ToolType::Integer,
            "float" => ToolType::Float,
            "boolean" => ToolType::Boolean,
            "enum" => ToolType::Enum,
            "datetime" => ToolType::Datetime,
            "date" => ToolType::Date,
            "time" => ToolType::Time,
            "asset" => ToolType::Asset,
            _ => ToolType::Unknown(tag),
        }
    }
}

impl From<ToolType> for String {
    fn from(tool_type: ToolType) -> Self {
        match tool_type {
            ToolType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for ToolType {
    fn schema_name() -> String {
        "ToolType".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

// =============================================================================
// Parameter specification
// =============================================================================

/// Contract for a single named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", default)]
    pub tool_type: ToolType,
    #[serde(rename = "array", default, skip_serializing_if = "is_false")]
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Enum members; only meaningful for [`ToolType::Enum`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Inclusive lower bound for numeric types. `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound for numeric types. `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, tool_type: ToolType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tool_type,
            is_array: false,
            default: None,
            values: Vec::new(),
            min: None,
            max: None,
            optional: false,
        }
    }

    /// A parameter is mandatory unless it is optional or carries a default.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }

    /// Type as written in diagnostics, e.g. `integer` or `[]string`.
    pub fn display_type(&self) -> String {
        if self.is_array {
            format!("[]{}", self.tool_type)
        } else {
            self.tool_type.to_string()
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

// =============================================================================
// Data specification
// =============================================================================

/// Contract for a named dataset (an input file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DataSpec {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    /// Accepted file extensions. Empty accepts any file.
    #[serde(
        rename = "extension",
        alias = "extensions",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<OneOrMany>")]
    pub extensions: Vec<String>,
}

impl DataSpec {
    /// Extensions lowercased with a leading dot, in declaration order.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect()
    }
}

/// `extension: csv` and `extension: [csv, txt]` are both accepted.
#[derive(Deserialize, JsonSchema)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(ext)) => vec![ext],
        Some(OneOrMany::Many(exts)) => exts,
    })
}

// =============================================================================
// Tool specification
// =============================================================================

/// Declarative contract for one tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParameterSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, DataSpec>,
}

impl ToolSpec {
    /// One-line usage summary.
    ///
    /// Format: `- tool(param1: type, param2?: []type): title`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|(name, p)| {
                let optional = if p.is_required() { "" } else { "?" };
                format!("{}{}: {}", name, optional, p.display_type())
            })
            .collect();

        let summary = if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        };

        format!("- {}({}): {}", self.name, params.join(", "), summary)
    }

    /// Names of all declared parameters, sorted.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }
}
