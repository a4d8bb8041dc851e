//! The recursive value schema shared by every definition kind.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Type keyword of a [`SchemaField`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FieldType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Bytes,
    CidLink,
    Blob,
    Array,
    Object,
    Params,
    Ref,
    Union,
    Token,
    Unknown,
    /// Any keyword not listed above
    Other(String),
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            "cid-link" => Self::CidLink,
            "blob" => Self::Blob,
            "array" => Self::Array,
            "object" => Self::Object,
            "params" => Self::Params,
            "ref" => Self::Ref,
            "union" => Self::Union,
            "token" => Self::Token,
            "unknown" => Self::Unknown,
            _ => Self::Other(s),
        }
    }
}

impl FieldType {
    /// The keyword as written in a lexicon.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::CidLink => "cid-link",
            Self::Blob => "blob",
            Self::Array => "array",
            Self::Object => "object",
            Self::Params => "params",
            Self::Ref => "ref",
            Self::Union => "union",
            Self::Token => "token",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any value description: a type keyword plus the keyword's metadata.
///
/// Format and bound fields are carried for completeness; emitters ignore them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,

    pub description: Option<String>,

    /// Object properties, in document order
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: IndexMap<String, SchemaField>,

    /// Array element schema
    pub items: Option<Box<SchemaField>>,

    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(rename = "$ref")]
    pub dollar_ref: Option<String>,

    /// Target of a `type: "ref"` field
    #[serde(rename = "ref")]
    pub ref_target: Option<String>,

    /// Members of a `type: "union"` field
    #[serde(default)]
    pub refs: Vec<String>,

    /// Closed set of literal values
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<Value>,

    /// Open set of suggested values
    #[serde(default)]
    pub known_values: Vec<String>,

    pub format: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub min_graphemes: Option<u64>,
    pub max_graphemes: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub default: Option<Value>,

    #[serde(rename = "const")]
    pub const_value: Option<Value>,
}

/// `null` property schemas are kept as untyped fields.
fn deserialize_properties<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, SchemaField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<SchemaField>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, field)| (name, field.unwrap_or_default()))
        .collect())
}

impl SchemaField {
    /// Create a field of the given type with no metadata.
    pub fn of_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    /// Whether `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// The reference this field points at, from either `$ref` or `ref`.
    pub fn reference(&self) -> Option<&str> {
        self.dollar_ref.as_deref().or(self.ref_target.as_deref())
    }

    /// Whether this field describes an object shape with properties.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Whether this field is an object-like type (`object` or `params`).
    pub fn is_object(&self) -> bool {
        matches!(
            self.field_type,
            Some(FieldType::Object) | Some(FieldType::Params)
        )
    }
}
