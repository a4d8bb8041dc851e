//! Lexicon to TypeScript type mapping for leaf types.

use pac_lexicon::{FieldType, SchemaField};
use serde_json::Value;

use crate::ast::{Union, string_literal};

/// Fallback for values the generator cannot describe more precisely.
pub const ANY: &str = "any";

/// Maps lexicon type keywords without structure (no properties, items or
/// references) to TypeScript types.
pub struct TypeScriptTypeMapper;

impl TypeScriptTypeMapper {
    /// Surface type of a type keyword.
    pub fn map_keyword(&self, field_type: &FieldType) -> &'static str {
        match field_type {
            FieldType::String | FieldType::Token => "string",
            FieldType::Integer | FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
            FieldType::Bytes => "Uint8Array",
            FieldType::CidLink => "{ $link: string }",
            FieldType::Object | FieldType::Params => "Record<string, any>",
            FieldType::Array => "any[]",
            FieldType::Blob
            | FieldType::Unknown
            | FieldType::Ref
            | FieldType::Union
            | FieldType::Other(_) => ANY,
        }
    }

    /// Map a leaf field, honouring `enum` and `const` literals.
    pub fn map_leaf(&self, field: &SchemaField) -> String {
        let Some(field_type) = &field.field_type else {
            return ANY.to_string();
        };

        if let Some(literal) = field.const_value.as_ref().and_then(literal_type) {
            return literal;
        }

        if !field.enum_values.is_empty()
            && matches!(
                field_type,
                FieldType::String | FieldType::Integer | FieldType::Number
            )
        {
            let union = field
                .enum_values
                .iter()
                .filter_map(literal_type)
                .fold(Union::new(), |u, literal| u.member(literal));
            return union.build_or(self.map_keyword(field_type));
        }

        self.map_keyword(field_type).to_string()
    }
}

/// TypeScript literal type for a JSON scalar.
fn literal_type(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(string_literal(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
