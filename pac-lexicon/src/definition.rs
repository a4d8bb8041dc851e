use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result, SchemaField, error::SourceContext, schema::FieldType};

/// A classified lexicon definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Record(RecordDef),
    Query(QueryDef),
    Procedure(ProcedureDef),
    Subscription(SubscriptionDef),
    /// Any other `type`, kept as a plain value schema
    Schema(SchemaField),
}

/// Coarse kind of a [`Definition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Record,
    Query,
    Procedure,
    Subscription,
    Schema,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Record => "record",
            Self::Query => "query",
            Self::Procedure => "procedure",
            Self::Subscription => "subscription",
            Self::Schema => "schema",
        };
        f.write_str(name)
    }
}

/// A persistable entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordDef {
    pub description: Option<String>,
    /// Record key strategy (`tid`, `any`, `literal:self`, ...)
    pub key: Option<String>,
    /// Shape of the stored record
    pub record: Option<SchemaField>,
}

/// A read operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryDef {
    pub description: Option<String>,
    pub parameters: Option<SchemaField>,
    pub output: Option<IoBlock>,
    #[serde(default)]
    pub errors: Vec<ErrorSpec>,
}

/// A write operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcedureDef {
    pub description: Option<String>,
    pub parameters: Option<SchemaField>,
    pub input: Option<IoBlock>,
    pub output: Option<IoBlock>,
    #[serde(default)]
    pub errors: Vec<ErrorSpec>,
}

/// A streaming operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubscriptionDef {
    pub description: Option<String>,
    pub parameters: Option<SchemaField>,
    pub message: Option<MessageBlock>,
    #[serde(default)]
    pub errors: Vec<ErrorSpec>,
}

/// Body of an operation's `input` or `output`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IoBlock {
    #[serde(default)]
    pub encoding: String,
    pub description: Option<String>,
    pub schema: Option<SchemaField>,
}

/// Body of a subscription's `message`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageBlock {
    pub description: Option<String>,
    pub schema: Option<SchemaField>,
}

/// A named error an operation may return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorSpec {
    pub name: String,
    pub description: Option<String>,
}

impl Definition {
    /// Classify a raw definition object by its `type` field.
    pub fn classify(name: &str, value: &Value) -> Result<Self> {
        Self::classify_with(name, value, |name, reason| {
            Error::invalid_definition(name, reason)
        })
    }

    /// Classify with errors labelled in the lexicon source.
    pub(crate) fn classify_in(ctx: &SourceContext, name: &str, value: &Value) -> Result<Self> {
        Self::classify_with(name, value, |name, reason| {
            ctx.invalid_definition(name, reason)
        })
    }

    fn classify_with(
        name: &str,
        value: &Value,
        invalid: impl Fn(&str, String) -> Box<Error>,
    ) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(invalid(name, "definition must be an object".to_string()));
        };
        let Some(kind) = object.get("type").and_then(Value::as_str) else {
            return Err(invalid(name, "missing string field `type`".to_string()));
        };

        let parsed = match kind {
            "record" => serde_json::from_value(value.clone()).map(Self::Record),
            "query" => serde_json::from_value(value.clone()).map(Self::Query),
            "procedure" => serde_json::from_value(value.clone()).map(Self::Procedure),
            "subscription" => serde_json::from_value(value.clone()).map(Self::Subscription),
            _ => serde_json::from_value(value.clone()).map(Self::Schema),
        };
        parsed.map_err(|e| invalid(name, e.to_string()))
    }

    /// The coarse kind of this definition.
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Record(_) => DefinitionKind::Record,
            Self::Query(_) => DefinitionKind::Query,
            Self::Procedure(_) => DefinitionKind::Procedure,
            Self::Subscription(_) => DefinitionKind::Subscription,
            Self::Schema(_) => DefinitionKind::Schema,
        }
    }

    /// The `type` keyword this definition was declared with.
    pub fn type_name(&self) -> String {
        match self {
            Self::Schema(field) => field
                .field_type
                .as_ref()
                .map(FieldType::to_string)
                .unwrap_or_else(|| "schema".to_string()),
            other => other.kind().to_string(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Record(def) => def.description.as_deref(),
            Self::Query(def) => def.description.as_deref(),
            Self::Procedure(def) => def.description.as_deref(),
            Self::Subscription(def) => def.description.as_deref(),
            Self::Schema(field) => field.description.as_deref(),
        }
    }

    /// Whether this is an operation (query, procedure or subscription).
    pub fn is_operation(&self) -> bool {
        matches!(
            self.kind(),
            DefinitionKind::Query | DefinitionKind::Procedure | DefinitionKind::Subscription
        )
    }

    pub fn as_record(&self) -> Option<&RecordDef> {
        match self {
            Self::Record(def) => Some(def),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_classify_record() {
        let def = Definition::classify(
            "main",
            &json!({
                "type": "record",
                "key": "tid",
                "record": {
                    "type": "object",
                    "required": ["text"],
                    "properties": {"text": {"type": "string"}}
                }
            }),
        )
        .unwrap();

        let record = def.as_record().unwrap();
        assert_eq!(record.key.as_deref(), Some("tid"));
        assert!(record.record.as_ref().unwrap().is_required("text"));
        assert_eq!(def.kind(), DefinitionKind::Record);
    }

    #[test]
    fn test_classify_procedure_with_errors() {
        let def = Definition::classify(
            "createItem",
            &json!({
                "type": "procedure",
                "input": {"encoding": "application/json", "schema": {"type": "object"}},
                "errors": [{"name": "InvalidName"}, {"name": "AlreadyExists", "description": "taken"}]
            }),
        )
        .unwrap();

        let Definition::Procedure(procedure) = &def else {
            panic!("expected procedure, got {def:?}");
        };
        assert_eq!(procedure.input.as_ref().unwrap().encoding, "application/json");
        assert!(procedure.output.is_none());
        let names: Vec<_> = procedure.errors.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["InvalidName", "AlreadyExists"]);
        assert!(def.is_operation());
    }

    #[test]
    fn test_classify_subscription_message() {
        let def = Definition::classify(
            "subscribe",
            &json!({"type": "subscription", "message": {"schema": {"type": "union", "refs": ["#a"]}}}),
        )
        .unwrap();

        let Definition::Subscription(sub) = def else {
            panic!("expected subscription");
        };
        let schema = sub.message.unwrap().schema.unwrap();
        assert_eq!(schema.refs, ["#a"]);
    }

    #[test]
    fn test_unknown_type_falls_through_to_schema() {
        let def = Definition::classify("weird", &json!({"type": "permission-set"})).unwrap();
        assert_eq!(def.kind(), DefinitionKind::Schema);
        assert_eq!(def.type_name(), "permission-set");
    }

    #[test]
    fn test_missing_type_is_invalid() {
        let err = Definition::classify("main", &json!({"description": "no type"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid definition 'main': missing string field `type`"
        );
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = Definition::classify("main", &json!("record")).unwrap_err();
        assert!(matches!(*err, Error::InvalidDefinition { .. }));
    }

    #[test]
    fn test_type_names() {
        let query = Definition::classify("q", &json!({"type": "query"})).unwrap();
        let token = Definition::classify("t", &json!({"type": "token"})).unwrap();
        assert_eq!(query.type_name(), "query");
        assert_eq!(token.type_name(), "token");
    }
}
