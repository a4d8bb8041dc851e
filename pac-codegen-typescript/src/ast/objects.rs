//! TypeScript object literal builder.

use pac_codegen::builder::CodeFragment;

use super::{property_key, string_literal};

/// Builder for object literals, rendered one property per line with a
/// trailing comma after each.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<String>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string property (value will be quoted).
    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.properties
            .push(format!("{}: {}", property_key(key), string_literal(value)));
        self
    }

    /// Add a property with a raw expression value.
    pub fn raw(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties
            .push(format!("{}: {}", property_key(key), value.into()));
        self
    }

    /// Add a shorthand property (`{ name }`).
    pub fn shorthand(mut self, name: impl Into<String>) -> Self {
        self.properties.push(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn body(&self) -> Vec<CodeFragment> {
        self.properties
            .iter()
            .map(|p| CodeFragment::line(format!("{p},")))
            .collect()
    }

    /// Wrap the object in a call: `<callee>({ ...props })<suffix>`.
    pub fn call(&self, callee: &str, suffix: &str) -> CodeFragment {
        if self.properties.is_empty() {
            return CodeFragment::line(format!("{callee}({{}}){suffix}"));
        }
        CodeFragment::block(
            format!("{callee}({{"),
            self.body(),
            Some(format!("}}){suffix}")),
        )
    }

    /// Build the object literal on a single line.
    pub fn build_inline(&self) -> String {
        if self.properties.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", self.properties.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use pac_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_inline() {
        let obj = JsObject::new()
            .string("collection", "com.example.note")
            .shorthand("rkey");
        assert_eq!(obj.build_inline(), "{ collection: 'com.example.note', rkey }");
        assert_eq!(JsObject::new().build_inline(), "{}");
    }

    #[test]
    fn test_call() {
        let call = JsObject::new()
            .string("collection", "com.example.note")
            .shorthand("record")
            .call("return client.createRecord<Note>", ";");

        let mut builder = CodeBuilder::typescript();
        builder.apply_fragment(call);
        assert_eq!(
            builder.build(),
            "return client.createRecord<Note>({\n  collection: 'com.example.note',\n  record,\n});\n"
        );
    }
}
