//! TypeScript const declaration builder.

use pac_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::{JsArray, JsObject};

#[derive(Debug, Clone)]
enum ConstValue {
    Array(JsArray),
    Object(JsObject, bool),
}

/// Builder for TypeScript const declarations.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: ConstValue,
}

impl Const {
    /// A const initialised with a multi-line array literal.
    pub fn array(name: impl Into<String>, value: JsArray) -> Self {
        Self::with_value(name, ConstValue::Array(value))
    }

    /// A const initialised with a multi-line object literal.
    pub fn object(name: impl Into<String>, value: JsObject, as_const: bool) -> Self {
        Self::with_value(name, ConstValue::Object(value, as_const))
    }

    fn with_value(name: impl Into<String>, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    fn head(&self) -> String {
        format!("export const {} =", self.name)
    }

    /// Build the const declaration as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let head = self.head();
        let fragment = match &self.value {
            ConstValue::Array(array) if array.is_empty() => {
                CodeFragment::line(format!("{head} {};", array.build_inline()))
            }
            ConstValue::Array(array) => CodeFragment::block(
                format!("{head} ["),
                array.body(),
                Some(format!("{};", array.close())),
            ),
            ConstValue::Object(object, as_const) => {
                let suffix = if *as_const { " as const;" } else { ";" };
                if object.is_empty() {
                    CodeFragment::line(format!("{head} {{}}{suffix}"))
                } else {
                    CodeFragment::block(
                        format!("{head} {{"),
                        object.body(),
                        Some(format!("}}{suffix}")),
                    )
                }
            }
        };
        vec![fragment]
    }
}
