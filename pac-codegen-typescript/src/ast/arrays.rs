//! TypeScript array literal builder.

use pac_codegen::builder::CodeFragment;

use super::string_literal;

/// Builder for array literals, rendered one element per line.
///
/// Supports the `as const` TypeScript assertion for literal types.
#[derive(Debug, Clone, Default)]
pub struct JsArray {
    elements: Vec<String>,
    as_const: bool,
}

impl JsArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array from string values (will be quoted).
    pub fn from_strings<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        iter.into_iter().fold(Self::new(), |a, s| a.string(s.as_ref()))
    }

    /// Add a string element (will be quoted).
    pub fn string(mut self, value: &str) -> Self {
        self.elements.push(string_literal(value));
        self
    }

    /// Add a raw expression element.
    pub fn raw(mut self, value: impl Into<String>) -> Self {
        self.elements.push(value.into());
        self
    }

    /// Add the `as const` TypeScript assertion.
    pub fn as_const(mut self) -> Self {
        self.as_const = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element lines, comma-separated with no trailing comma.
    pub(crate) fn body(&self) -> Vec<CodeFragment> {
        let last = self.elements.len().saturating_sub(1);
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let sep = if i < last { "," } else { "" };
                CodeFragment::line(format!("{e}{sep}"))
            })
            .collect()
    }

    /// Closing text, including the `as const` assertion if enabled.
    pub(crate) fn close(&self) -> &'static str {
        if self.as_const { "] as const" } else { "]" }
    }

    /// Build the array literal on a single line.
    pub fn build_inline(&self) -> String {
        format!("[{}{}", self.elements.join(", "), self.close())
    }
}
