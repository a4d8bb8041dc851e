//! TypeScript type alias, union and field builders.

use pac_codegen::builder::{CodeBuilder, CodeFragment, Renderable};
use pac_core::is_identifier;

/// Quote a string as a single-quoted TypeScript literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A property key, quoted when it is not a plain identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Collapse a description into one line safe for a `/** */` comment.
pub(crate) fn doc_line(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}

/// A field in a TypeScript object type or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn doc_opt(self, doc: Option<&str>) -> Self {
        match doc {
            Some(doc) if !doc.trim().is_empty() => self.doc(doc),
            _ => self,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// `name?: type` without a terminator.
    pub fn signature(&self) -> String {
        let optional = if self.optional { "?" } else { "" };
        format!("{}{}: {}", property_key(&self.name), optional, self.ty)
    }
}

impl Renderable for Field {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc_line(doc)));
        }
        fragments.push(CodeFragment::line(format!("{};", self.signature())));
        fragments
    }
}

/// Render fields as an inline object type (`{ a: string; b?: number }`).
pub fn inline_object(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let members: Vec<_> = fields.iter().map(Field::signature).collect();
    format!("{{ {} }}", members.join("; "))
}

/// Builder for TypeScript union types.
#[derive(Debug, Clone, Default)]
pub struct Union {
    members: Vec<String>,
}

impl Union {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a union of literal strings.
    pub fn of_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .fold(Self::new(), |u, v| u.member(string_literal(v.as_ref())))
    }

    /// Add a member type. Duplicates are dropped.
    pub fn member(mut self, ty: impl Into<String>) -> Self {
        let ty = ty.into();
        if !self.members.contains(&ty) {
            self.members.push(ty);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Build the union, or `fallback` when there are no members.
    pub fn build_or(&self, fallback: &str) -> String {
        if self.members.is_empty() {
            fallback.to_string()
        } else {
            self.members.join(" | ")
        }
    }

    /// Build the union; an empty union is `never`.
    pub fn build(&self) -> String {
        self.build_or("never")
    }
}

/// Builder for TypeScript type aliases (`export type Foo = ...;`).
#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    ty: String,
    doc: Option<String>,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
        }
    }

    pub fn doc_opt(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.filter(|d| !d.trim().is_empty()).map(str::to_string);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the alias as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc_line(doc)));
        }
        fragments.push(CodeFragment::line(format!(
            "export type {} = {};",
            self.name, self.ty
        )));
        fragments
    }
}
