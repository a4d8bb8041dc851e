//! CodeFile abstraction for structured TypeScript file generation.
//!
//! Organizes a module into a header comment, imports and body
//! declarations, separated by blank lines.

use pac_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::Import;

/// A structured representation of a TypeScript file.
///
/// # Example
///
/// ```
/// use pac_codegen_typescript::{CodeFile, RawCode, ast::Import};
///
/// let code = CodeFile::new()
///     .header("// Generated. Do not edit.")
///     .import(Import::new("./sdk").named("getUserDid"))
///     .add(RawCode::new("const did = getUserDid();"))
///     .render();
///
/// assert_eq!(
///     code,
///     "// Generated. Do not edit.\n\nimport { getUserDid } from './sdk';\n\nconst did = getUserDid();\n"
/// );
/// ```
#[derive(Default)]
pub struct CodeFile {
    header: Vec<String>,
    imports: Vec<Import>,
    body: Vec<Vec<CodeFragment>>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header comment line.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Add an import statement.
    pub fn import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Add imports from an iterator.
    pub fn imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body
            .extend(nodes.into_iter().map(|node| node.to_fragments()));
        self
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        for line in &self.header {
            builder.push_line(line);
        }
        builder.push_blank();

        for import in &self.imports {
            builder.emit(import);
        }
        builder.push_blank();

        for fragments in &self.body {
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            builder.push_blank();
        }

        let mut code = builder.build();
        let trimmed = code.trim_end_matches('\n').len();
        code.truncate(trimmed);
        if !code.is_empty() {
            code.push('\n');
        }
        code
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.imports.is_empty() && self.body.is_empty()
    }
}

/// A raw code fragment that implements Renderable.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0.lines().map(CodeFragment::line).collect()
    }
}
