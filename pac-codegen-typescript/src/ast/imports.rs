//! TypeScript import builder.

use pac_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportCollector,
};

use super::string_literal;

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Convert collected imports into statements.
    ///
    /// Each module yields a value import followed by a type-only import,
    /// skipping whichever is empty.
    pub fn from_collector(imports: &ImportCollector) -> Vec<Self> {
        let mut statements = Vec::new();
        for (module, symbols) in imports.iter() {
            if !symbols.values.is_empty() {
                let import = symbols
                    .values
                    .iter()
                    .fold(Self::new(module), |i, s| i.named(s));
                statements.push(import);
            }
            if !symbols.types.is_empty() {
                let import = symbols
                    .types
                    .iter()
                    .fold(Self::new(module).type_only(), |i, s| i.named(s));
                statements.push(import);
            }
        }
        statements
    }

    fn statement(&self) -> String {
        let from = string_literal(&self.from);
        if self.named.is_empty() {
            return format!("import {from};");
        }
        let type_kw = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from {};",
            type_kw,
            self.named.join(", "),
            from
        )
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_import() {
        let i = Import::new("../sdk/atproto")
            .named("HabitatClient")
            .named("getUserDid")
            .build();
        assert_eq!(
            i,
            "import { HabitatClient, getUserDid } from '../sdk/atproto';\n"
        );
    }

    #[test]
    fn test_type_only_import() {
        let i = Import::new("../types/note_types")
            .named("Note")
            .type_only()
            .build();
        assert_eq!(i, "import type { Note } from '../types/note_types';\n");
    }

    #[test]
    fn test_side_effect_import() {
        let i = Import::new("./polyfill").build();
        assert_eq!(i, "import './polyfill';\n");
    }

    #[test]
    fn test_from_collector_splits_values_and_types() {
        let mut imports = ImportCollector::new();
        imports.add_type("../sdk/atproto", "PutRecordResponse");
        imports.add("../sdk/atproto", "getUserDid");
        imports.add_type("@atproto/api", "ComAtprotoRepoGetRecord");

        let rendered: Vec<_> = Import::from_collector(&imports)
            .iter()
            .map(Import::build)
            .collect();
        assert_eq!(
            rendered,
            [
                "import { getUserDid } from '../sdk/atproto';\n",
                "import type { PutRecordResponse } from '../sdk/atproto';\n",
                "import type { ComAtprotoRepoGetRecord } from '@atproto/api';\n",
            ]
        );
    }
}
