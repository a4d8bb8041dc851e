//! Import collection utilities.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Symbols imported from one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleImports {
    /// Symbols used only in type positions
    pub types: BTreeSet<String>,
    /// Symbols used as values
    pub values: BTreeSet<String>,
}

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order; symbols within a module are sorted.
///
/// # Example
///
/// ```
/// use pac_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("../sdk/atproto", "getUserDid");
/// imports.add_type("../sdk/atproto", "PutRecordResponse");
/// imports.add("../sdk/atproto", "getUserDid");
///
/// let (module, symbols) = imports.iter().next().unwrap();
/// assert_eq!(module, "../sdk/atproto");
/// assert_eq!(symbols.values.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, ModuleImports>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.entry(module).values.insert(symbol.to_string());
    }

    /// Add a type-only import from a module.
    pub fn add_type(&mut self, module: &str, symbol: &str) {
        self.entry(module).types.insert(symbol.to_string());
    }

    fn entry(&mut self, module: &str) -> &mut ModuleImports {
        self.imports.entry(module.to_string()).or_default()
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleImports)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_keep_insertion_order() {
        let mut imports = ImportCollector::new();
        imports.add("zeta", "z");
        imports.add("alpha", "a");

        let modules: Vec<_> = imports.iter().map(|(m, _)| m).collect();
        assert_eq!(modules, ["zeta", "alpha"]);
    }

    #[test]
    fn test_symbols_are_sorted_and_deduplicated() {
        let mut imports = ImportCollector::new();
        imports.add_type("sdk", "PutRecordResponse");
        imports.add_type("sdk", "GetRecordResponse");
        imports.add_type("sdk", "PutRecordResponse");

        let (_, symbols) = imports.iter().next().unwrap();
        let types: Vec<_> = symbols.types.iter().map(String::as_str).collect();
        assert_eq!(types, ["GetRecordResponse", "PutRecordResponse"]);
        assert!(symbols.values.is_empty());
    }

    #[test]
    fn test_values_and_types_share_a_module() {
        let mut imports = ImportCollector::new();
        imports.add("sdk", "HabitatClient");
        imports.add_type("sdk", "PutRecordResponse");
        imports.add_type("types", "Note");

        assert_eq!(imports.len(), 2);
        let (module, symbols) = imports.iter().next().unwrap();
        assert_eq!(module, "sdk");
        assert!(symbols.values.contains("HabitatClient"));
        assert!(symbols.types.contains("PutRecordResponse"));
    }
}
