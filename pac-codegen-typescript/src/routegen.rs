//! Route configuration aggregated from generated client modules.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use eyre::{Result, WrapErr};
use pac_codegen::generation::ClientManifest;
use regex::Regex;

use crate::{
    ast::{Const, JsArray, JsObject},
    code_file::CodeFile,
    naming::entity_from_client_file,
};

/// Name of the exported tuple of collection ids.
pub const ROUTE_LEXICONS: &str = "DATA_ROUTE_LEXICONS";

/// Name of the exported config object.
pub const ROUTE_CONFIG: &str = "DATA_ROUTE_CONFIG";

static COLLECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"collection:\s*['"]([^'"]+)['"]"#).expect("collection pattern is valid")
});

/// First `collection: '<id>'` occurrence in a client module.
pub fn extract_collection_id(source: &str) -> Option<&str> {
    source.lines().find_map(|line| {
        COLLECTION_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Entity name to lexicon id table used when a client file names no
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownLexicons {
    entries: BTreeMap<String, String>,
}

impl Default for KnownLexicons {
    fn default() -> Self {
        let entries = [
            ("event", "community.lexicon.calendar.event"),
            ("note", "dev.eagraf.note"),
        ]
        .into_iter()
        .map(|(entity, id)| (entity.to_string(), id.to_string()))
        .collect();
        Self { entries }
    }
}

impl KnownLexicons {
    /// Built-in entries extended (or overridden) by `extra`.
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut known = Self::default();
        for (entity, id) in extra {
            known.entries.insert(entity.to_lowercase(), id.clone());
        }
        known
    }

    pub fn get(&self, entity: &str) -> Option<&str> {
        self.entries.get(entity).map(String::as_str)
    }
}

/// Where a collection id was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Manifest,
    Source,
    Fallback,
}

/// Collects collection ids from client modules, in input order.
#[derive(Debug, Default)]
pub struct RouteConfigGenerator {
    manifest: ClientManifest,
    known: KnownLexicons,
    lexicons: Vec<String>,
}

impl RouteConfigGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: ClientManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_known_lexicons(mut self, known: KnownLexicons) -> Self {
        self.known = known;
        self
    }

    /// Resolve the collection of a client module from its text.
    ///
    /// Returns `None` when nothing matched, in which case the file is
    /// skipped.
    pub fn resolve(&self, file_name: &str, source: &str) -> Option<(String, Resolution)> {
        if let Some(id) = self.manifest.collection_for(file_name) {
            return Some((id.to_string(), Resolution::Manifest));
        }
        if let Some(id) = extract_collection_id(source) {
            return Some((id.to_string(), Resolution::Source));
        }
        self.known
            .get(&entity_from_client_file(file_name))
            .map(|id| (id.to_string(), Resolution::Fallback))
    }

    /// Add one client module.
    ///
    /// Returns how its collection was found, or `None` if the file was
    /// skipped. Ids already collected are not added again.
    pub fn add_source(&mut self, file_name: &str, source: &str) -> Option<Resolution> {
        let Some((id, resolution)) = self.resolve(file_name, source) else {
            tracing::warn!(file = %file_name, "no collection id found, skipping");
            return None;
        };
        tracing::debug!(file = %file_name, %id, ?resolution, "resolved collection");

        if !self.lexicons.contains(&id) {
            self.lexicons.push(id);
        }
        Some(resolution)
    }

    /// Read and add a client module from disk.
    pub fn add_file(&mut self, path: &Path) -> Result<Option<Resolution>> {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read client module '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.add_source(&file_name, &source))
    }

    /// Collection ids in first-seen order.
    pub fn lexicons(&self) -> &[String] {
        &self.lexicons
    }

    /// Render the route configuration module.
    pub fn generate(&self) -> String {
        let tuple = JsArray::from_strings(&self.lexicons).as_const();
        let config = JsObject::new().raw("lexicons", ROUTE_LEXICONS);

        CodeFile::new()
            .header("// Generated by pac routegen. Do not edit by hand.")
            .header("// Lexicon collections exposed to the data debugger.")
            .add(Const::array(ROUTE_LEXICONS, tuple))
            .add(Const::object(ROUTE_CONFIG, config, true))
            .render()
    }
}

/// Every `*_client.ts` module in `dir`, sorted by file name.
pub fn discover_client_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_client = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("_client.ts"));
        if is_client && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_extract_collection_id() {
        let src = "import x from 'y';\n  collection: 'com.example.note',\n  collection: 'other',\n";
        assert_eq!(extract_collection_id(src), Some("com.example.note"));
        assert_eq!(
            extract_collection_id(r#"{ collection:"com.calendar.event" }"#),
            Some("com.calendar.event")
        );
        assert_eq!(extract_collection_id("const x = 1;"), None);
    }

    #[test]
    fn test_dedupes_in_input_order() {
        let mut generator = RouteConfigGenerator::new();
        generator.add_source("note_client.ts", "collection: 'com.example.note',");
        generator.add_source("event_client.ts", "collection: 'com.calendar.event',");
        generator.add_source("note_client.ts", "collection: 'com.example.note',");
        assert_eq!(generator.lexicons(), ["com.example.note", "com.calendar.event"]);
    }

    #[test]
    fn test_fallback_by_entity_name() {
        let mut generator = RouteConfigGenerator::new();
        assert_eq!(
            generator.add_source("event_client.ts", "// no collection here"),
            Some(Resolution::Fallback)
        );
        assert_eq!(generator.add_source("unknown_client.ts", ""), None);
        assert_eq!(generator.lexicons(), ["community.lexicon.calendar.event"]);
    }

    #[test]
    fn test_configured_fallback_overrides_builtin() {
        let extra = BTreeMap::from([("note".to_string(), "com.example.note".to_string())]);
        let generator =
            RouteConfigGenerator::new().with_known_lexicons(KnownLexicons::with_extra(&extra));
        assert_eq!(
            generator.resolve("note_client.ts", ""),
            Some(("com.example.note".to_string(), Resolution::Fallback))
        );
    }

    #[test]
    fn test_manifest_wins_over_source() {
        let mut manifest = ClientManifest::new();
        manifest.insert("note_client.ts", "dev.eagraf.note");
        let generator = RouteConfigGenerator::new().with_manifest(manifest);
        assert_eq!(
            generator.resolve("note_client.ts", "collection: 'com.example.note'"),
            Some(("dev.eagraf.note".to_string(), Resolution::Manifest))
        );
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(
            RouteConfigGenerator::new().generate(),
            "// Generated by pac routegen. Do not edit by hand.\n\
             // Lexicon collections exposed to the data debugger.\n\
             \n\
             export const DATA_ROUTE_LEXICONS = [] as const;\n\
             \n\
             export const DATA_ROUTE_CONFIG = {\n  lexicons: DATA_ROUTE_LEXICONS,\n} as const;\n"
        );
    }

    #[test]
    fn test_discover_client_files_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["story_client.ts", "event_client.ts", "helpers.ts", "clients.toml"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }
        let files = discover_client_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["event_client.ts", "story_client.ts"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(discover_client_files(&temp.path().join("api")).unwrap().is_empty());
    }
}
