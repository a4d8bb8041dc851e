//! Sidecar manifest recording which collection each generated client serves.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use pac_core::GeneratedFile;
use serde::Deserialize;

/// File name of the manifest, stored next to the client modules.
pub const CLIENT_MANIFEST_FILE: &str = "clients.toml";

/// Map from client module file name to lexicon collection id.
///
/// ```toml
/// "note_client.ts" = "com.example.note"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClientManifest {
    entries: BTreeMap<String, String>,
}

impl ClientManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest from a client directory. A missing file is empty.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CLIENT_MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        let manifest = Self::from_toml(&content)
            .wrap_err_with(|| format!("failed to parse '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), entries = manifest.len(), "loaded client manifest");
        Ok(manifest)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Record the collection of a client file, returning the previous one.
    pub fn insert(
        &mut self,
        file_name: impl Into<String>,
        collection: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(file_name.into(), collection.into())
    }

    /// Collection recorded for a client file name.
    pub fn collection_for(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GeneratedFile for ClientManifest {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(CLIENT_MANIFEST_FILE)
    }

    fn render(&self) -> String {
        let mut out = String::from(
            "# Generated by pac clientgen. Maps client modules to lexicon collections.\n",
        );
        for (file, collection) in &self.entries {
            out.push_str(&format!(
                "{} = {}\n",
                toml::Value::String(file.clone()),
                toml::Value::String(collection.clone())
            ));
        }
        out
    }
}
