//! Project configuration loaded from an optional `pac.toml`.

use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

use eyre::{Result, WrapErr};
use serde::Deserialize;

/// File name of the project configuration, relative to the project root.
pub const CONFIG_FILE: &str = "pac.toml";

/// Root of `pac.toml`.
///
/// Every key is optional; a project without the file uses the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Extra `entity name -> lexicon id` entries for route-config fallback
    #[serde(default)]
    pub lexicons: BTreeMap<String, String>,
}

/// Project-relative locations of the SDK and generated output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// SDK module that `clientgen` requires to exist
    pub sdk: PathBuf,
    /// Directory for generated client modules
    pub api: PathBuf,
    /// Directory holding the companion `<entity>_types` modules
    pub types: PathBuf,
    /// Output path of the route configuration module
    pub route_config: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sdk: PathBuf::from("src/sdk/atproto.ts"),
            api: PathBuf::from("src/api"),
            types: PathBuf::from("src/types"),
            route_config: PathBuf::from("src/config/data_routes.ts"),
        }
    }
}

impl ProjectConfig {
    /// Load `pac.toml` from the project root, falling back to defaults when
    /// the file does not exist.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no project config, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        let config = Self::from_toml(&content)
            .wrap_err_with(|| format!("failed to parse '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Absolute location of the SDK module.
    pub fn sdk_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.sdk)
    }

    /// Absolute location of the client output directory.
    pub fn api_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.api)
    }

    /// Absolute location of the route configuration module.
    pub fn route_config_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.route_config)
    }

    /// Import specifier of the SDK module as seen from a client module.
    pub fn sdk_import(&self) -> String {
        relative_module(&self.paths.api, &self.paths.sdk)
    }

    /// Import specifier of the types directory as seen from a client module.
    pub fn types_import_dir(&self) -> String {
        relative_module(&self.paths.api, &self.paths.types)
    }
}

/// Relative module specifier from directory `from` to `to`, without file
/// extension (`src/api` -> `src/sdk/atproto.ts` gives `../sdk/atproto`).
fn relative_module(from: &Path, to: &Path) -> String {
    let from: Vec<_> = normal_components(from);
    let to_path = to.with_extension("");
    let to: Vec<_> = normal_components(&to_path);

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(to[common..].iter().cloned());

    match parts.first().map(String::as_str) {
        Some("..") => parts.join("/"),
        Some(_) => format!("./{}", parts.join("/")),
        None => ".".to_string(),
    }
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
