use std::{io::Read, path::Path, str::FromStr};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{Error, Result, error::SourceContext};

/// The only lexicon document version accepted.
pub const SUPPORTED_VERSION: u64 = 1;

/// A parsed lexicon document header with its raw definitions.
#[derive(Debug, Clone)]
pub struct LexiconDocument {
    /// Document schema version (always [`SUPPORTED_VERSION`])
    pub version: u64,
    /// Dotted collection identifier
    pub id: String,
    pub description: Option<String>,
    /// Raw definitions in document order
    pub defs: IndexMap<String, Value>,
    source: Option<SourceContext>,
}

impl PartialEq for LexiconDocument {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.id == other.id
            && self.description == other.description
            && self.defs == other.defs
    }
}

impl FromStr for LexiconDocument {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "lexicon.json")
    }
}

impl LexiconDocument {
    /// Parse a lexicon file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "read lexicon");
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Read a whole lexicon from `reader` and parse it
    pub fn from_reader(mut reader: impl Read, filename: &str) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| Box::new(Error::Read { source: e }))?;
        Self::from_str_with_filename(&content, filename)
    }

    /// Parse a lexicon from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let root: Value = serde_json::from_str(content).map_err(|e| ctx.json_error(e))?;

        let version = match root.get("lexicon") {
            Some(Value::Number(n)) if n.as_u64() == Some(SUPPORTED_VERSION) => SUPPORTED_VERSION,
            Some(other) => return Err(ctx.unsupported_version(other.to_string())),
            None => return Err(ctx.unsupported_version("none")),
        };

        let id = match root.get("id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => return Err(ctx.missing_id()),
        };

        let defs: IndexMap<String, Value> = match root.get("defs").and_then(Value::as_object) {
            Some(defs) if !defs.is_empty() => defs
                .iter()
                .map(|(name, def)| (name.clone(), def.clone()))
                .collect(),
            _ => return Err(ctx.missing_defs()),
        };

        let description = root
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        tracing::debug!(%id, defs = defs.len(), "parsed lexicon document");
        Ok(Self {
            version,
            id,
            description,
            defs,
            source: Some(ctx),
        })
    }

    /// The entity base name: the last dotted segment of the id, lowercased
    pub fn entity_name(&self) -> String {
        pac_core::entity_name(&self.id)
    }

    pub(crate) fn source(&self) -> Option<&SourceContext> {
        self.source.as_ref()
    }
}
