//! `<entity>_types.ts` generator.

use std::path::{Path, PathBuf};

use pac_core::GeneratedFile;
use pac_lexicon::{Lexicon, Result};

use crate::{
    naming::{TS_EXT, TYPES_SUFFIX},
    typegen::{Declaration, TypeGenerator, render_module},
};

/// The types module of one lexicon.
///
/// Declarations are produced up front so a failing lexicon never reaches
/// the file system.
pub struct TypesTs {
    lexicon_id: String,
    declarations: Vec<Declaration>,
    file_name: String,
}

impl TypesTs {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        Ok(Self {
            lexicon_id: lexicon.id.clone(),
            declarations: TypeGenerator::new(lexicon).declarations()?,
            file_name: format!("{}{}.{}", lexicon.entity_name(), TYPES_SUFFIX, TS_EXT),
        })
    }

    /// Default output file name for a lexicon file (`note.json` -> `note_types.ts`).
    pub fn file_name_for(input: &Path) -> String {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{stem}{TYPES_SUFFIX}.{TS_EXT}")
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

impl GeneratedFile for TypesTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    fn render(&self) -> String {
        render_module(&self.lexicon_id, &self.declarations)
    }
}
