//! Generation report shared by typegen, clientgen and routegen.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from one generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// What was generated from (lexicon id or client directory).
    pub source: String,

    /// Collection ids gathered by routegen.
    pub collections: Vec<String>,

    /// Non-fatal problems encountered.
    pub warnings: Vec<String>,

    /// Files written or previewed, in generation order.
    pub files: Vec<FileReport>,
}

/// A single generated file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// What happened to a generated file.
#[derive(Debug)]
pub enum FileOutcome {
    Created,
    Overwritten,
    /// Dry-run preview carrying the rendered content.
    Preview(String),
}

impl GenerateReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    fn is_preview(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.outcome, FileOutcome::Preview(_)))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if self.is_preview() {
            for file in &self.files {
                if let FileOutcome::Preview(content) = &file.outcome {
                    out.divider(&file.path.display().to_string());
                    out.preformatted(content.trim_end());
                }
            }
            out.divider("Summary");
            out.preformatted(&format!(
                "{} file(s) would be generated from {}",
                self.files.len(),
                self.source
            ));
            return;
        }

        out.key_value("Source", &self.source);

        if !self.collections.is_empty() {
            out.section(&format!("Collections ({})", self.collections.len()));
            for id in &self.collections {
                out.list_item(id);
            }
        }

        out.section("Generated");
        for file in &self.files {
            let path = file.path.display().to_string();
            match file.outcome {
                FileOutcome::Created => out.added_item(&path),
                FileOutcome::Overwritten => out.changed_item(&path),
                FileOutcome::Preview(_) => {}
            }
        }
    }
}
