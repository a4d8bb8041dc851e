//! Typegen operation - types module from a lexicon.

use std::path::Path;

use eyre::{Result, eyre};
use pac_codegen_typescript::files::TypesTs;

use super::emit_file;
use crate::reports::GenerateReport;

/// Options for the typegen operation.
pub struct TypegenOptions<'a> {
    /// Lexicon file the types were generated from.
    pub input: &'a Path,
    /// Explicit output path; defaults to `<input dir>/<input stem>_types.ts`.
    pub output: Option<&'a Path>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the typegen operation.
pub fn typegen(lexicon_id: &str, file: TypesTs, opts: TypegenOptions) -> Result<GenerateReport> {
    let (base, file) = match opts.output {
        Some(output) => {
            let name = output
                .file_name()
                .ok_or_else(|| eyre!("output path '{}' has no file name", output.display()))?;
            (
                parent_dir(output),
                file.with_file_name(name.to_string_lossy()),
            )
        }
        None => (
            parent_dir(opts.input),
            file.with_file_name(TypesTs::file_name_for(opts.input)),
        ),
    };

    let mut report = GenerateReport::new(lexicon_id);
    report.files.push(emit_file(&file, base, opts.dry_run)?);
    Ok(report)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
