//! Clientgen operation - client module plus sidecar manifest entry.

use std::path::Path;

use eyre::Result;
use pac_codegen::generation::ClientManifest;
use pac_codegen_typescript::files::ClientTs;
use pac_core::ProjectConfig;

use super::emit_file;
use crate::reports::GenerateReport;

/// Options for the clientgen operation.
pub struct ClientgenOptions<'a> {
    pub project_root: &'a Path,
    pub config: &'a ProjectConfig,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the clientgen operation.
///
/// The client module lands in the api directory and its collection is
/// recorded in the manifest next to it, keeping every other entry. The
/// manifest is read before anything is written.
pub fn clientgen(file: ClientTs, opts: ClientgenOptions) -> Result<GenerateReport> {
    let api_dir = opts.config.api_dir(opts.project_root);
    let mut report = GenerateReport::new(file.collection());

    let mut manifest = ClientManifest::load(&api_dir)?;
    let file_name = file.file_name();
    if let Some(previous) = manifest.insert(file_name.as_str(), file.collection()) {
        if previous != file.collection() {
            report.warnings.push(format!(
                "{} previously served {}, now {}",
                file_name,
                previous,
                file.collection()
            ));
        }
    }
    report.files.push(emit_file(&file, &api_dir, opts.dry_run)?);
    report.files.push(emit_file(&manifest, &api_dir, opts.dry_run)?);

    Ok(report)
}
