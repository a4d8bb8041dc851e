//! Routegen operation - route configuration from client modules.

use std::path::{Path, PathBuf};

use eyre::Result;
use pac_codegen_typescript::{RouteConfigGenerator, files::RouteConfigTs};

use super::emit_file;
use crate::reports::GenerateReport;

/// Options for the routegen operation.
pub struct RoutegenOptions<'a> {
    /// Client modules, in the order their collections should appear.
    pub files: &'a [PathBuf],
    /// Directory the output path is relative to.
    pub base: &'a Path,
    /// Output path of the route configuration module.
    pub output: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the routegen operation.
pub fn routegen(
    mut generator: RouteConfigGenerator,
    opts: RoutegenOptions,
) -> Result<GenerateReport> {
    let mut report = GenerateReport::new(format!("{} client module(s)", opts.files.len()));

    for path in opts.files {
        if generator.add_file(path)?.is_none() {
            report
                .warnings
                .push(format!("no collection id found in {}, skipped", path.display()));
        }
    }
    report.collections = generator.lexicons().to_vec();

    let file = RouteConfigTs::new(generator, opts.output);
    report.files.push(emit_file(&file, opts.base, opts.dry_run)?);
    Ok(report)
}
