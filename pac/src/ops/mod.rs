//! Core operations.
//!
//! This module contains the business logic for pac commands,
//! separated from CLI argument parsing and output rendering.

pub mod clientgen;
pub mod routegen;
pub mod typegen;

use std::path::Path;

use eyre::Result;
use pac_core::{GeneratedFile, WriteResult};

pub use clientgen::{ClientgenOptions, clientgen};
pub use routegen::{RoutegenOptions, routegen};
pub use typegen::{TypegenOptions, typegen};

use crate::reports::{FileOutcome, FileReport};

/// Write a rendered file under `base`, or capture it when previewing.
fn emit_file(file: &dyn GeneratedFile, base: &Path, dry_run: bool) -> Result<FileReport> {
    let path = file.path(base);
    let outcome = if dry_run {
        FileOutcome::Preview(file.render())
    } else {
        match file.write(base)? {
            WriteResult::Created => FileOutcome::Created,
            WriteResult::Overwritten => FileOutcome::Overwritten,
        }
    };
    Ok(FileReport { path, outcome })
}
