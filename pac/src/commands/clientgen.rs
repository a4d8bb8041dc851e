use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, bail};
use pac_codegen_typescript::{ClientGenerator, files::ClientTs};
use pac_core::ProjectConfig;
use pac_lexicon::Lexicon;

use super::{Phase, UnwrapOrExit};
use crate::{
    ops::{self, ClientgenOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ClientgenCommand {
    /// Lexicon JSON file of a record collection
    pub lexicon: PathBuf,

    /// Project root directory
    #[arg(short = 'r', long, default_value = ".")]
    pub project_root: PathBuf,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl ClientgenCommand {
    pub fn run(&self, debug: bool) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).unwrap_or_exit(Phase::Parse, debug);
        require_sdk(&config.sdk_path(&self.project_root)).unwrap_or_exit(Phase::Write, debug);

        let lexicon = Lexicon::from_file(&self.lexicon).unwrap_or_exit(Phase::Parse, debug);
        let generator = ClientGenerator::new(&lexicon)
            .unwrap_or_exit(Phase::Emit, debug)
            .with_sdk_import(config.sdk_import())
            .with_types_import_dir(config.types_import_dir());

        let report = ops::clientgen(
            ClientTs::new(generator),
            ClientgenOptions {
                project_root: &self.project_root,
                config: &config,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit(Phase::Write, debug);

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

/// Fail unless the SDK module exists.
fn require_sdk(sdk: &Path) -> Result<()> {
    if !sdk.is_file() {
        bail!(
            "project not initialized: SDK file not found: {} (run 'pac init' first)",
            sdk.display()
        );
    }
    Ok(())
}
