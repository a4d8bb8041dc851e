use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use pac_codegen::generation::ClientManifest;
use pac_codegen_typescript::{KnownLexicons, RouteConfigGenerator, discover_client_files};
use pac_core::ProjectConfig;

use super::{Phase, UnwrapOrExit};
use crate::{
    ops::{self, RoutegenOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RoutegenCommand {
    /// Client modules to include (defaults to every *_client.ts in the api directory)
    pub files: Vec<PathBuf>,

    /// Project root directory
    #[arg(short = 'r', long, default_value = ".")]
    pub project_root: PathBuf,

    /// Output path (defaults to the configured route config path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the generated module instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl RoutegenCommand {
    pub fn run(&self, debug: bool) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).unwrap_or_exit(Phase::Parse, debug);
        let api_dir = config.api_dir(&self.project_root);

        let files = if self.files.is_empty() {
            discover_client_files(&api_dir).unwrap_or_exit(Phase::Parse, debug)
        } else {
            self.files.clone()
        };
        let manifest = ClientManifest::load(&api_dir).unwrap_or_exit(Phase::Parse, debug);

        let generator = RouteConfigGenerator::new()
            .with_manifest(manifest)
            .with_known_lexicons(KnownLexicons::with_extra(&config.lexicons));

        let (base, output) = match &self.output {
            Some(output) => (Path::new(""), output.as_path()),
            None => (self.project_root.as_path(), config.paths.route_config.as_path()),
        };

        let report = ops::routegen(
            generator,
            RoutegenOptions {
                files: &files,
                base,
                output,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit(Phase::Write, debug);

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
