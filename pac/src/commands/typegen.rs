use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pac_codegen_typescript::files::TypesTs;
use pac_lexicon::Lexicon;

use super::{Phase, UnwrapOrExit};
use crate::{
    ops::{self, TypegenOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TypegenCommand {
    /// Lexicon JSON file
    pub lexicon: PathBuf,

    /// Output path (defaults to <lexicon dir>/<lexicon name>_types.ts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the generated module instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl TypegenCommand {
    pub fn run(&self, debug: bool) -> Result<()> {
        let lexicon = Lexicon::from_file(&self.lexicon).unwrap_or_exit(Phase::Parse, debug);
        let file = TypesTs::new(&lexicon).unwrap_or_exit(Phase::Emit, debug);

        let report = ops::typegen(
            &lexicon.id,
            file,
            TypegenOptions {
                input: &self.lexicon,
                output: self.output.as_deref(),
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit(Phase::Write, debug);

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
