mod clientgen;
mod completions;
mod routegen;
mod typegen;

use std::fmt;

use clap::{Parser, Subcommand};
use clientgen::ClientgenCommand;
use completions::CompletionsCommand;
use eyre::Result;
use routegen::RoutegenCommand;
use typegen::TypegenCommand;

/// Stage of a generation run, named in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Parse,
    Emit,
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Emit => "emit",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}

/// Extension trait for exiting on generation errors with a one-line message.
///
/// With `--debug` the full report follows the message.
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self, phase: Phase, debug: bool) -> T;
}

impl<T> UnwrapOrExit<T> for pac_lexicon::Result<T> {
    fn unwrap_or_exit(self, phase: Phase, debug: bool) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {} failed: {}", phase, e);
                if debug {
                    eprintln!("{:?}", miette::Report::new(*e));
                }
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for eyre::Result<T> {
    fn unwrap_or_exit(self, phase: Phase, debug: bool) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {} failed: {:#}", phase, e);
                if debug {
                    eprintln!("{:?}", e);
                }
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "pac")]
#[command(version)]
#[command(about = "Generate TypeScript types and client helpers from ATProto lexicons")]
pub(crate) struct Cli {
    /// Enable debug logging and full error reports
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Typegen(cmd) => cmd.run(self.debug),
            Commands::Clientgen(cmd) => cmd.run(self.debug),
            Commands::Routegen(cmd) => cmd.run(self.debug),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript types from a lexicon
    Typegen(TypegenCommand),

    /// Generate client helpers for a record lexicon
    Clientgen(ClientgenCommand),

    /// Generate the data route configuration from client modules
    Routegen(RoutegenCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
