//! Lexicon document parsing and classification.
//!
//! A lexicon is parsed in two steps: [`LexiconDocument`] checks the header
//! and keeps the raw definitions, then [`Lexicon`] classifies each one into a
//! [`Definition`] and selects the primary definition emission is rooted at.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod definition;
mod document;
mod error;
mod lexicon;
mod schema;

use std::path::Path;

pub use definition::{
    Definition, DefinitionKind, ErrorSpec, IoBlock, MessageBlock, ProcedureDef, QueryDef,
    RecordDef, SubscriptionDef,
};
pub use document::{LexiconDocument, SUPPORTED_VERSION};
pub use error::{Error, Result, SourceContext};
pub use lexicon::{Lexicon, MAIN, Primary};
pub use schema::{FieldType, SchemaField};

/// Parse and classify a lexicon file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Lexicon> {
    Lexicon::from_file(path)
}

/// Parse and classify a lexicon from a string (uses "lexicon.json" as default filename)
pub fn parse_str(content: &str) -> Result<Lexicon> {
    Lexicon::from_str_with_filename(content, "lexicon.json")
}

/// Read, parse and classify a lexicon from any reader
pub fn parse_reader(reader: impl std::io::Read, filename: &str) -> Result<Lexicon> {
    Lexicon::from_document(LexiconDocument::from_reader(reader, filename)?)
}
