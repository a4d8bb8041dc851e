//! TypeScript emitters for the pac lexicon code generator.
//!
//! Three generators share the AST builders in [`ast`]:
//!
//! - [`TypeGenerator`] - type declarations for every definition of a lexicon
//! - [`ClientGenerator`] - CRUD helpers over `HabitatClient` for a record collection
//! - [`RouteConfigGenerator`] - the route configuration listing every client collection
//!
//! ```
//! use pac_codegen_typescript::{ClientGenerator, TypeGenerator};
//! use pac_lexicon::Lexicon;
//!
//! let lexicon = Lexicon::from_str_with_filename(
//!     r#"{"lexicon": 1, "id": "com.example.note", "defs": {"main": {
//!         "type": "record",
//!         "record": {"type": "object", "required": ["text"],
//!                    "properties": {"text": {"type": "string"}}}}}}"#,
//!     "note.json",
//! )?;
//!
//! let types = TypeGenerator::new(&lexicon).generate()?;
//! assert!(types.contains("export interface Note {"));
//!
//! let client = ClientGenerator::new(&lexicon)?.generate();
//! assert!(client.contains("export async function listNotes()"));
//! # Ok::<(), Box<pac_lexicon::Error>>(())
//! ```
//!
//! The [`files`] module wraps each generator as a
//! [`GeneratedFile`](pac_core::GeneratedFile).

mod clientgen;
mod code_file;
mod naming;
mod routegen;
mod type_mapper;
mod typegen;

pub mod ast;
pub mod files;

pub use clientgen::{ClientGenerator, DEFAULT_SDK_IMPORT, DEFAULT_TYPES_IMPORT_DIR};
pub use code_file::{CodeFile, RawCode};
pub use naming::{EntityNames, entity_from_client_file};
pub use routegen::{
    KnownLexicons, ROUTE_CONFIG, ROUTE_LEXICONS, Resolution, RouteConfigGenerator,
    discover_client_files, extract_collection_id,
};
pub use type_mapper::{ANY, TypeScriptTypeMapper};
pub use typegen::{Declaration, TypeGenerator};
