//! Core utilities and types for the pac lexicon code generator.
//!
//! This crate provides the naming, inflection, configuration and file
//! writing primitives shared by the other pac crates.

mod config;
mod file;
mod inflect;
mod utils;

// Project configuration
pub use config::{CONFIG_FILE, PathsConfig, ProjectConfig};
// File operations
pub use file::{File, GeneratedFile, WriteResult};
// English inflection
pub use inflect::{pluralize, singularize};
// String utilities
pub use utils::{entity_name, is_identifier, to_pascal_case};
