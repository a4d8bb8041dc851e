//! TypeScript AST builders for generating types, functions, imports and constants.
//!
//! Every node implements [`Renderable`](pac_codegen::builder::Renderable) and
//! can be emitted through a `CodeBuilder` or added to a
//! [`CodeFile`](crate::CodeFile).

mod arrays;
mod consts;
mod fns;
mod imports;
mod interface;
mod objects;
mod types;

pub use arrays::JsArray;
pub use consts::Const;
pub use fns::{Fn, Param};
pub use imports::Import;
pub use interface::Interface;
pub use objects::JsObject;
pub use types::{Field, TypeAlias, Union, inline_object, property_key, string_literal};
