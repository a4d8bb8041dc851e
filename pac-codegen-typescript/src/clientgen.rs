//! CRUD client helpers for a record lexicon.

use pac_codegen::generation::ImportCollector;
use pac_lexicon::{Definition, Error, Lexicon, Result};

use crate::{
    ast::{Fn, Import, JsObject, Param},
    code_file::CodeFile,
    naming::EntityNames,
};

/// Default import path of the SDK module, relative to the client directory.
pub const DEFAULT_SDK_IMPORT: &str = "../sdk/atproto";

/// Default directory of the companion types modules, relative to the client
/// directory.
pub const DEFAULT_TYPES_IMPORT_DIR: &str = "../types";

/// Module providing the underlying repo wire types.
const ATPROTO_API: &str = "@atproto/api";

/// Emits the six helpers wrapping `HabitatClient` for one collection.
#[derive(Debug, Clone)]
pub struct ClientGenerator {
    names: EntityNames,
    sdk_import: String,
    types_import_dir: String,
}

impl ClientGenerator {
    /// Check that the primary definition is a record with a schema.
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let primary = lexicon.primary()?;
        let Definition::Record(record) = primary.def else {
            return Err(Box::new(Error::NotARecord {
                id: lexicon.id.clone(),
                kind: primary.def.type_name(),
            }));
        };
        if record.record.is_none() {
            return Err(Box::new(Error::MissingRecordSchema {
                id: lexicon.id.clone(),
            }));
        }

        tracing::debug!(id = %lexicon.id, primary = %primary.name, "generating client");
        Ok(Self {
            names: EntityNames::from_lexicon_id(&lexicon.id),
            sdk_import: DEFAULT_SDK_IMPORT.to_string(),
            types_import_dir: DEFAULT_TYPES_IMPORT_DIR.to_string(),
        })
    }

    pub fn with_sdk_import(mut self, module: impl Into<String>) -> Self {
        self.sdk_import = module.into();
        self
    }

    pub fn with_types_import_dir(mut self, dir: impl Into<String>) -> Self {
        self.types_import_dir = dir.into();
        self
    }

    pub fn names(&self) -> &EntityNames {
        &self.names
    }

    fn imports(&self) -> Vec<Import> {
        let mut imports = ImportCollector::new();
        for symbol in ["HabitatClient", "getDefaultAgent", "getUserDid"] {
            imports.add(&self.sdk_import, symbol);
        }
        for symbol in ["GetRecordResponse", "ListRecordsResponse", "PutRecordResponse"] {
            imports.add_type(&self.sdk_import, symbol);
        }
        for symbol in [
            "ComAtprotoRepoCreateRecord",
            "ComAtprotoRepoGetRecord",
            "ComAtprotoRepoListRecords",
        ] {
            imports.add_type(ATPROTO_API, symbol);
        }
        let types_module = format!(
            "{}/{}",
            self.types_import_dir.trim_end_matches('/'),
            self.names.types_module()
        );
        imports.add_type(&types_module, &self.names.type_name);
        Import::from_collector(&imports)
    }

    /// `async` helper that builds a client and delegates to `method`.
    fn helper(&self, name: String, doc: String, method: &str, args: JsObject) -> Fn {
        let call = args.call(
            &format!("return client.{}<{}>", method, self.names.type_name),
            ";",
        );
        Fn::new(name)
            .doc(doc)
            .async_()
            .body_line("const agent = getDefaultAgent();")
            .body_line("const did = getUserDid();")
            .body_line("const client = new HabitatClient(agent, did);")
            .body_node(&call)
    }

    /// The six helpers, in declaration order.
    pub fn functions(&self) -> Vec<Fn> {
        let names = &self.names;
        let entity = names.type_name.as_str();
        let collection = || JsObject::new().string("collection", &names.collection);

        vec![
            self.helper(
                names.create_fn(),
                format!("Create a {} record.", names.collection),
                "createRecord",
                collection().shorthand("record"),
            )
            .param(Param::new("record", entity))
            .returns("Promise<ComAtprotoRepoCreateRecord.Response>"),
            self.helper(
                names.get_fn(),
                format!("Fetch one {} record by key.", names.collection),
                "getRecord",
                collection().shorthand("rkey"),
            )
            .param(Param::new("rkey", "string"))
            .returns("Promise<ComAtprotoRepoGetRecord.Response>"),
            self.helper(
                names.list_fn(),
                format!("List {} records.", names.collection),
                "listRecords",
                collection(),
            )
            .returns("Promise<ComAtprotoRepoListRecords.Response>"),
            self.helper(
                names.put_private_fn(),
                format!("Write a private {} record.", names.collection),
                "putPrivateRecord",
                collection().shorthand("rkey").shorthand("record"),
            )
            .param(Param::new("record", entity))
            .param(Param::new("rkey", "string").optional())
            .returns("Promise<PutRecordResponse>"),
            self.helper(
                names.get_private_fn(),
                format!("Fetch one private {} record by key.", names.collection),
                "getPrivateRecord",
                collection().shorthand("rkey"),
            )
            .param(Param::new("rkey", "string"))
            .returns(format!("Promise<GetRecordResponse<{entity}>>")),
            self.helper(
                names.list_private_fn(),
                format!("List private {} records.", names.collection),
                "listPrivateRecords",
                collection(),
            )
            .returns(format!("Promise<ListRecordsResponse<{entity}>>")),
        ]
    }

    /// Render the client module.
    pub fn generate(&self) -> String {
        CodeFile::new()
            .header(format!(
                "// Generated client helpers for {}. Do not edit by hand.",
                self.names.collection
            ))
            .imports(self.imports())
            .add_all(self.functions())
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(id: &str, defs: &str) -> Lexicon {
        let src = format!(r#"{{"lexicon": 1, "id": "{id}", "defs": {defs}}}"#);
        Lexicon::from_str_with_filename(&src, "lexicon.json").unwrap()
    }

    const NOTE_DEFS: &str = r#"{"main": {"type": "record", "record": {"type": "object",
        "required": ["text"], "properties": {"text": {"type": "string"}}}}}"#;

    #[test]
    fn test_not_a_record() {
        let lex = lexicon("com.example.search", r#"{"main": {"type": "query"}}"#);
        let err = ClientGenerator::new(&lex).unwrap_err();
        match *err {
            Error::NotARecord { id, kind } => {
                assert_eq!(id, "com.example.search");
                assert_eq!(kind, "query");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_record_schema() {
        let lex = lexicon("com.example.note", r#"{"main": {"type": "record"}}"#);
        let err = ClientGenerator::new(&lex).unwrap_err();
        assert!(matches!(*err, Error::MissingRecordSchema { .. }));
    }

    #[test]
    fn test_function_names_in_order() {
        let lex = lexicon("com.example.note", NOTE_DEFS);
        let generator = ClientGenerator::new(&lex).unwrap();
        let names: Vec<_> = generator
            .functions()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "createNoteRecord",
                "getNoteRecord",
                "listNotes",
                "putPrivateNoteRecord",
                "getPrivateNoteRecord",
                "listPrivateNotes",
            ]
        );
    }

    #[test]
    fn test_every_call_is_typed_and_scoped() {
        let lex = lexicon("com.example.note", NOTE_DEFS);
        let code = ClientGenerator::new(&lex).unwrap().generate();
        assert_eq!(code.matches("collection: 'com.example.note',").count(), 6);
        for method in [
            "createRecord",
            "getRecord",
            "listRecords",
            "putPrivateRecord",
            "getPrivateRecord",
            "listPrivateRecords",
        ] {
            assert!(
                code.contains(&format!("return client.{method}<Note>({{")),
                "{method}"
            );
        }
    }

    #[test]
    fn test_custom_import_paths() {
        let lex = lexicon("com.example.note", NOTE_DEFS);
        let code = ClientGenerator::new(&lex)
            .unwrap()
            .with_sdk_import("../lib/sdk")
            .with_types_import_dir("../models/")
            .generate();
        assert!(code.contains("import { HabitatClient, getDefaultAgent, getUserDid } from '../lib/sdk';"));
        assert!(code.contains("import type { Note } from '../models/note_types';"));
    }

    #[test]
    fn test_no_stray_emissions() {
        let lex = lexicon("com.example.note", NOTE_DEFS);
        let code = ClientGenerator::new(&lex).unwrap().generate();
        assert!(!code.contains("console."));
        assert!(!code.contains("TODO"));
    }
}
