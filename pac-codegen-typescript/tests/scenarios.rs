//! End-to-end generation scenarios, from lexicon text to written modules.

use std::path::Path;

use pac_codegen::generation::ClientManifest;
use pac_codegen_typescript::{
    ClientGenerator, KnownLexicons, RouteConfigGenerator, TypeGenerator,
    files::{ClientTs, RouteConfigTs, TypesTs},
};
use pac_core::{GeneratedFile, WriteResult};
use pac_lexicon::{Error, Lexicon};
use tempfile::TempDir;

fn record_lexicon(id: &str) -> Lexicon {
    let src = format!(
        r#"{{"lexicon": 1, "id": "{id}", "defs": {{"main": {{"type": "record",
            "record": {{"type": "object", "properties": {{"title": {{"type": "string"}}}}}}}}}}}}"#
    );
    Lexicon::from_str_with_filename(&src, "lexicon.json").unwrap()
}

#[test]
fn test_story_pluralization() {
    let client = ClientGenerator::new(&record_lexicon("com.example.story"))
        .unwrap()
        .generate();
    assert!(client.contains("export async function listStories()"));
    assert!(client.contains("export async function listPrivateStories()"));
    assert!(!client.contains("listStorys"));
}

#[test]
fn test_deep_id_client() {
    let client = ClientGenerator::new(&record_lexicon("app.bsky.feed.post"))
        .unwrap()
        .generate();
    assert!(client.contains("import type { Post } from '../types/post_types';"));
    assert!(client.contains("export async function createPostRecord(record: Post)"));
    assert!(client.contains("collection: 'app.bsky.feed.post',"));
}

#[test]
fn test_not_a_record_writes_nothing() {
    let lexicon = Lexicon::from_str_with_filename(
        r#"{"lexicon": 1, "id": "com.example.search", "defs": {"main": {"type": "query",
            "output": {"encoding": "application/json", "schema": {"type": "object", "properties": {}}}}}}"#,
        "search.json",
    )
    .unwrap();
    let temp = TempDir::new().unwrap();
    let api = temp.path().join("src/api");
    std::fs::create_dir_all(&api).unwrap();
    std::fs::write(api.join("search_client.ts"), "// previous\n").unwrap();

    let err = ClientGenerator::new(&lexicon)
        .map(|generator| ClientTs::new(generator).write(&api))
        .unwrap_err();
    assert!(matches!(*err, Error::NotARecord { .. }));
    assert_eq!(std::fs::read_dir(&api).unwrap().count(), 1);
    assert_eq!(
        std::fs::read_to_string(api.join("search_client.ts")).unwrap(),
        "// previous\n"
    );
}

#[test]
fn test_procedure_with_errors() {
    let lexicon = Lexicon::from_str_with_filename(
        r#"{
          "lexicon": 1,
          "id": "com.test.procedure",
          "defs": {
            "createItem": {
              "type": "procedure",
              "input": {"encoding": "application/json", "schema": {
                "type": "object", "required": ["name"],
                "properties": {"name": {"type": "string"}}}},
              "output": {"encoding": "application/json", "schema": {
                "type": "object",
                "properties": {"id": {"type": "string"}}}},
              "errors": [{"name": "InvalidName"}, {"name": "AlreadyExists"}]
            }
          }
        }"#,
        "procedure.json",
    )
    .unwrap();

    let types = TypeGenerator::new(&lexicon).generate().unwrap();
    assert_eq!(
        types,
        "// Generated TypeScript types for com.test.procedure. Do not edit by hand.\n\
         \n\
         export interface CreateItemInput {\n  name: string;\n}\n\
         \n\
         export interface CreateItemOutput {\n  id?: string;\n}\n\
         \n\
         export type CreateItemError = 'InvalidName' | 'AlreadyExists';\n"
    );
}

#[test]
fn test_failed_emit_leaves_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("note_types.ts");
    std::fs::write(&target, "// previous\n").unwrap();

    let lexicon = Lexicon::from_str_with_filename(
        r##"{"lexicon": 1, "id": "com.example.note", "defs": {"main": {"type": "record",
            "record": {"type": "object", "properties": {"x": {"type": "ref", "ref": "#nope"}}}}}}"##,
        "note.json",
    )
    .unwrap();

    assert!(TypesTs::new(&lexicon).is_err());
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "// previous\n");
}

#[test]
fn test_types_and_client_files() {
    let temp = TempDir::new().unwrap();
    let lexicon = record_lexicon("com.example.note");

    let types = TypesTs::new(&lexicon).unwrap();
    assert_eq!(types.write(&temp.path().join("src/types")).unwrap(), WriteResult::Created);

    let client = ClientTs::new(ClientGenerator::new(&lexicon).unwrap());
    let api = temp.path().join("src/api");
    assert_eq!(client.write(&api).unwrap(), WriteResult::Created);
    assert_eq!(client.write(&api).unwrap(), WriteResult::Overwritten);

    assert!(temp.path().join("src/types/note_types.ts").is_file());
    let written = std::fs::read_to_string(api.join("note_client.ts")).unwrap();
    assert!(written.starts_with("// Generated client helpers for com.example.note."));
}

#[test]
fn test_route_config_from_client_files() {
    let temp = TempDir::new().unwrap();
    let api = temp.path().join("src/api");

    for id in ["com.example.note", "com.calendar.event"] {
        let client = ClientTs::new(ClientGenerator::new(&record_lexicon(id)).unwrap());
        client.write(&api).unwrap();
    }
    std::fs::write(api.join("legacy_client.ts"), "export {};\n").unwrap();

    let mut generator = RouteConfigGenerator::new()
        .with_known_lexicons(KnownLexicons::default());
    for file in ["note_client.ts", "event_client.ts", "legacy_client.ts", "note_client.ts"] {
        generator.add_file(&api.join(file)).unwrap();
    }
    assert_eq!(generator.lexicons(), ["com.example.note", "com.calendar.event"]);

    let route_config = RouteConfigTs::new(generator, "src/config/data_routes.ts");
    route_config.write(temp.path()).unwrap();
    let written =
        std::fs::read_to_string(temp.path().join(Path::new("src/config/data_routes.ts"))).unwrap();
    assert!(written.contains("  'com.example.note',\n  'com.calendar.event'\n] as const;"));
}

#[test]
fn test_manifest_resolves_renamed_collection() {
    let temp = TempDir::new().unwrap();
    let api = temp.path();
    std::fs::write(api.join("note_client.ts"), "// hand-edited, collection line removed\n").unwrap();

    let mut manifest = ClientManifest::new();
    manifest.insert("note_client.ts", "com.example.note");
    manifest.write(api).unwrap();

    let mut generator =
        RouteConfigGenerator::new().with_manifest(ClientManifest::load(api).unwrap());
    generator.add_file(&api.join("note_client.ts")).unwrap();
    assert_eq!(generator.lexicons(), ["com.example.note"]);
}
