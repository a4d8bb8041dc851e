//! TypeScript declarations for the definitions of one lexicon.
//!
//! Emission walks the primary definition first and then every supporting
//! definition in document order. Anonymous nested objects are rendered
//! inline unless the same shape occurs more than once, in which case it is
//! lifted into a named interface declared after all definitions.

use std::collections::{HashMap, HashSet};

use pac_codegen::builder::{CodeFragment, Renderable};
use pac_core::to_pascal_case;
use pac_lexicon::{
    Definition, Error, ErrorSpec, FieldType, IoBlock, Lexicon, MAIN, Primary, RecordDef, Result,
    SchemaField,
};

use crate::{
    ast::{Field, Interface, TypeAlias, Union, inline_object, string_literal},
    code_file::CodeFile,
    type_mapper::{ANY, TypeScriptTypeMapper},
};

/// A top-level declaration in a generated types module.
#[derive(Debug, Clone)]
pub enum Declaration {
    Interface(Interface),
    Alias(TypeAlias),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(i) => i.name(),
            Self::Alias(a) => a.name(),
        }
    }
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Interface(i) => i.to_fragments(),
            Self::Alias(a) => a.to_fragments(),
        }
    }
}

/// Produces the type declarations of a lexicon.
pub struct TypeGenerator<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Every declaration, in emission order.
    pub fn declarations(&self) -> Result<Vec<Declaration>> {
        let primary = self.lexicon.primary()?;

        let mut counting = Emitter::new(self.lexicon, ShapeTable::new(Pass::Count));
        counting.emit_all(&primary)?;
        let mut taken = HashSet::new();
        for declaration in &counting.declarations {
            if !taken.insert(declaration.name().to_string()) {
                return Err(Box::new(Error::DuplicateTypeName {
                    id: self.lexicon.id.clone(),
                    name: declaration.name().to_string(),
                }));
            }
        }
        let shapes = counting.shapes.into_emit(taken);

        let mut emitter = Emitter::new(self.lexicon, shapes);
        emitter.emit_all(&primary)?;

        let mut declarations = emitter.declarations;
        declarations.extend(emitter.shapes.lifted.into_iter().map(Declaration::Interface));

        if declarations.is_empty() {
            return Err(Box::new(Error::NoEmittableType {
                id: self.lexicon.id.clone(),
            }));
        }

        tracing::debug!(
            id = %self.lexicon.id,
            primary = %primary.name,
            declarations = declarations.len(),
            "generated type declarations"
        );
        Ok(declarations)
    }

    /// Render the full types module.
    pub fn generate(&self) -> Result<String> {
        Ok(render_module(&self.lexicon.id, &self.declarations()?))
    }
}

/// A types module: marker header followed by the declarations.
pub(crate) fn render_module(lexicon_id: &str, declarations: &[Declaration]) -> String {
    CodeFile::new()
        .header(format!(
            "// Generated TypeScript types for {lexicon_id}. Do not edit by hand."
        ))
        .add_all(declarations)
        .render()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Render everything inline; used to key shapes
    Inline,
    /// Count how often each inline shape occurs
    Count,
    /// Final rendering with repeated shapes lifted
    Emit,
}

struct ShapeTable {
    pass: Pass,
    counts: HashMap<String, usize>,
    /// Shapes with the name they would be lifted to, in first-seen order
    order: Vec<(String, String)>,
    names: HashMap<String, String>,
    declared: HashSet<String>,
    lifted: Vec<Interface>,
}

impl ShapeTable {
    fn new(pass: Pass) -> Self {
        Self {
            pass,
            counts: HashMap::new(),
            order: Vec::new(),
            names: HashMap::new(),
            declared: HashSet::new(),
            lifted: Vec::new(),
        }
    }

    fn record(&mut self, key: &str, candidate: String) {
        let count = self.counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.order.push((key.to_string(), candidate));
        }
    }

    /// Name every repeated shape, avoiding names already declared.
    fn into_emit(self, mut taken: HashSet<String>) -> Self {
        let mut names = HashMap::new();
        for (key, candidate) in &self.order {
            if self.counts.get(key).copied().unwrap_or(0) < 2 {
                continue;
            }
            let mut name = candidate.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{candidate}{n}");
                n += 1;
            }
            taken.insert(name.clone());
            names.insert(key.clone(), name);
        }

        Self {
            names,
            ..Self::new(Pass::Emit)
        }
    }
}

struct Emitter<'a> {
    lexicon: &'a Lexicon,
    mapper: TypeScriptTypeMapper,
    shapes: ShapeTable,
    declarations: Vec<Declaration>,
}

impl<'a> Emitter<'a> {
    fn new(lexicon: &'a Lexicon, shapes: ShapeTable) -> Self {
        Self {
            lexicon,
            mapper: TypeScriptTypeMapper,
            shapes,
            declarations: Vec::new(),
        }
    }

    fn emit_all(&mut self, primary: &Primary<'_>) -> Result<()> {
        let lexicon = self.lexicon;
        self.emit_definition(primary.name, primary.def)?;
        for (name, def) in lexicon.supporting(primary) {
            self.emit_definition(name, def)?;
        }
        Ok(())
    }

    fn emit_definition(&mut self, def_name: &str, def: &Definition) -> Result<()> {
        let type_name = self.lexicon.type_name(def_name);
        match def {
            Definition::Record(record) => self.emit_record(def_name, &type_name, record),
            Definition::Query(query) => {
                self.emit_params(&type_name, def_name, query.parameters.as_ref())?;
                self.emit_io(&type_name, def_name, "Output", query.output.as_ref())?;
                self.emit_errors(&type_name, &query.errors);
                Ok(())
            }
            Definition::Procedure(procedure) => {
                self.emit_params(&type_name, def_name, procedure.parameters.as_ref())?;
                self.emit_io(&type_name, def_name, "Input", procedure.input.as_ref())?;
                self.emit_io(&type_name, def_name, "Output", procedure.output.as_ref())?;
                self.emit_errors(&type_name, &procedure.errors);
                Ok(())
            }
            Definition::Subscription(subscription) => {
                self.emit_params(&type_name, def_name, subscription.parameters.as_ref())?;
                if let Some(message) = &subscription.message {
                    if let Some(schema) = &message.schema {
                        self.emit_body(
                            &format!("{type_name}Message"),
                            &format!("{def_name}.message"),
                            schema,
                            message.description.as_deref(),
                        )?;
                    }
                }
                self.emit_errors(&type_name, &subscription.errors);
                Ok(())
            }
            Definition::Schema(schema) => self.emit_schema(def_name, &type_name, schema),
        }
    }

    fn emit_record(&mut self, def_name: &str, type_name: &str, record: &RecordDef) -> Result<()> {
        let discriminant = if def_name == MAIN {
            self.lexicon.id.clone()
        } else {
            format!("{}#{}", self.lexicon.id, def_name)
        };
        let doc = record
            .record
            .as_ref()
            .and_then(|schema| schema.description.as_deref())
            .or(record.description.as_deref());

        let mut interface = Interface::new(type_name)
            .doc_opt(doc)
            .field("$type", string_literal(&discriminant));
        if let Some(schema) = &record.record {
            for field in self.object_fields(type_name, schema, def_name)? {
                interface = interface.field_with(field);
            }
        }

        self.declarations.push(Declaration::Interface(interface));
        Ok(())
    }

    fn emit_params(
        &mut self,
        op: &str,
        def_name: &str,
        parameters: Option<&SchemaField>,
    ) -> Result<()> {
        let Some(parameters) = parameters.filter(|p| p.has_properties()) else {
            return Ok(());
        };
        let name = format!("{op}Params");
        let fields = self.object_fields(&name, parameters, &format!("{def_name}.parameters"))?;
        let interface = fields.into_iter().fold(
            Interface::new(&name).doc_opt(parameters.description.as_deref()),
            |i, f| i.field_with(f),
        );
        self.declarations.push(Declaration::Interface(interface));
        Ok(())
    }

    fn emit_io(
        &mut self,
        op: &str,
        def_name: &str,
        suffix: &str,
        block: Option<&IoBlock>,
    ) -> Result<()> {
        let Some(block) = block else {
            return Ok(());
        };
        let Some(schema) = &block.schema else {
            return Ok(());
        };
        self.emit_body(
            &format!("{op}{suffix}"),
            &format!("{def_name}.{}", suffix.to_lowercase()),
            schema,
            block.description.as_deref(),
        )
    }

    /// An operation body: an interface for object shapes, an alias otherwise.
    fn emit_body(
        &mut self,
        name: &str,
        location: &str,
        schema: &SchemaField,
        doc: Option<&str>,
    ) -> Result<()> {
        let doc = schema.description.as_deref().or(doc);
        let declaration = if is_object_shape(schema) && schema.reference().is_none() {
            let fields = self.object_fields(name, schema, location)?;
            Declaration::Interface(
                fields
                    .into_iter()
                    .fold(Interface::new(name).doc_opt(doc), |i, f| i.field_with(f)),
            )
        } else {
            let ty = self.field_type(name, "", schema, location)?;
            Declaration::Alias(TypeAlias::new(name, ty).doc_opt(doc))
        };
        self.declarations.push(declaration);
        Ok(())
    }

    fn emit_errors(&mut self, op: &str, errors: &[ErrorSpec]) {
        if errors.is_empty() {
            return;
        }
        let union = Union::of_strings(errors.iter().map(|e| e.name.as_str()));
        self.declarations.push(Declaration::Alias(TypeAlias::new(
            format!("{op}Error"),
            union.build(),
        )));
    }

    fn emit_schema(&mut self, def_name: &str, type_name: &str, schema: &SchemaField) -> Result<()> {
        let doc = schema.description.as_deref();
        let declaration = if schema.field_type == Some(FieldType::Token) {
            let value = if def_name == MAIN {
                self.lexicon.id.clone()
            } else {
                format!("{}#{}", self.lexicon.id, def_name)
            };
            Declaration::Alias(TypeAlias::new(type_name, string_literal(&value)).doc_opt(doc))
        } else if is_object_shape(schema) && schema.reference().is_none() {
            let fields = self.object_fields(type_name, schema, def_name)?;
            Declaration::Interface(
                fields
                    .into_iter()
                    .fold(Interface::new(type_name).doc_opt(doc), |i, f| i.field_with(f)),
            )
        } else {
            let ty = self.field_type(type_name, "", schema, def_name)?;
            Declaration::Alias(TypeAlias::new(type_name, ty).doc_opt(doc))
        };
        self.declarations.push(declaration);
        Ok(())
    }

    /// Fields of an object schema, required fields first.
    fn object_fields(
        &mut self,
        owner: &str,
        schema: &SchemaField,
        location: &str,
    ) -> Result<Vec<Field>> {
        let mut required = Vec::new();
        let mut optional = Vec::new();

        for (prop, field) in &schema.properties {
            let ty = self.field_type(owner, prop, field, &format!("{location}.{prop}"))?;
            let field_decl = Field::new(prop, ty).doc_opt(field.description.as_deref());
            if schema.is_required(prop) {
                required.push(field_decl);
            } else {
                optional.push(field_decl.optional());
            }
        }

        required.extend(optional);
        Ok(required)
    }

    fn field_type(
        &mut self,
        owner: &str,
        prop: &str,
        field: &SchemaField,
        location: &str,
    ) -> Result<String> {
        if let Some(reference) = field.reference() {
            return self.resolve_ref(reference, location);
        }

        match &field.field_type {
            Some(FieldType::Array) => {
                let item = match &field.items {
                    Some(items) => self.field_type(
                        owner,
                        &format!("{prop}_item"),
                        items,
                        &format!("{location}[]"),
                    )?,
                    None => ANY.to_string(),
                };
                Ok(array_of(&item))
            }
            Some(FieldType::Union) => {
                let mut union = Union::new();
                for reference in &field.refs {
                    union = union.member(self.resolve_ref(reference, location)?);
                }
                Ok(union.build_or(ANY))
            }
            _ if is_object_shape(field) => self.nested_object(owner, prop, field, location),
            _ => Ok(self.mapper.map_leaf(field)),
        }
    }

    fn nested_object(
        &mut self,
        owner: &str,
        prop: &str,
        field: &SchemaField,
        location: &str,
    ) -> Result<String> {
        let candidate = format!("{owner}{}", to_pascal_case(prop));

        match self.shapes.pass {
            Pass::Inline => Ok(inline_object(&self.object_fields(
                &candidate, field, location,
            )?)),
            Pass::Count => {
                let key = self.shape_key(field, location)?;
                self.shapes.record(&key, candidate.clone());
                self.object_fields(&candidate, field, location)?;
                Ok(key)
            }
            Pass::Emit => {
                let key = self.shape_key(field, location)?;
                let Some(name) = self.shapes.names.get(&key).cloned() else {
                    return Ok(inline_object(&self.object_fields(
                        &candidate, field, location,
                    )?));
                };
                if self.shapes.declared.insert(key) {
                    let fields = self.object_fields(&name, field, location)?;
                    let interface = fields.into_iter().fold(
                        Interface::new(&name).doc_opt(field.description.as_deref()),
                        |i, f| i.field_with(f),
                    );
                    self.shapes.lifted.push(interface);
                }
                Ok(name)
            }
        }
    }

    /// Fully inline rendering of an object shape, used as its identity.
    fn shape_key(&self, field: &SchemaField, location: &str) -> Result<String> {
        let mut inline = Emitter::new(self.lexicon, ShapeTable::new(Pass::Inline));
        let fields = inline.object_fields("", field, location)?;
        Ok(inline_object(&fields))
    }

    /// Resolve a `$ref`/`ref` to a declared type name.
    fn resolve_ref(&self, reference: &str, location: &str) -> Result<String> {
        let (document, def_name) = reference.split_once('#').unwrap_or((reference, MAIN));

        if !document.is_empty() && document != self.lexicon.id {
            if self.shapes.pass == Pass::Emit {
                tracing::warn!(%reference, %location, "reference into another lexicon, emitting any");
            }
            return Ok(ANY.to_string());
        }

        if self.lexicon.get(def_name).is_none() {
            return Err(Error::unresolved_ref(reference, location));
        }
        Ok(self.lexicon.type_name(def_name))
    }
}

/// An object (or params) schema with declared properties.
fn is_object_shape(field: &SchemaField) -> bool {
    field.has_properties() && (field.field_type.is_none() || field.is_object())
}

/// `T[]`, parenthesizing top-level unions.
fn array_of(item: &str) -> String {
    if has_top_level_union(item) {
        format!("({item})[]")
    } else {
        format!("{item}[]")
    }
}

fn has_top_level_union(ty: &str) -> bool {
    let mut depth = 0i32;
    let mut quoted = false;
    let mut escaped = false;
    for c in ty.chars() {
        if quoted {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => quoted = false,
                _ => {}
            }
            continue;
        }
        match c {
            '\'' => quoted = true,
            '{' | '(' | '<' | '[' => depth += 1,
            '}' | ')' | '>' | ']' => depth -= 1,
            '|' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use pac_codegen::builder::CodeBuilder;

    use super::*;

    fn lexicon(defs: &str) -> Lexicon {
        let src = format!(r#"{{"lexicon": 1, "id": "com.example.note", "defs": {defs}}}"#);
        Lexicon::from_str_with_filename(&src, "note.json").unwrap()
    }

    fn render(lexicon: &Lexicon) -> String {
        let declarations = TypeGenerator::new(lexicon).declarations().unwrap();
        let mut builder = CodeBuilder::typescript();
        for declaration in &declarations {
            builder.emit(declaration);
        }
        builder.build()
    }

    #[test]
    fn test_record_fields_required_first() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "required": ["text"],
                "properties": {
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "text": {"type": "string"}
                }}}}"#,
        );
        assert_eq!(
            render(&lex),
            "export interface Note {\n  $type: 'com.example.note';\n  text: string;\n  tags?: string[];\n}\n"
        );
    }

    #[test]
    fn test_local_ref_uses_type_name() {
        let lex = lexicon(
            r##"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"author": {"type": "ref", "ref": "#author"}}}},
               "author": {"type": "object", "properties": {"did": {"type": "string"}}, "required": ["did"]}}"##,
        );
        let declarations = TypeGenerator::new(&lex).declarations().unwrap();
        let names: Vec<_> = declarations.iter().map(Declaration::name).collect();
        assert_eq!(names, ["Note", "Author"]);
        assert!(render(&lex).contains("  author?: Author;\n"));
    }

    #[test]
    fn test_full_id_ref_resolves_locally() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"author": {"type": "ref", "ref": "com.example.note#author"}}}},
               "author": {"type": "string"}}"#,
        );
        assert!(render(&lex).contains("  author?: Author;\n"));
    }

    #[test]
    fn test_missing_local_ref_is_an_error() {
        let lex = lexicon(
            r##"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"author": {"type": "ref", "ref": "#missing"}}}}}"##,
        );
        let err = TypeGenerator::new(&lex).declarations().unwrap_err();
        match *err {
            Error::UnresolvedRef {
                reference,
                location,
            } => {
                assert_eq!(reference, "#missing");
                assert_eq!(location, "main.author");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_external_ref_is_any() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"strongRef": {"type": "ref", "ref": "com.atproto.repo.strongRef"}}}}}"#,
        );
        assert!(render(&lex).contains("  strongRef?: any;\n"));
    }

    #[test]
    fn test_union_of_refs() {
        let lex = lexicon(
            r##"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"embed": {"type": "union", "refs": ["#image", "#link"]},
                               "items": {"type": "array", "items": {"type": "union", "refs": ["#image", "#link"]}}}}},
               "image": {"type": "object", "properties": {"alt": {"type": "string"}}},
               "link": {"type": "object", "properties": {"uri": {"type": "string"}}}}"##,
        );
        let out = render(&lex);
        assert!(out.contains("  embed?: Image | Link;\n"));
        assert!(out.contains("  items?: (Image | Link)[];\n"));
    }

    #[test]
    fn test_empty_union_is_any() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"embed": {"type": "union", "refs": []}}}}}"#,
        );
        assert!(render(&lex).contains("  embed?: any;\n"));
    }

    #[test]
    fn test_nested_object_inline_once() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"location": {"type": "object", "required": ["lat"],
                    "properties": {"lat": {"type": "number"}, "label": {"type": "string"}}}}}}}"#,
        );
        assert!(render(&lex).contains("  location?: { lat: number; label?: string };\n"));
    }

    #[test]
    fn test_repeated_nested_shape_is_lifted() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {
                    "start": {"type": "object", "properties": {"at": {"type": "string"}}},
                    "end": {"type": "object", "properties": {"at": {"type": "string"}}}
                }}}}"#,
        );
        let out = render(&lex);
        assert!(out.contains("  start?: NoteStart;\n"));
        assert!(out.contains("  end?: NoteStart;\n"));
        assert!(out.ends_with("export interface NoteStart {\n  at?: string;\n}\n"));
        assert_eq!(out.matches("export interface NoteStart").count(), 1);
    }

    #[test]
    fn test_lifted_name_avoids_collisions() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {
                    "start": {"type": "object", "properties": {"at": {"type": "string"}}},
                    "end": {"type": "object", "properties": {"at": {"type": "string"}}}
                }}},
               "noteStart": {"type": "string"}}"#,
        );
        let out = render(&lex);
        assert!(out.contains("export type NoteStart = string;\n"));
        assert!(out.contains("  start?: NoteStart2;\n"));
    }

    #[test]
    fn test_definition_named_like_entity_is_rejected() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object",
                "properties": {"text": {"type": "string"}}}},
               "note": {"type": "string"}}"#,
        );
        let err = TypeGenerator::new(&lex).declarations().unwrap_err();
        match *err {
            Error::DuplicateTypeName { id, name } => {
                assert_eq!(id, "com.example.note");
                assert_eq!(name, "Note");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_operation_suffix_clash_is_rejected() {
        let lex = lexicon(
            r#"{"main": {"type": "query",
                "output": {"encoding": "application/json", "schema": {"type": "object", "properties": {"n": {"type": "integer"}}}}},
               "noteOutput": {"type": "string"}}"#,
        );
        let err = TypeGenerator::new(&lex).generate().unwrap_err();
        assert!(matches!(*err, Error::DuplicateTypeName { ref name, .. } if name == "NoteOutput"));
    }

    #[test]
    fn test_query_params_output_and_errors() {
        let lex = lexicon(
            r#"{"main": {"type": "query",
                "parameters": {"type": "params", "required": ["uri"], "properties": {"uri": {"type": "string"}}},
                "output": {"encoding": "application/json", "schema": {"type": "object", "properties": {"count": {"type": "integer"}}}},
                "errors": [{"name": "NotFound"}, {"name": "Forbidden"}]}}"#,
        );
        assert_eq!(
            render(&lex),
            "export interface NoteParams {\n  uri: string;\n}\n\
             export interface NoteOutput {\n  count?: number;\n}\n\
             export type NoteError = 'NotFound' | 'Forbidden';\n"
        );
    }

    #[test]
    fn test_output_ref_is_alias() {
        let lex = lexicon(
            r##"{"main": {"type": "query",
                "output": {"encoding": "application/json", "schema": {"type": "ref", "ref": "#view"}}},
               "view": {"type": "object", "properties": {"uri": {"type": "string"}}}}"##,
        );
        assert!(render(&lex).starts_with("export type NoteOutput = View;\n"));
    }

    #[test]
    fn test_token_def() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object", "properties": {}}},
               "draft": {"type": "token", "description": "Not yet published"}}"#,
        );
        assert!(render(&lex).ends_with(
            "/** Not yet published */\nexport type Draft = 'com.example.note#draft';\n"
        ));
    }

    #[test]
    fn test_secondary_record_discriminant() {
        let lex = lexicon(
            r#"{"main": {"type": "record", "record": {"type": "object", "properties": {}}},
               "revision": {"type": "record", "record": {"type": "object", "properties": {}}}}"#,
        );
        assert!(render(&lex).contains("$type: 'com.example.note#revision';"));
    }

    #[test]
    fn test_nothing_to_emit() {
        let lex = lexicon(r#"{"main": {"type": "query"}}"#);
        let err = TypeGenerator::new(&lex).declarations().unwrap_err();
        assert!(matches!(*err, Error::NoEmittableType { .. }));
    }

    #[test]
    fn test_array_of_union_literals() {
        assert_eq!(array_of("'a' | 'b'"), "('a' | 'b')[]");
        assert_eq!(array_of("{ a: 'x' | 'y' }"), "{ a: 'x' | 'y' }[]");
        assert_eq!(array_of("'a|b'"), "'a|b'[]");
        assert_eq!(array_of("string"), "string[]");
    }
}
