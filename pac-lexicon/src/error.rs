use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for lexicon operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the lexicon text and its filename so error factories can
/// attach a labelled snippet without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the first `"key":` occurrence in the source.
    pub fn find_key_span(&self, key: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", key);
        let mut from = 0;
        while let Some(pos) = self.src[from..].find(&quoted) {
            let start = from + pos;
            let after = &self.src[start + quoted.len()..];
            if after.trim_start().starts_with(':') {
                return Some(SourceSpan::from((start, quoted.len())));
            }
            from = start + quoted.len();
        }
        None
    }

    /// Byte offset of a 1-based line/column position, as reported by serde_json.
    fn offset_of(&self, line: usize, column: usize) -> usize {
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        (line_start + column.saturating_sub(1)).min(self.src.len())
    }

    /// Create a malformed JSON error pointing at the failure location.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = (source.line() > 0)
            .then(|| SourceSpan::from((self.offset_of(source.line(), source.column()), 0)));
        Box::new(Error::MalformedJson {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(&self, found: impl Into<String>) -> Box<Error> {
        Box::new(Error::UnsupportedVersion {
            src: self.named_source(),
            span: self.find_key_span("lexicon"),
            found: found.into(),
        })
    }

    /// Create a missing id error.
    pub fn missing_id(&self) -> Box<Error> {
        Box::new(Error::MissingId {
            src: self.named_source(),
            span: self.find_key_span("id"),
        })
    }

    /// Create a missing defs error.
    pub fn missing_defs(&self) -> Box<Error> {
        Box::new(Error::MissingDefs {
            src: self.named_source(),
            span: self.find_key_span("defs"),
        })
    }

    /// Create an invalid definition error labelled at the definition's key.
    pub fn invalid_definition(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::InvalidDefinition {
            src: Some(self.named_source()),
            span: self.find_key_span(&name),
            name,
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(pac::lexicon::read_failed))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read lexicon input")]
    #[diagnostic(code(pac::lexicon::read_failed))]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon JSON")]
    #[diagnostic(
        code(pac::lexicon::malformed_json),
        help("check that the lexicon file is valid JSON")
    )]
    MalformedJson {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported lexicon version: {found} (expected 1)")]
    #[diagnostic(
        code(pac::lexicon::unsupported_version),
        help("only lexicon documents declaring `\"lexicon\": 1` are supported")
    )]
    UnsupportedVersion {
        #[source_code]
        src: NamedSource<String>,
        #[label("unsupported version")]
        span: Option<SourceSpan>,
        found: String,
    },

    #[error("missing required field: id")]
    #[diagnostic(
        code(pac::lexicon::missing_id),
        help("add a non-empty dotted identifier, e.g. `\"id\": \"com.example.note\"`")
    )]
    MissingId {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a non-empty string")]
        span: Option<SourceSpan>,
    },

    #[error("missing or empty required field: defs")]
    #[diagnostic(
        code(pac::lexicon::missing_defs),
        help("a lexicon needs at least one definition, usually `main`")
    )]
    MissingDefs {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a non-empty object")]
        span: Option<SourceSpan>,
    },

    #[error("invalid definition '{name}': {reason}")]
    #[diagnostic(code(pac::lexicon::invalid_definition))]
    InvalidDefinition {
        #[source_code]
        src: Option<NamedSource<String>>,
        #[label("defined here")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },

    #[error("no primary definition found in '{id}'")]
    #[diagnostic(
        code(pac::lexicon::no_primary_definition),
        help("add a `main` definition or a single record, query, procedure or subscription")
    )]
    NoPrimaryDefinition { id: String },

    #[error("primary definition of '{id}' is a {kind}, not a record")]
    #[diagnostic(
        code(pac::lexicon::not_a_record),
        help("client helpers can only be generated for record lexicons")
    )]
    NotARecord { id: String, kind: String },

    #[error("record definition of '{id}' has no record schema")]
    #[diagnostic(
        code(pac::lexicon::missing_record_schema),
        help("add a `record` object describing the record's properties")
    )]
    MissingRecordSchema { id: String },

    #[error("unresolvable reference '{reference}' in '{location}'")]
    #[diagnostic(
        code(pac::lexicon::unresolved_ref),
        help("local references must name a definition of the same lexicon")
    )]
    UnresolvedRef { reference: String, location: String },

    #[error("lexicon '{id}' declares the type '{name}' more than once")]
    #[diagnostic(
        code(pac::lexicon::duplicate_type_name),
        help("rename one of the definitions; `main` is named after the last segment of the id")
    )]
    DuplicateTypeName { id: String, name: String },

    #[error("lexicon '{id}' yields no emittable type declarations")]
    #[diagnostic(code(pac::lexicon::no_emittable_type))]
    NoEmittableType { id: String },
}

impl Error {
    /// Create an invalid definition error without source context
    pub fn invalid_definition(name: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidDefinition {
            src: None,
            span: None,
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Create an unresolved reference error
    pub fn unresolved_ref(reference: impl Into<String>, location: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedRef {
            reference: reference.into(),
            location: location.into(),
        })
    }
}
