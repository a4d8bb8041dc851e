use std::path::Path;

use indexmap::IndexMap;

use crate::{Definition, DefinitionKind, Error, LexiconDocument, Result};

/// Name of the definition that is primary whenever it exists.
pub const MAIN: &str = "main";

/// Kinds eligible as primary when there is no `main`, highest priority first.
const PRIMARY_PRIORITY: [DefinitionKind; 4] = [
    DefinitionKind::Record,
    DefinitionKind::Query,
    DefinitionKind::Procedure,
    DefinitionKind::Subscription,
];

/// A lexicon with every definition classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    pub id: String,
    pub description: Option<String>,
    /// Classified definitions in document order
    pub defs: IndexMap<String, Definition>,
}

/// The definition emission is rooted at.
#[derive(Debug, Clone, Copy)]
pub struct Primary<'a> {
    pub name: &'a str,
    pub def: &'a Definition,
}

impl Primary<'_> {
    pub fn is_main(&self) -> bool {
        self.name == MAIN
    }
}

impl Lexicon {
    /// Classify every raw definition of a parsed document.
    pub fn from_document(doc: LexiconDocument) -> Result<Self> {
        let mut defs = IndexMap::with_capacity(doc.defs.len());
        for (name, value) in &doc.defs {
            let def = match doc.source() {
                Some(ctx) => Definition::classify_in(ctx, name, value)?,
                None => Definition::classify(name, value)?,
            };
            tracing::trace!(%name, kind = %def.kind(), "classified definition");
            defs.insert(name.clone(), def);
        }

        Ok(Self {
            id: doc.id,
            description: doc.description,
            defs,
        })
    }

    /// Parse and classify a lexicon file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_document(LexiconDocument::from_file(path)?)
    }

    /// Parse and classify a lexicon from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        Self::from_document(LexiconDocument::from_str_with_filename(
            content, filename,
        )?)
    }

    /// The entity base name: the last dotted segment of the id, lowercased
    pub fn entity_name(&self) -> String {
        pac_core::entity_name(&self.id)
    }

    /// PascalCase entity name (`com.example.note` -> `Note`)
    pub fn entity_type_name(&self) -> String {
        pac_core::to_pascal_case(&self.entity_name())
    }

    /// Declared type name of a definition; `main` is named after the entity.
    pub fn type_name(&self, def_name: &str) -> String {
        if def_name == MAIN {
            self.entity_type_name()
        } else {
            pac_core::to_pascal_case(def_name)
        }
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.get(name)
    }

    /// Select the primary definition.
    ///
    /// `main` wins when present. Otherwise the first definition, in document
    /// order, of the highest-priority kind among record, query, procedure
    /// and subscription.
    pub fn primary(&self) -> Result<Primary<'_>> {
        if let Some((name, def)) = self.defs.get_key_value(MAIN) {
            return Ok(Primary {
                name: name.as_str(),
                def,
            });
        }

        PRIMARY_PRIORITY
            .iter()
            .find_map(|kind| self.defs.iter().find(|(_, def)| def.kind() == *kind))
            .map(|(name, def)| {
                tracing::debug!(id = %self.id, %name, "no main definition, using first {}", def.kind());
                Primary {
                    name: name.as_str(),
                    def,
                }
            })
            .ok_or_else(|| {
                Box::new(Error::NoPrimaryDefinition {
                    id: self.id.clone(),
                })
            })
    }

    /// Definitions other than the primary, in document order.
    pub fn supporting<'a>(
        &'a self,
        primary: &'a Primary<'a>,
    ) -> impl Iterator<Item = (&'a str, &'a Definition)> + 'a {
        self.defs
            .iter()
            .filter(move |(name, _)| name.as_str() != primary.name)
            .map(|(name, def)| (name.as_str(), def))
    }
}
