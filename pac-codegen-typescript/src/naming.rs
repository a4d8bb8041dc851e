//! Names derived from a lexicon id for generated TypeScript modules.

use pac_core::{entity_name, pluralize, to_pascal_case};

/// Suffix of generated client module file names.
pub const CLIENT_SUFFIX: &str = "_client";

/// Suffix of generated types module names.
pub const TYPES_SUFFIX: &str = "_types";

/// TypeScript file extension.
pub const TS_EXT: &str = "ts";

/// Every name the client emitter derives from one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Collection id, verbatim
    pub collection: String,
    /// Entity base name (`note`)
    pub entity: String,
    /// Entity type name (`Note`)
    pub type_name: String,
    /// Pluralized type name used in list helpers (`Notes`)
    pub plural: String,
}

impl EntityNames {
    pub fn from_lexicon_id(id: &str) -> Self {
        let entity = entity_name(id);
        Self {
            collection: id.to_string(),
            type_name: to_pascal_case(&entity),
            plural: to_pascal_case(&pluralize(&entity)),
            entity,
        }
    }

    /// `create<E>Record`
    pub fn create_fn(&self) -> String {
        format!("create{}Record", self.type_name)
    }

    /// `get<E>Record`
    pub fn get_fn(&self) -> String {
        format!("get{}Record", self.type_name)
    }

    /// `list<Es>`
    pub fn list_fn(&self) -> String {
        format!("list{}", self.plural)
    }

    /// `putPrivate<E>Record`
    pub fn put_private_fn(&self) -> String {
        format!("putPrivate{}Record", self.type_name)
    }

    /// `getPrivate<E>Record`
    pub fn get_private_fn(&self) -> String {
        format!("getPrivate{}Record", self.type_name)
    }

    /// `listPrivate<Es>`
    pub fn list_private_fn(&self) -> String {
        format!("listPrivate{}", self.plural)
    }

    /// Client module file name (`note_client.ts`).
    pub fn client_file_name(&self) -> String {
        format!("{}{}.{}", self.entity, CLIENT_SUFFIX, TS_EXT)
    }

    /// Types module name without extension (`note_types`).
    pub fn types_module(&self) -> String {
        format!("{}{}", self.entity, TYPES_SUFFIX)
    }
}

/// Entity name encoded in a client file name (`note_client.ts` -> `note`).
pub fn entity_from_client_file(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(&format!(".{TS_EXT}"))
        .unwrap_or(file_name);
    stem.strip_suffix(CLIENT_SUFFIX).unwrap_or(stem).to_lowercase()
}
