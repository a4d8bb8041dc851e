//! `<entity>_client.ts` generator.

use std::path::{Path, PathBuf};

use pac_core::GeneratedFile;

use crate::clientgen::ClientGenerator;

/// A client module, written into the api directory.
pub struct ClientTs {
    generator: ClientGenerator,
}

impl ClientTs {
    pub fn new(generator: ClientGenerator) -> Self {
        Self { generator }
    }

    pub fn file_name(&self) -> String {
        self.generator.names().client_file_name()
    }

    pub fn collection(&self) -> &str {
        &self.generator.names().collection
    }
}

impl GeneratedFile for ClientTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> String {
        self.generator.generate()
    }
}
