//! Route configuration module generator.

use std::path::{Path, PathBuf};

use pac_core::GeneratedFile;

use crate::routegen::RouteConfigGenerator;

/// The route configuration module at a project-relative path.
pub struct RouteConfigTs {
    generator: RouteConfigGenerator,
    path: PathBuf,
}

impl RouteConfigTs {
    pub fn new(generator: RouteConfigGenerator, path: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            path: path.into(),
        }
    }

    pub fn lexicons(&self) -> &[String] {
        self.generator.lexicons()
    }
}

impl GeneratedFile for RouteConfigTs {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn render(&self) -> String {
        self.generator.generate()
    }
}
