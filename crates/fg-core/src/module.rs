//! Seams between the synthesizer and the outside world: import tables, the
//! module locator and the source frontend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{ImportDecl, Module};
use crate::error::Result;

/// What to do when two imports in one package claim the same local alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasCollisionPolicy {
    /// The import seen last (file order, then source order) wins.
    #[default]
    LastWriterWins,
    FirstWriterWins,
}

/// Local alias to canonical import path for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries: HashMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_imports<'a>(
        imports: impl IntoIterator<Item = &'a ImportDecl>,
        policy: AliasCollisionPolicy,
    ) -> Self {
        let mut table = Self::new();
        for import in imports {
            table.insert(import.local_alias(), &import.path, policy);
        }
        table
    }

    pub fn insert(&mut self, alias: &str, path: &str, policy: AliasCollisionPolicy) {
        match self.entries.get(alias) {
            Some(existing) if existing != path => {
                debug!(alias, existing = %existing, incoming = path, ?policy, "import alias collision");
                if policy == AliasCollisionPolicy::FirstWriterWins {
                    return;
                }
            }
            _ => {}
        }
        self.entries.insert(alias.to_string(), path.to_string());
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turns an import path into a directory holding that package's sources.
pub trait ModuleLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf>;
}

/// Locator backed by a fixed import path to directory map.
#[derive(Debug, Clone, Default)]
pub struct MapLocator {
    dirs: HashMap<String, PathBuf>,
}

impl MapLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, import_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(import_path.into(), dir.into());
        self
    }
}

impl ModuleLocator for MapLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf> {
        self.dirs.get(import_path).cloned()
    }
}

/// Parses a package directory into its top-level declarations.
pub trait SourceFrontend {
    fn language(&self) -> &'static str;

    fn parse_module(&self, dir: &Path) -> Result<Module>;
}
