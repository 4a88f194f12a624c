//! Finds Go package sources on disk from an import path.
//!
//! Search order: the module cache (`$GOPATH/pkg/mod`), the standard library
//! (`$GOROOT/src`), then the legacy `$GOPATH/src` tree. Each probe appends a
//! `*` to the import path because module cache directories carry an
//! `@version` suffix, and the lexicographically last match is taken.

use std::env;
use std::path::{Path, PathBuf};

use fg_core::module::ModuleLocator;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Optional overrides for the Go environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub gopath: Option<PathBuf>,
    pub goroot: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GoModuleLocator {
    gopath: PathBuf,
    goroot: Option<PathBuf>,
}

impl GoModuleLocator {
    pub fn new(gopath: impl Into<PathBuf>, goroot: Option<PathBuf>) -> Self {
        Self {
            gopath: gopath.into(),
            goroot,
        }
    }

    /// Config values first, then `GOPATH`/`GOROOT`, with `GOPATH` defaulting
    /// to `~/go` like the go tool does.
    pub fn from_config(config: &LocatorConfig) -> Self {
        let gopath = config
            .gopath
            .clone()
            .or_else(|| env::var_os("GOPATH").map(PathBuf::from))
            .or_else(|| dirs::home_dir().map(|home| home.join("go")))
            .unwrap_or_default();
        let goroot = config
            .goroot
            .clone()
            .or_else(|| env::var_os("GOROOT").map(PathBuf::from));
        Self::new(gopath, goroot)
    }

    fn latest_match(root: &Path, import_path: &str) -> Option<PathBuf> {
        let pattern = wildcard(root, import_path);
        let entries = match glob::glob(&pattern) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%pattern, "invalid locator pattern: {err}");
                return None;
            }
        };
        let mut matches: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
        matches.sort();
        matches.pop()
    }
}

fn wildcard(root: &Path, import_path: &str) -> String {
    format!(
        "{}/{}*",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(import_path)
    )
}

impl ModuleLocator for GoModuleLocator {
    fn locate(&self, import_path: &str) -> Option<PathBuf> {
        if let Some(found) = Self::latest_match(&self.gopath.join("pkg").join("mod"), import_path)
        {
            debug!(import_path, dir = %found.display(), "found in module cache");
            return Some(found);
        }
        if let Some(goroot) = &self.goroot {
            if let Some(found) = Self::latest_match(&goroot.join("src"), import_path) {
                debug!(import_path, dir = %found.display(), "found in GOROOT");
                return Some(found);
            }
        }
        // Legacy GOPATH layout; not checked for existence.
        let fallback = self.gopath.join("src").join(format!("{import_path}*"));
        debug!(import_path, dir = %fallback.display(), "falling back to GOPATH/src");
        Some(fallback)
    }
}
