//! Go frontend: turns a package directory into a [`Module`].

use std::fs;
use std::path::{Path, PathBuf};

use fg_core::ast::Module;
use fg_core::error::{Error, Result};
use fg_core::module::SourceFrontend;
use tracing::debug;

use crate::parser::GoParser;

/// Canonical identifier for the Go frontend.
pub const GOLANG: &str = "go";

/// Frontend that parses every `.go` file of a package directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoFrontend;

impl GoFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl SourceFrontend for GoFrontend {
    fn language(&self) -> &'static str {
        GOLANG
    }

    fn parse_module(&self, dir: &Path) -> Result<Module> {
        let paths = go_source_files(dir)?;
        let mut parser = GoParser::new().map_err(|err| Error::parse(dir, err.to_string()))?;

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let source = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let mut file = parser
                .parse_str(&source)
                .map_err(|err| Error::parse(&path, err.to_string()))?;
            file.path = path;
            files.push(file);
        }

        debug!(dir = %dir.display(), files = files.len(), "parsed go package");
        Ok(Module::new(dir, files))
    }
}

/// `.go` files directly inside `dir`, sorted by file name.
fn go_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "go") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
