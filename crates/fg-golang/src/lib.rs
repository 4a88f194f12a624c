//! Go language support for the fixture generator: declaration parsing,
//! import tables and package location.

pub mod frontend;
pub mod locator;
pub mod parser;

use std::path::Path;

use fg_core::ast::{Module, RecordType};
use fg_core::error::Result;
use fg_core::module::{AliasCollisionPolicy, ImportTable, SourceFrontend};

pub use frontend::GoFrontend;
pub use locator::{GoModuleLocator, LocatorConfig};
pub use parser::GoParser;

/// Parse every Go file in `dir`. Fails if any file is malformed.
pub fn parse_module(dir: &Path) -> Result<Module> {
    GoFrontend::new().parse_module(dir)
}

/// The struct called `name` declared in the package at `dir`.
pub fn find_record(dir: &Path, name: &str) -> Result<RecordType> {
    parse_module(dir)?.find_record(name)
}

/// Alias to import path for every import in the package at `dir`; later
/// imports overwrite earlier ones under the same alias.
pub fn build_import_table(dir: &Path) -> Result<ImportTable> {
    Ok(parse_module(dir)?.import_table(AliasCollisionPolicy::LastWriterWins))
}
