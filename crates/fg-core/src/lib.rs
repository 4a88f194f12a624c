//! Core model shared by the fixture generator crates.
//!
//! The parser crates produce [`ast::Module`]s, the synthesizer consumes them
//! through the [`module::SourceFrontend`] and [`module::ModuleLocator`] seams,
//! and every random draw goes through [`random::RandomSource`].

pub mod ast;
pub mod error;
pub mod module;
pub mod random;

// Re-export commonly used items for convenience
pub use tracing;

pub use ast::{Module, RecordField, RecordType, TypeDecl, TypeDeclKind, TypeExpr};
pub use module::{ImportTable, ModuleLocator, SourceFrontend};
pub use random::{RandomSource, RngSource, ScriptedSource};

pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
