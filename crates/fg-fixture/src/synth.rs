//! Recursive descent over [`TypeExpr`] producing Go composite literals.
//!
//! Output layout follows gofmt: struct fields one per line, indented by tabs,
//! slices on a single line and maps one entry per line. Records from other
//! packages are loaded on demand through the [`ModuleLocator`] and
//! [`SourceFrontend`]; nothing is cached between fields.

use std::path::PathBuf;

use fg_core::ast::{DeclarationSet, Module, RecordType, TypeDecl, TypeDeclKind, TypeExpr};
use fg_core::error::{Error, Result};
use fg_core::module::{AliasCollisionPolicy, ImportTable, ModuleLocator, SourceFrontend};
use fg_core::random::RandomSource;
use tracing::{debug, warn};

use crate::options::{FieldFailurePolicy, SynthesisOptions};
use crate::primitives::{self, ScalarKind};
use crate::render::{tabs, type_name};

/// Name resolution context for one package.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub dir: PathBuf,
    pub imports: ImportTable,
    pub decls: DeclarationSet,
}

impl Scope {
    pub fn from_module(module: &Module, policy: AliasCollisionPolicy) -> Self {
        Self {
            dir: module.dir.clone(),
            imports: module.import_table(policy),
            decls: module.declarations(),
        }
    }
}

/// Position of the value being synthesized.
#[derive(Debug, Clone, Copy)]
struct Frame {
    indentation: usize,
    /// Directly under a `*`: a struct literal gets an `&` prefix.
    pointer: bool,
    /// Struct literals enclosing this value.
    depth: usize,
}

impl Frame {
    fn root() -> Self {
        Self {
            indentation: 1,
            pointer: false,
            depth: 0,
        }
    }

    fn value(self) -> Self {
        Self {
            pointer: false,
            ..self
        }
    }
}

pub struct FixtureSynthesizer<'a> {
    frontend: &'a dyn SourceFrontend,
    locator: &'a dyn ModuleLocator,
    rng: &'a mut dyn RandomSource,
    options: SynthesisOptions,
}

impl<'a> FixtureSynthesizer<'a> {
    pub fn new(
        frontend: &'a dyn SourceFrontend,
        locator: &'a dyn ModuleLocator,
        rng: &'a mut dyn RandomSource,
        options: SynthesisOptions,
    ) -> Self {
        Self {
            frontend,
            locator,
            rng,
            options,
        }
    }

    /// Literal for a top-level record, fields indented one tab.
    pub fn record_fixture(&mut self, record: &RecordType, scope: &Scope) -> Result<String> {
        self.record_literal(record, scope, Frame::root())
    }

    /// Literal for an arbitrary type expression at the top level.
    pub fn value_fixture(&mut self, ty: &TypeExpr, scope: &Scope) -> Result<String> {
        self.value_literal(ty, scope, Frame::root())
    }

    fn record_literal(&mut self, record: &RecordType, scope: &Scope, frame: Frame) -> Result<String> {
        if frame.depth >= self.options.max_depth.max(1) {
            return Err(Error::RecursionLimit {
                depth: self.options.max_depth,
            });
        }

        let indentation = frame.indentation;
        let mut fixture = if frame.pointer {
            format!("&{}{{\n", record.name)
        } else {
            format!("{}{{\n", record.name)
        };

        let field_frame = Frame {
            indentation: indentation + 1,
            pointer: false,
            depth: frame.depth + 1,
        };
        for field in &record.fields {
            match self.value_literal(&field.ty, scope, field_frame) {
                Ok(value) => {
                    fixture.push_str(&format!("{}{}: {},\n", tabs(indentation), field.name, value));
                }
                Err(err) if self.options.field_failure == FieldFailurePolicy::Skip => {
                    warn!(record = %record.name, field = %field.name, error = %err, "skipping field");
                }
                Err(err) => return Err(err),
            }
        }

        fixture.push_str(&format!("{}}}", tabs(indentation.saturating_sub(1))));
        Ok(fixture)
    }

    fn value_literal(&mut self, ty: &TypeExpr, scope: &Scope, frame: Frame) -> Result<String> {
        match ty {
            TypeExpr::Named(name) => self.named_literal(name, scope, frame),
            TypeExpr::Qualified { alias, name } => self.external_literal(alias, name, scope, frame),
            TypeExpr::Array { elem, len } => {
                self.array_literal(ty, elem, len.as_deref(), scope, frame)
            }
            TypeExpr::Map { key, value } => self.map_literal(ty, key, value, scope, frame),
            TypeExpr::Pointer(target) => self.value_literal(
                target,
                scope,
                Frame {
                    pointer: true,
                    ..frame
                },
            ),
            TypeExpr::Unsupported(kind) => Err(Error::unsupported(kind.clone())),
        }
    }

    /// Local declarations shadow the scalar table.
    fn named_literal(&mut self, name: &str, scope: &Scope, frame: Frame) -> Result<String> {
        if let Some(decl) = scope.decls.get(name) {
            return self.declared_literal(decl, scope, frame);
        }
        match ScalarKind::from_name(name) {
            Some(kind) => Ok(primitives::literal(kind, &mut *self.rng, &self.options)),
            None => Err(Error::unsupported(name)),
        }
    }

    fn declared_literal(&mut self, decl: &TypeDecl, scope: &Scope, frame: Frame) -> Result<String> {
        let (target, defined) = match &decl.kind {
            TypeDeclKind::Record(_) => return self.record_literal(&decl.to_record()?, scope, frame),
            TypeDeclKind::Defined(target) => (target, true),
            TypeDeclKind::Alias(target) => (target, false),
        };
        if decl.generic {
            return Err(Error::unsupported(format!("generic type {}", decl.name)));
        }
        if frame.depth >= self.options.max_depth.max(1) {
            return Err(Error::RecursionLimit {
                depth: self.options.max_depth,
            });
        }
        let inner = Frame {
            depth: frame.depth + 1,
            ..frame
        };

        let underlying = match target {
            TypeExpr::Named(name) if defined => name,
            // `type Loc geo.Point` keeps Point's fields under the new name.
            TypeExpr::Qualified { alias, name } if defined => {
                let (mut record, external) = self.load_external(alias, name, scope)?;
                record.name = decl.name.clone();
                return self.record_literal(&record, &external, frame);
            }
            _ => return self.value_literal(target, scope, inner),
        };
        // `type Admin User` keeps User's fields under the new name.
        if let Some(record) = scope.decls.get(underlying).filter(|candidate| candidate.is_record()) {
            let mut record = record.to_record()?;
            record.name = decl.name.clone();
            return self.record_literal(&record, scope, frame);
        }
        let value = self.value_literal(target, scope, inner.value())?;
        Ok(format!("{}({})", decl.name, value))
    }

    /// A struct declared in an imported package, synthesized in that
    /// package's own scope.
    fn external_literal(
        &mut self,
        alias: &str,
        name: &str,
        scope: &Scope,
        frame: Frame,
    ) -> Result<String> {
        let (record, external) = self.load_external(alias, name, scope)?;
        self.record_literal(&record, &external, frame)
    }

    /// Parse the package behind `alias` and pick out the struct `name`,
    /// together with that package's scope.
    #[tracing::instrument(level = "debug", skip(self, scope), fields(dir = %scope.dir.display()))]
    fn load_external(
        &mut self,
        alias: &str,
        name: &str,
        scope: &Scope,
    ) -> Result<(RecordType, Scope)> {
        let import_path = scope
            .imports
            .resolve(alias)
            .ok_or_else(|| Error::UnknownAlias {
                alias: alias.to_string(),
            })?;
        let dir = self
            .locator
            .locate(import_path)
            .ok_or_else(|| Error::LocatorMiss {
                import_path: import_path.to_string(),
            })?;
        debug!(import_path, dir = %dir.display(), "loading external package");

        let module = self.frontend.parse_module(&dir)?;
        let record = module.find_record(name)?;
        let external = Scope::from_module(&module, self.options.alias_collision);
        Ok((record, external))
    }

    /// Draw one 32-bit count, lift 0 to 1 and cap at `max_elements`.
    fn element_count(&mut self) -> usize {
        let drawn = self.rng.next_u32() as usize;
        drawn.max(1).min(self.options.max_elements.max(1))
    }

    fn array_literal(
        &mut self,
        ty: &TypeExpr,
        elem: &TypeExpr,
        len: Option<&str>,
        scope: &Scope,
        frame: Frame,
    ) -> Result<String> {
        let mut count = self.element_count();
        let head = type_name(ty)?;
        match len.map(str::parse::<usize>) {
            None => {}
            Some(Ok(0)) => return Ok(format!("{head}{{}}")),
            Some(Ok(len)) => count = count.min(len),
            // Length is a constant expression we cannot evaluate.
            Some(Err(_)) => count = 1,
        }

        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(self.value_literal(elem, scope, frame.value())?);
        }
        Ok(format!("{head}{{{}}}", elements.join(", ")))
    }

    /// Keys are drawn independently; duplicates are left in place.
    fn map_literal(
        &mut self,
        ty: &TypeExpr,
        key: &TypeExpr,
        value: &TypeExpr,
        scope: &Scope,
        frame: Frame,
    ) -> Result<String> {
        let count = self.element_count();
        let head = type_name(ty)?;
        let entry_frame = Frame {
            indentation: frame.indentation + 1,
            ..frame.value()
        };

        let mut fixture = format!("{head}{{\n");
        for idx in 0..count {
            let entry_key = self.value_literal(key, scope, entry_frame)?;
            let entry_value = self.value_literal(value, scope, entry_frame)?;
            let terminator = if idx + 1 < count { ",\n" } else { "}" };
            fixture.push_str(&format!(
                "{}{}: {}{}",
                tabs(frame.indentation),
                entry_key,
                entry_value,
                terminator
            ));
        }
        Ok(fixture)
    }
}
