//! Declarations extracted from one Go package directory.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::module::{AliasCollisionPolicy, ImportTable};

/// A type expression as written in a field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare identifier: a scalar kind or a type declared in the same package.
    Named(String),
    /// `alias.Name`, a type declared in an imported package.
    Qualified { alias: String, name: String },
    /// `[]T` when `len` is `None`, `[len]T` otherwise.
    Array {
        elem: Box<TypeExpr>,
        len: Option<String>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    /// Syntax outside the supported grammar, tagged with its node kind.
    Unsupported(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn qualified(alias: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            alias: alias.into(),
            name: name.into(),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Array {
            elem: Box::new(elem),
            len: None,
        }
    }

    pub fn array(elem: TypeExpr, len: impl Into<String>) -> Self {
        TypeExpr::Array {
            elem: Box::new(elem),
            len: Some(len.into()),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn pointer(target: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    pub ty: TypeExpr,
}

impl RecordField {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A struct declaration: its name and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclKind {
    /// `type T struct { ... }`
    Record(Vec<RecordField>),
    /// `type T U`
    Defined(TypeExpr),
    /// `type T = U`
    Alias(TypeExpr),
}

/// One top-level `type` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Declared with type parameters.
    pub generic: bool,
    pub kind: TypeDeclKind,
}

impl TypeDecl {
    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeDeclKind::Record(_))
    }

    /// The record model for this declaration, if it is a non-generic struct.
    pub fn to_record(&self) -> Result<RecordType> {
        match &self.kind {
            TypeDeclKind::Record(_) if self.generic => Err(Error::unsupported(format!(
                "generic struct {}",
                self.name
            ))),
            TypeDeclKind::Record(fields) => Ok(RecordType {
                name: self.name.clone(),
                fields: fields.clone(),
            }),
            _ => Err(Error::unsupported(format!("{} is not a struct", self.name))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Explicit name before the path, including `_` and `.`.
    pub alias: Option<String>,
    pub path: String,
}

impl ImportDecl {
    pub fn new(alias: Option<String>, path: impl Into<String>) -> Self {
        Self {
            alias,
            path: path.into(),
        }
    }

    /// The name the importing file uses: the explicit alias, otherwise the
    /// last segment of the import path.
    pub fn local_alias(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

/// Every top-level declaration of one package directory, files in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
}

impl Module {
    pub fn new(dir: impl Into<PathBuf>, files: Vec<SourceFile>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn type_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.files.iter().flat_map(|file| file.types.iter())
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.files.iter().flat_map(|file| file.imports.iter())
    }

    /// First struct declaration named `name`, in file order. Type
    /// declarations that are not structs are passed over.
    pub fn find_record(&self, name: &str) -> Result<RecordType> {
        self.type_decls()
            .find(|decl| decl.name == name && decl.is_record())
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
                path: self.dir.clone(),
            })?
            .to_record()
    }

    pub fn declarations(&self) -> DeclarationSet {
        let mut decls = HashMap::new();
        for decl in self.type_decls() {
            decls
                .entry(decl.name.clone())
                .or_insert_with(|| decl.clone());
        }
        DeclarationSet { decls }
    }

    pub fn import_table(&self, policy: AliasCollisionPolicy) -> ImportTable {
        ImportTable::from_imports(self.imports(), policy)
    }
}

/// Name to declaration lookup for one package; the first declaration of a
/// name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    decls: HashMap<String, TypeDecl>,
}

impl DeclarationSet {
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
