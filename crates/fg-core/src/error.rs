use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("struct {name} does not exist in {}", .path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("no source directory found for import {import_path}")]
    LocatorMiss { import_path: String },
    #[error("unknown import alias {alias}")]
    UnknownAlias { alias: String },
    #[error("nesting deeper than {depth} levels")]
    RecursionLimit { depth: usize },
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(what: impl Into<String>) -> Self {
        Error::UnsupportedType(what.into())
    }
}
