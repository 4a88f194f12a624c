//! Diagnostic and error reporting utilities

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::{CliError, Result};

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// Top-level failures that come with a hint for the user
#[derive(Error, Debug, Diagnostic)]
pub enum FixtureDiagnostic {
    #[error("struct `{name}` not found in {}", .dir.display())]
    #[diagnostic(
        code(fixturegen::not_found),
        help("Run fixturegen from the directory of the package that declares the struct")
    )]
    NotFound { name: String, dir: PathBuf },

    #[error("failed to parse {}: {message}", .path.display())]
    #[diagnostic(
        code(fixturegen::parse_error),
        help("Every .go file in the package must be syntactically valid")
    )]
    ParseError { path: PathBuf, message: String },

    #[error("cannot generate a fixture for {what}")]
    #[diagnostic(
        code(fixturegen::unsupported),
        help("Only struct types can be the target; use abort mode only when every field is supported")
    )]
    Unsupported { what: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(fixturegen::config_error),
        help("Check fixturegen.toml for correct syntax and values")
    )]
    ConfigError { message: String },
}

impl FixtureDiagnostic {
    /// The diagnostic for `error`, when there is a useful hint to give.
    pub fn from_cli_error(error: &CliError) -> Option<Self> {
        let diagnostic = match error {
            CliError::Generation(fg_core::Error::NotFound { name, path }) => Self::NotFound {
                name: name.clone(),
                dir: path.clone(),
            },
            CliError::Generation(fg_core::Error::Parse { path, message }) => Self::ParseError {
                path: path.clone(),
                message: message.clone(),
            },
            CliError::Generation(fg_core::Error::UnsupportedType(what)) => Self::Unsupported {
                what: what.clone(),
            },
            CliError::Config(message) => Self::ConfigError {
                message: message.clone(),
            },
            _ => return None,
        };
        Some(diagnostic)
    }
}

/// Render `error` through the miette hook. Returns false when the error has
/// no diagnostic form and the caller should report it itself.
pub fn render_cli_error(error: &CliError) -> bool {
    match FixtureDiagnostic::from_cli_error(error) {
        Some(diagnostic) => {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            true
        }
        None => false,
    }
}
