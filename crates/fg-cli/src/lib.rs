//! fixturegen CLI library
//!
//! Configuration loading, diagnostics and the generate command behind the
//! `fixturegen` binary.

pub mod commands;
pub mod config;
pub mod diagnostics;

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error(transparent)]
        Generation(#[from] fg_core::Error),

        #[error("Invalid input: {0}")]
        InvalidInput(String),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
