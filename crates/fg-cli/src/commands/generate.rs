//! Generate command implementation

use std::path::PathBuf;

use fg_core::random::RandomSource;
use fg_golang::{GoFrontend, GoModuleLocator};
use tracing::{debug, info};

use crate::{config::FixtureConfig, CliError, Result};

/// Arguments for the generate command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Struct to build a literal for
    pub struct_name: String,

    /// Package directory; the working directory when unset
    pub directory: Option<PathBuf>,
}

/// Execute the generate command, printing the literal to stdout
pub fn generate_command(
    args: GenerateArgs,
    config: &FixtureConfig,
    rng: &mut dyn RandomSource,
) -> Result<()> {
    let fixture = render_fixture(&args, config, rng)?;
    println!("{fixture}");
    Ok(())
}

/// Build the literal for `args.struct_name` without printing it
pub fn render_fixture(
    args: &GenerateArgs,
    config: &FixtureConfig,
    rng: &mut dyn RandomSource,
) -> Result<String> {
    if args.struct_name.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "You must specify a struct name.".to_string(),
        ));
    }

    let dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let locator = GoModuleLocator::from_config(&config.locator);
    debug!(?locator, dir = %dir.display(), "resolved package");
    info!(name = %args.struct_name, "generating fixture");

    let fixture = fg_fixture::generate(
        &dir,
        &args.struct_name,
        &GoFrontend::new(),
        &locator,
        rng,
        config.generation.clone(),
    )?;
    Ok(fixture)
}
