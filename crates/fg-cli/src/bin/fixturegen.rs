//! fixturegen CLI Binary
//!
//! Prints a randomized Go composite literal for a struct declared in the
//! package in the current directory.
//!
//! # Usage
//!
//! ```bash
//! # Fixture for `type Point struct { X, Y int }`
//! fixturegen --struct Point
//!
//! # Run against another package, with debug logs on stderr
//! fixturegen -C ./internal/geo -s Point -v
//! ```

use clap::{CommandFactory, Parser, ValueEnum};
use fg_cli::{
    commands::{generate_command, GenerateArgs},
    config::FixtureConfig,
    diagnostics::setup_error_reporting,
    CliError, Result,
};
use fg_core::random::RngSource;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "fixturegen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a randomized Go composite literal for a struct type",
    long_about = r#"
fixturegen reads the Go package in the current directory, finds the named
struct and prints a literal for it with random field values. Structs from
imported packages are looked up in the module cache, GOROOT and GOPATH.

EXAMPLES:
    fixturegen --struct Point             # Fixture for Point
    fixturegen -C ./geo -s Point          # Fixture for geo.Point
    "#
)]
struct Cli {
    /// Name of the struct to generate a fixture for
    #[arg(short = 's', long = "struct", value_name = "NAME", default_value = "")]
    struct_name: String,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long)]
    directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.struct_name.trim().is_empty() {
        eprintln!("You must specify a struct name.");
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(2);
    }

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir).map_err(CliError::Io)?;
    }

    let config = FixtureConfig::load(cli.config.as_deref())?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut rng = RngSource::seeded(seed);

    let args = GenerateArgs {
        struct_name: cli.struct_name,
        directory: None,
    };
    match generate_command(args, &config, &mut rng) {
        Ok(()) => {
            if cli.verbose > 0 {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            use tracing::error;
            if !fg_cli::diagnostics::render_cli_error(&e) {
                error!("{}", e);
            }
            if cli.verbose > 0 {
                error!(?e, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries the fixture only
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .try_init()
                .map_err(|e| CliError::Config(format!("Failed to setup logging: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .try_init()
                .map_err(|e| CliError::Config(format!("Failed to setup logging: {}", e)))?;
        }
    }

    Ok(())
}
