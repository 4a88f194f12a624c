//! Configuration for fixturegen

use std::path::{Path, PathBuf};

use fg_fixture::SynthesisOptions;
use fg_golang::LocatorConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CliError, Result};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "fixturegen.toml";

/// Top-level fixturegen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Value bounds and failure policies
    pub generation: SynthesisOptions,

    /// Go environment overrides
    pub locator: LocatorConfig,
}

impl FixtureConfig {
    /// Load configuration from `config_path`, else the first config file
    /// found in the working directory or the user config directory, else
    /// defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
            .chain(Self::default_config_path());
        for candidate in candidates {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading config");
                return Self::load_from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| CliError::Config(format!("Failed to write config file: {}", e)))
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fixturegen").join("config.toml"))
    }
}
