//! Configuration loading utilities

use crate::SiteConfig;
use altseting_common::{AltsetingError, Result as AltsetingResult};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// File names probed in the working directory by [`ConfigLoader::load`]
const DEFAULT_CONFIG_FILES: [&str; 2] = ["altseting.yaml", "altseting.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl From<ConfigError> for AltsetingError {
    fn from(err: ConfigError) -> Self {
        AltsetingError::config_with_source("Failed to load site configuration", err)
    }
}

/// Configuration loader for the localizer
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig, ConfigError> {
        debug!("Loading configuration from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn load_from_str(content: &str) -> Result<SiteConfig, ConfigError> {
        let config: SiteConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the working directory, falling back to defaults
    pub fn load() -> AltsetingResult<SiteConfig> {
        Self::load_from_dir(".")
    }

    /// Load `altseting.yaml` or `altseting.yml` from `dir`, falling back to defaults
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> AltsetingResult<SiteConfig> {
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.as_ref().join(name);
            if candidate.exists() {
                info!("Using configuration file {:?}", candidate);
                return Ok(Self::load_config(&candidate)?);
            }
        }

        debug!("No configuration file found, using defaults");
        let config = SiteConfig::default();
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }
}
