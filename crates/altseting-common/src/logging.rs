//! Structured logging bootstrap

use crate::{AltsetingError, Result};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "altseting_i18n=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human readable output
    pub json_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the level filter, falling back to `info` on a malformed directive
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let writer = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(Mutex::new(file))
        }
        None => None,
    };

    let result = match (config.json_format, writer) {
        (true, Some(file)) => registry
            .with(fmt::layer().json().with_target(config.include_targets).with_writer(file))
            .try_init(),
        (true, None) => registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init(),
        (false, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(file),
            )
            .try_init(),
        (false, None) => registry
            .with(fmt::layer().with_target(config.include_targets))
            .try_init(),
    };

    result.map_err(|e| AltsetingError::config_with_source("Failed to install log subscriber", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (debug level)
pub fn init_dev_logging() -> Result<()> {
    init_logging(LoggingConfig {
        level: "debug".to_string(),
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.file_path.is_none());
        assert!(config.include_targets);
    }

    #[test]
    fn test_malformed_level_falls_back() {
        let config = LoggingConfig {
            level: "altseting=verbose".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.env_filter().to_string(), "info");
    }

    #[test]
    fn test_missing_log_directory_is_an_error() {
        let config = LoggingConfig {
            file_path: Some("/nonexistent/dir/altseting.log".to_string()),
            ..LoggingConfig::default()
        };
        assert!(matches!(init_logging(config), Err(AltsetingError::Io(_))));
    }

    #[test]
    fn test_second_install_is_rejected() {
        let _ = init_dev_logging();
        assert!(matches!(
            init_default_logging(),
            Err(AltsetingError::Config { .. })
        ));
    }
}
