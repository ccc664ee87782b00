//! Site localizer configuration structures

use altseting_common::{Language, LoggingConfig as SubscriberConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Route marker of the production deployment
pub const DEFAULT_ROUTE_MARKER: &str = "/franchise-ALTSETING";

/// Local storage key holding the last rendered language
pub const DEFAULT_STORAGE_KEY: &str = "altseting-lang";

/// Main localizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteConfig {
    /// Page location and dictionary layout
    #[validate]
    pub site: SiteSection,

    /// Persisted language settings
    #[validate]
    pub storage: StorageConfig,

    /// Dictionary HTTP settings
    #[validate]
    pub http: HttpConfig,

    /// Render pass behavior
    pub render: RenderConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// Page location and dictionary layout
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteSection {
    /// Path segment identifying the deployment prefix, e.g. "/franchise-ALTSETING"
    #[validate(custom(function = "crate::validation::validate_route_marker", message = "Route marker must start with '/' and must not end with '/'"))]
    pub route_marker: String,

    /// Directory under the base path holding `<lang>.json` dictionaries
    #[validate(custom(function = "crate::validation::validate_data_dir", message = "Data directory must be a relative path without surrounding slashes"))]
    pub data_dir: String,

    /// Language used for unsupported requests and failed loads
    pub default_language: Language,
}

/// Persisted language settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the rendered language is stored under
    #[validate(length(min = 1, message = "Storage key cannot be empty"))]
    pub key: String,

    /// Optional JSON file backing the store between sessions
    pub file: Option<String>,
}

/// Dictionary HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HttpConfig {
    /// Absolute origin dictionaries are requested from
    #[validate(custom(function = "crate::validation::validate_origin", message = "Origin must be an absolute http(s) URL"))]
    pub origin: Option<String>,

    /// Ask intermediaries not to serve cached dictionaries
    pub bypass_cache: bool,
}

/// How responses of overlapping loads are applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Every successful response is applied as it arrives
    #[default]
    LastResponseWins,
    /// Responses to superseded requests are dropped
    LatestRequestWins,
}

/// Render pass behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Policy for overlapping language loads
    pub stale_responses: StaleResponsePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Emit JSON lines
    pub json: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            data_dir: "data".to_string(),
            default_language: Language::En,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            file: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            origin: None,
            bypass_cache: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Convert into the subscriber settings understood by `altseting_common::init_logging`
    pub fn to_subscriber_config(&self) -> SubscriberConfig {
        SubscriberConfig {
            level: self.level.clone(),
            json_format: self.json,
            file_path: self.file.clone(),
            ..SubscriberConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.site.route_marker, "/franchise-ALTSETING");
        assert_eq!(config.site.data_dir, "data");
        assert_eq!(config.site.default_language, Language::En);
        assert_eq!(config.storage.key, "altseting-lang");
        assert!(config.http.bypass_cache);
        assert_eq!(config.render.stale_responses, StaleResponsePolicy::LastResponseWins);
    }

    #[test]
    fn test_config_serialization() {
        let config = SiteConfig::default();

        let yaml = serde_yaml::to_string(&config).expect("Failed to serialize to YAML");
        assert!(yaml.contains("site:"));
        assert!(yaml.contains("default_language: EN"));
        assert!(yaml.contains("stale_responses: last_response_wins"));

        let deserialized: SiteConfig =
            serde_yaml::from_str(&yaml).expect("Failed to deserialize from YAML");
        assert_eq!(deserialized.site.route_marker, config.site.route_marker);
        assert_eq!(deserialized.storage.key, config.storage.key);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: SiteConfig = serde_yaml::from_str("site:\n  default_language: PL\n").unwrap();
        assert_eq!(config.site.default_language, Language::Pl);
        assert_eq!(config.site.route_marker, DEFAULT_ROUTE_MARKER);
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_site_section_validation() {
        let mut site = SiteSection::default();
        assert!(site.validate().is_ok());

        site.route_marker = "franchise".to_string();
        assert!(site.validate().is_err());

        site.route_marker = "/franchise/".to_string();
        assert!(site.validate().is_err());

        site.route_marker = "/franchise".to_string();
        site.data_dir = "/data".to_string();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_storage_and_http_validation() {
        let mut storage = StorageConfig::default();
        storage.key = String::new();
        assert!(storage.validate().is_err());

        let mut http = HttpConfig::default();
        assert!(http.validate().is_ok());
        http.origin = Some("https://example.org".to_string());
        assert!(http.validate().is_ok());
        http.origin = Some("ftp://example.org".to_string());
        assert!(http.validate().is_err());
    }

    #[test]
    fn test_logging_conversion() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            json: true,
            file: Some("site.log".to_string()),
        };
        assert!(logging.validate().is_ok());

        let subscriber = logging.to_subscriber_config();
        assert_eq!(subscriber.level, "debug");
        assert!(subscriber.json_format);
        assert_eq!(subscriber.file_path.as_deref(), Some("site.log"));

        let invalid = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(invalid.validate().is_err());
    }
}
