//! Configuration management for the ALTSETING site localizer

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    HttpConfig, LoggingConfig, RenderConfig, SiteConfig, SiteSection, StaleResponsePolicy,
    StorageConfig, DEFAULT_ROUTE_MARKER, DEFAULT_STORAGE_KEY,
};
