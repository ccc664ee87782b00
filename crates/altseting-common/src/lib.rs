//! Common utilities and types for the ALTSETING site localizer

pub mod error;
pub mod language;
pub mod logging;

#[cfg(feature = "testing")]
pub mod test_utils;

// Re-export commonly used types
pub use error::{AltsetingError, Result};
pub use language::Language;
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
