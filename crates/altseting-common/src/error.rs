//! Workspace-wide error type

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used at crate boundaries
pub type Result<T> = std::result::Result<T, AltsetingError>;

/// Errors surfaced by setup code: config loading, logging and renderer construction.
///
/// Page loads never produce one of these; they report through the load
/// observer instead.
#[derive(Error, Debug)]
pub enum AltsetingError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A language code or dictionary could not be used
    #[error("Localization error: {message}{}", language_suffix(.language))]
    Localization {
        message: String,
        language: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },
}

fn language_suffix(language: &Option<String>) -> String {
    language
        .as_ref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default()
}

impl AltsetingError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A localization failure about a specific language code
    pub fn localization_with_language(
        message: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::Localization {
            message: message.into(),
            language: Some(language.into()),
            source: None,
        }
    }

    /// A localization failure caused by a lower-level error
    pub fn localization_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: message.into(),
            language: None,
            source: Some(Box::new(source)),
        }
    }

    /// The language code this error is about, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Localization { language, .. } => language.as_deref(),
            _ => None,
        }
    }
}
