//! Error types for dictionary loading

use altseting_common::AltsetingError;
use thiserror::Error;

/// Errors that can occur while fetching or decoding a dictionary
#[derive(Error, Debug)]
pub enum I18nError {
    /// The server answered with a non-success status
    #[error("Dictionary request to {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// The request never produced a response
    #[error("Dictionary request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not a JSON document
    #[error("Dictionary at {url} is not valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read a dictionary or store file from disk
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dictionary URL could not be joined onto the origin
    #[error("Invalid dictionary URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No dictionary registered under the URL
    #[error("Dictionary not found: {url}")]
    NotFound { url: String },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for AltsetingError {
    fn from(err: I18nError) -> Self {
        AltsetingError::localization_with_source("Dictionary load failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = I18nError::Http {
            url: "./data/pl.json".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Dictionary request to ./data/pl.json returned HTTP 404");
    }

    #[test]
    fn test_conversion_keeps_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AltsetingError = I18nError::Parse {
            url: "./data/en.json".to_string(),
            source: parse,
        }
        .into();
        assert!(err.to_string().starts_with("Localization error"));
        assert!(err.source().is_some());
    }
}
