//! Supported page languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AltsetingError;

/// Languages the site ships dictionaries for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "UA")]
    Ua,
    #[serde(rename = "PL")]
    Pl,
    #[serde(rename = "RU")]
    Ru,
}

impl Language {
    /// Get the upper-case code used by switcher buttons and the store
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Ua => "UA",
            Self::Pl => "PL",
            Self::Ru => "RU",
        }
    }

    /// Get the lower-case stem of the dictionary file name
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ua => "ua",
            Self::Pl => "pl",
            Self::Ru => "ru",
        }
    }

    /// Parse a language from its exact code. Matching is case-sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EN" => Some(Self::En),
            "UA" => Some(Self::Ua),
            "PL" => Some(Self::Pl),
            "RU" => Some(Self::Ru),
            _ => None,
        }
    }

    /// Map any requested code onto a supported language, using `fallback` for
    /// everything outside the supported set.
    pub fn resolve_or(code: &str, fallback: Self) -> Self {
        Self::from_code(code).unwrap_or(fallback)
    }

    /// Map any requested code onto a supported language.
    pub fn resolve(code: &str) -> Self {
        Self::resolve_or(code, Self::default())
    }

    /// Get all supported languages
    pub fn all() -> [Self; 4] {
        [Self::En, Self::Ua, Self::Pl, Self::Ru]
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ua => "Українська",
            Self::Pl => "Polski",
            Self::Ru => "Русский",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AltsetingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            AltsetingError::localization_with_language("Unsupported language code", s)
        })
    }
}
