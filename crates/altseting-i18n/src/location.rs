//! Base path and dictionary URL derivation

use altseting_common::Language;
use std::fmt;

/// Prefix every dictionary URL is built on.
///
/// Derived once from the page path so the site works both at the domain root
/// and under a deployment prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Everything in `page_path` up to and including the first occurrence of
    /// `marker`, or `.` when the marker is absent
    pub fn from_page_path(page_path: &str, marker: &str) -> Self {
        match page_path.find(marker) {
            Some(index) => Self(page_path[..index + marker.len()].to_string()),
            None => Self(".".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{base}/{data_dir}/{lowercase code}.json`
pub fn dictionary_url(base: &BasePath, data_dir: &str, language: Language) -> String {
    format!("{}/{}/{}.json", base, data_dir, language.file_stem())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "/franchise-ALTSETING";

    #[test]
    fn test_marker_present() {
        let base = BasePath::from_page_path("/franchise-ALTSETING/index.html", MARKER);
        assert_eq!(base.as_str(), "/franchise-ALTSETING");

        let nested = BasePath::from_page_path("/sites/franchise-ALTSETING/pl/about.html", MARKER);
        assert_eq!(nested.as_str(), "/sites/franchise-ALTSETING");
    }

    #[test]
    fn test_marker_absent() {
        assert_eq!(BasePath::from_page_path("/index.html", MARKER).as_str(), ".");
        assert_eq!(BasePath::from_page_path("", MARKER).as_str(), ".");
        assert_eq!(BasePath::from_page_path("/franchise-altseting/", MARKER).as_str(), ".");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let base = BasePath::from_page_path(
            "/franchise-ALTSETING/franchise-ALTSETING/index.html",
            MARKER,
        );
        assert_eq!(base.as_str(), "/franchise-ALTSETING");
    }

    #[test]
    fn test_dictionary_url() {
        let base = BasePath::from_page_path("/franchise-ALTSETING/", MARKER);
        assert_eq!(
            dictionary_url(&base, "data", Language::Ua),
            "/franchise-ALTSETING/data/ua.json"
        );

        let local = BasePath::from_page_path("/", MARKER);
        assert_eq!(dictionary_url(&local, "data", Language::En), "./data/en.json");
    }
}
