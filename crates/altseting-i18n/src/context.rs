//! The page a renderer operates on

use crate::dom::Document;
use crate::location::BasePath;
use crate::persistence::LanguageStore;
use altseting_config::SiteConfig;

/// Everything a load touches: the document, the language store, and the base
/// path dictionaries are fetched from
#[derive(Debug)]
pub struct PageContext<D, S> {
    /// The live document
    pub document: D,
    /// Site-scoped storage for the chosen language
    pub store: S,
    /// Prefix for dictionary URLs, fixed for the page's lifetime
    pub base_path: BasePath,
}

impl<D: Document, S: LanguageStore> PageContext<D, S> {
    /// Build a context for the page at `page_path`
    pub fn new(document: D, store: S, page_path: &str, route_marker: &str) -> Self {
        Self {
            document,
            store,
            base_path: BasePath::from_page_path(page_path, route_marker),
        }
    }

    /// Build a context using the configured route marker
    pub fn for_site(document: D, store: S, page_path: &str, config: &SiteConfig) -> Self {
        Self::new(document, store, page_path, &config.site.route_marker)
    }

    /// Give back the document and store
    pub fn into_parts(self) -> (D, S) {
        (self.document, self.store)
    }
}
