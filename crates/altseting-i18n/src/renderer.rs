//! Load orchestration: fetch with fallback, then bind, draw, mark and persist

use crate::binder::bind;
use crate::context::PageContext;
use crate::dictionary::Dictionary;
use crate::dom::Document;
use crate::infographic::render_infographic;
use crate::location::{dictionary_url, BasePath};
use crate::observer::{LoadEvent, LoadObserver, TracingObserver};
use crate::persistence::{LanguageStore, Persistence};
use crate::source::{DictionarySource, HttpSource};
use crate::switcher::{set_active, LanguageSwitcher};
use altseting_common::{AltsetingError, Language};
use altseting_config::{SiteConfig, StaleResponsePolicy};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Renderer settings derived from [`SiteConfig`]
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub default_language: Language,
    pub data_dir: String,
    pub storage_key: String,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for RenderSettings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            default_language: config.site.default_language,
            data_dir: config.site.data_dir.clone(),
            storage_key: config.storage.key.clone(),
            stale_responses: config.render.stale_responses,
        }
    }
}

/// A dictionary that loaded, tagged with the request that produced it
#[derive(Debug, Clone)]
pub struct LoadedDictionary {
    /// The language actually loaded, which is the default after a fallback
    pub language: Language,
    pub dictionary: Dictionary,
    /// The requested language failed and the default was loaded instead
    pub fell_back: bool,
    /// Issue order of the request, starting at 1
    pub ticket: u64,
}

/// How a load ended. Loads never fail outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page now shows `language`
    Rendered { language: Language, fell_back: bool },
    /// No dictionary could be loaded; the page is unchanged
    Abandoned,
    /// A newer request was issued before this one finished; the page is unchanged
    Superseded { language: Language },
}

impl LoadOutcome {
    /// The rendered language, if the page changed
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::Rendered { language, .. } => Some(*language),
            _ => None,
        }
    }
}

/// Drives every language load of a page
pub struct SiteRenderer<F> {
    source: F,
    settings: RenderSettings,
    persistence: Persistence,
    observer: Arc<dyn LoadObserver>,
    issued: AtomicU64,
}

impl<F> fmt::Debug for SiteRenderer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteRenderer")
            .field("settings", &self.settings)
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SiteRenderer<HttpSource> {
    /// Create a renderer fetching over HTTP from the configured origin
    pub fn from_config(config: &SiteConfig) -> altseting_common::Result<Self> {
        let origin = config
            .http
            .origin
            .as_deref()
            .ok_or_else(|| AltsetingError::config("http.origin is required for HTTP loading"))?;
        let source = HttpSource::new(origin, config.http.bypass_cache)?;
        Ok(Self::new(source, RenderSettings::from(config)))
    }
}

impl<F: DictionarySource> SiteRenderer<F> {
    /// Create a renderer over `source` that reports to [`TracingObserver`]
    pub fn new(source: F, settings: RenderSettings) -> Self {
        let persistence = Persistence::new(settings.storage_key.clone(), settings.default_language);
        Self {
            source,
            settings,
            persistence,
            observer: Arc::new(TracingObserver),
            issued: AtomicU64::new(0),
        }
    }

    /// Report load events to `observer` instead
    pub fn with_observer(mut self, observer: Arc<dyn LoadObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Ticket of the most recently issued request, 0 before the first
    pub fn latest_ticket(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Map a requested code onto a supported language
    pub fn normalize(&self, requested: &str) -> Language {
        let default = self.settings.default_language;
        match Language::from_code(requested) {
            Some(language) => language,
            None => {
                self.observer.on_event(&LoadEvent::LanguageSubstituted {
                    requested: requested.to_string(),
                    used: default,
                });
                default
            }
        }
    }

    /// Fetch the dictionary for `requested`, retrying once with the default
    /// language when the requested one fails.
    ///
    /// `None` means nothing could be loaded.
    pub async fn fetch(&self, base: &BasePath, requested: &str) -> Option<LoadedDictionary> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let language = self.normalize(requested);
        let default = self.settings.default_language;

        let mut current = language;
        loop {
            let url = dictionary_url(base, &self.settings.data_dir, current);
            debug!(ticket, %current, %url, "Fetching dictionary");

            match self.source.fetch(&url).await {
                Ok(dictionary) => {
                    return Some(LoadedDictionary {
                        language: current,
                        dictionary,
                        fell_back: current != language,
                        ticket,
                    });
                }
                Err(e) => {
                    self.observer.on_event(&LoadEvent::FetchFailed {
                        language: current,
                        url,
                        error: e.to_string(),
                    });
                    if current == default {
                        self.observer
                            .on_event(&LoadEvent::Abandoned { language: current });
                        return None;
                    }
                    self.observer.on_event(&LoadEvent::FallingBack {
                        from: current,
                        to: default,
                    });
                    current = default;
                }
            }
        }
    }

    /// Render a loaded dictionary into the page and persist its language
    pub fn apply<D: Document, S: LanguageStore>(
        &self,
        ctx: &mut PageContext<D, S>,
        loaded: LoadedDictionary,
    ) -> LoadOutcome {
        let language = loaded.language;

        if self.settings.stale_responses == StaleResponsePolicy::LatestRequestWins
            && loaded.ticket < self.latest_ticket()
        {
            self.observer.on_event(&LoadEvent::Superseded { language });
            return LoadOutcome::Superseded { language };
        }

        let observer = self.observer.as_ref();
        let report = bind(&mut ctx.document, &loaded.dictionary, observer);
        let cards = render_infographic(&mut ctx.document, &loaded.dictionary, observer);
        let active = set_active(&mut ctx.document, language);
        debug!(
            applied = report.applied,
            missing = report.missing,
            mismatched = report.mismatched,
            cards = ?cards,
            active,
            "Updated page"
        );
        observer.on_event(&LoadEvent::Rendered { language });

        self.persistence.save(&mut ctx.store, language);
        observer.on_event(&LoadEvent::Persisted { language });

        LoadOutcome::Rendered {
            language,
            fell_back: loaded.fell_back,
        }
    }

    /// Load `requested` into the page
    #[instrument(skip(self, ctx))]
    pub async fn load<D: Document, S: LanguageStore>(
        &self,
        ctx: &mut PageContext<D, S>,
        requested: &str,
    ) -> LoadOutcome {
        match self.fetch(&ctx.base_path, requested).await {
            Some(loaded) => self.apply(ctx, loaded),
            None => LoadOutcome::Abandoned,
        }
    }

    /// Page startup: bind the selectors, then load the persisted language
    pub async fn init<D: Document, S: LanguageStore>(
        &self,
        ctx: &mut PageContext<D, S>,
    ) -> (LanguageSwitcher<D::Node>, LoadOutcome) {
        let switcher = LanguageSwitcher::bind(&ctx.document);
        let initial = self.persistence.load_initial(&ctx.store);
        debug!(selectors = switcher.bindings().len(), %initial, "Starting page");

        let outcome = self.load(ctx, &initial).await;
        (switcher, outcome)
    }

    /// Handle a click on `node`. Always refetches, even for the active
    /// language; `None` when the node is not a selector.
    pub async fn click<D: Document, S: LanguageStore>(
        &self,
        ctx: &mut PageContext<D, S>,
        switcher: &LanguageSwitcher<D::Node>,
        node: &D::Node,
    ) -> Option<LoadOutcome> {
        let code = switcher.language_for(node)?.to_string();
        Some(self.load(ctx, &code).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use crate::observer::RecordingObserver;
    use crate::persistence::MemoryStore;
    use crate::source::MemorySource;

    fn page() -> PageContext<MemoryDocument, MemoryStore> {
        PageContext::new(MemoryDocument::new(), MemoryStore::new(), "/", "/franchise-ALTSETING")
    }

    #[test]
    fn test_settings_from_config() {
        let settings = RenderSettings::default();
        assert_eq!(settings.default_language, Language::En);
        assert_eq!(settings.data_dir, "data");
        assert_eq!(settings.storage_key, "altseting-lang");
        assert_eq!(settings.stale_responses, StaleResponsePolicy::LastResponseWins);
    }

    #[test]
    fn test_from_config_requires_origin() {
        let mut config = SiteConfig::default();
        assert!(SiteRenderer::from_config(&config).is_err());

        config.http.origin = Some("https://example.github.io/".to_string());
        let renderer = SiteRenderer::from_config(&config).unwrap();
        assert_eq!(renderer.latest_ticket(), 0);
    }

    #[tokio::test]
    async fn test_tickets_increase_per_fetch() {
        let source = MemorySource::new().with_document("./data/en.json", "{}");
        let renderer = SiteRenderer::new(source, RenderSettings::default());
        let ctx = page();

        let first = renderer.fetch(&ctx.base_path, "EN").await.unwrap();
        let second = renderer.fetch(&ctx.base_path, "EN").await.unwrap();
        assert_eq!((first.ticket, second.ticket), (1, 2));
        assert_eq!(renderer.latest_ticket(), 2);
    }

    #[tokio::test]
    async fn test_default_failure_is_not_retried() {
        let observer = Arc::new(RecordingObserver::new());
        let renderer = SiteRenderer::new(MemorySource::new(), RenderSettings::default())
            .with_observer(observer.clone());
        let mut ctx = page();

        assert_eq!(renderer.load(&mut ctx, "EN").await, LoadOutcome::Abandoned);
        assert_eq!(renderer.source().requests(), vec!["./data/en.json"]);
        assert!(matches!(
            observer.events().as_slice(),
            [
                LoadEvent::FetchFailed { language: Language::En, .. },
                LoadEvent::Abandoned { language: Language::En },
            ]
        ));
    }

    #[tokio::test]
    async fn test_unsupported_code_is_substituted() {
        let observer = Arc::new(RecordingObserver::new());
        let source = MemorySource::new().with_document("./data/en.json", "{}");
        let renderer = SiteRenderer::new(source, RenderSettings::default())
            .with_observer(observer.clone());
        let mut ctx = page();

        let outcome = renderer.load(&mut ctx, "de").await;
        assert_eq!(outcome.language(), Some(Language::En));
        assert_eq!(
            observer.events()[0],
            LoadEvent::LanguageSubstituted {
                requested: "de".to_string(),
                used: Language::En
            }
        );
        assert_eq!(ctx.store.get("altseting-lang").as_deref(), Some("EN"));
    }
}
