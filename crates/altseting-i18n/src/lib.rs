//! Attribute-driven page localization for the ALTSETING site
//!
//! Pages mark translatable elements with `data-i18n*` attributes holding
//! dotted dictionary paths. This crate:
//!
//! - Resolves dotted paths against nested JSON dictionaries
//! - Fetches a language's dictionary with a single fallback to the default
//! - Binds dictionary values into the page for five binding kinds
//! - Renders the icon infographic from `infographic.steps`
//! - Marks the active language selector and persists the choice
//!
//! Failures never surface to the page: content stays as it was and every
//! decision is reported to a [`LoadObserver`].
//!
//! # Example
//!
//! ```rust
//! use altseting_i18n::{
//!     LoadOutcome, MemoryDocument, MemorySource, MemoryStore, PageContext,
//!     RenderSettings, SiteRenderer,
//! };
//! use altseting_common::Language;
//!
//! let mut doc = MemoryDocument::new();
//! let root = doc.root();
//! let title = doc.element(root, "h1", &[("data-i18n", "hero.title")]);
//!
//! let source = MemorySource::new()
//!     .with_document("./data/en.json", r#"{"hero":{"title":"Welcome"}}"#);
//! let renderer = SiteRenderer::new(source, RenderSettings::default());
//! let mut ctx = PageContext::new(doc, MemoryStore::new(), "/index.html", "/franchise-ALTSETING");
//!
//! let (_switcher, outcome) = tokio_test::block_on(renderer.init(&mut ctx));
//! assert_eq!(outcome, LoadOutcome::Rendered { language: Language::En, fell_back: false });
//! assert_eq!(ctx.document.text_content(title), "Welcome");
//! ```

pub mod binder;
pub mod context;
pub mod dictionary;
pub mod dom;
pub mod error;
pub mod infographic;
pub mod location;
pub mod memory;
pub mod observer;
pub mod persistence;
pub mod renderer;
pub mod source;
pub mod switcher;

pub use binder::{bind, BindReport, BindingKind};
pub use context::PageContext;
pub use dictionary::Dictionary;
pub use dom::Document;
pub use error::{I18nError, I18nResult};
pub use infographic::{render_infographic, Icon, InfographicStep};
pub use location::{dictionary_url, BasePath};
pub use memory::{MemoryDocument, NodeId};
pub use observer::{
    InfographicSkip, LoadEvent, LoadObserver, NoopObserver, RecordingObserver, TracingObserver,
};
pub use persistence::{FileStore, LanguageStore, MemoryStore, Persistence};
pub use renderer::{LoadOutcome, LoadedDictionary, RenderSettings, SiteRenderer};
pub use source::{DictionarySource, FileSource, HttpSource, MemorySource};
pub use switcher::{set_active, LanguageSwitcher, SwitcherBinding};
