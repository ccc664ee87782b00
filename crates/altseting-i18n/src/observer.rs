//! Diagnostics hook for the silent-failure load path.
//!
//! Nothing a load does is ever surfaced to the page. Observers receive every
//! decision instead, so failures stay visible to logs and tests.

use crate::binder::BindingKind;
use altseting_common::Language;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Why the infographic section was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfographicSkip {
    /// No element carries the infographic marker
    NoContainer,
    /// `infographic.steps` is absent or not an array
    NoSteps,
}

/// Something that happened during a load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// The requested code is unsupported and the default was used instead
    LanguageSubstituted { requested: String, used: Language },
    /// Fetching or decoding a dictionary failed
    FetchFailed {
        language: Language,
        url: String,
        error: String,
    },
    /// Retrying with the default language
    FallingBack { from: Language, to: Language },
    /// The default language failed too; the page keeps its content
    Abandoned { language: Language },
    /// A response arrived after a newer request was issued and was dropped
    Superseded { language: Language },
    /// A bound element's path resolved to nothing
    BindingMissing { kind: BindingKind, path: String },
    /// A bound element's path resolved to a value of the wrong shape
    BindingTypeMismatch { kind: BindingKind, path: String },
    /// The infographic was not rendered
    InfographicSkipped { reason: InfographicSkip },
    /// The page now shows this language
    Rendered { language: Language },
    /// The language was written to the store
    Persisted { language: Language },
}

/// Receives load events
pub trait LoadObserver: Send + Sync {
    /// Called synchronously for every event, in order
    fn on_event(&self, event: &LoadEvent);
}

/// Routes events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_event(&self, event: &LoadEvent) {
        match event {
            LoadEvent::LanguageSubstituted { requested, used } => {
                debug!("Unsupported language {:?}, using {}", requested, used)
            }
            LoadEvent::FetchFailed { language, url, error } => {
                warn!(%language, %url, "Dictionary load failed: {}", error)
            }
            LoadEvent::FallingBack { from, to } => {
                info!("Falling back from {} to {}", from, to)
            }
            LoadEvent::Abandoned { language } => {
                warn!(%language, "Default dictionary unavailable, keeping current page content")
            }
            LoadEvent::Superseded { language } => {
                debug!(%language, "Dropping response for superseded request")
            }
            LoadEvent::BindingMissing { kind, path } => {
                debug!(attribute = kind.attribute(), %path, "No dictionary value")
            }
            LoadEvent::BindingTypeMismatch { kind, path } => {
                warn!(attribute = kind.attribute(), %path, "Dictionary value has the wrong shape")
            }
            LoadEvent::InfographicSkipped { reason } => {
                debug!("Infographic skipped: {:?}", reason)
            }
            LoadEvent::Rendered { language } => info!(%language, "Page rendered"),
            LoadEvent::Persisted { language } => debug!(%language, "Language persisted"),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoadObserver for NoopObserver {
    fn on_event(&self, _event: &LoadEvent) {}
}

/// Keeps every event, for assertions
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<LoadEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<LoadEvent> {
        self.events.lock().clone()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl LoadObserver for RecordingObserver {
    fn on_event(&self, event: &LoadEvent) {
        self.events.lock().push(event.clone());
    }
}
