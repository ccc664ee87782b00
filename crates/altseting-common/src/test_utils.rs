//! Test utilities shared by the workspace crates.
//!
//! Enabled through the `testing` feature so integration tests in other crates
//! can pull in the same fixtures and property strategies.

use crate::Language;
use proptest::prelude::*;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Strategy producing one of the supported languages.
pub fn any_language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::all().to_vec())
}

/// Strategy producing language codes that are never in the supported set.
pub fn unsupported_code() -> impl Strategy<Value = String> {
    "[A-Za-z]{0,4}".prop_filter("must not be a supported code", |code| {
        Language::from_code(code).is_none()
    })
}

/// Strategy producing dotted key paths of one to four segments.
pub fn dotted_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..5).prop_map(|segments| segments.join("."))
}
