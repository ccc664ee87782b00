//! Where dictionaries come from
//!
//! A source turns a dictionary URL into a parsed [`Dictionary`]. The renderer
//! owns the fallback policy; sources only report success or failure.

use crate::dictionary::Dictionary;
use crate::error::{I18nError, I18nResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use url::Url;

/// Fetches dictionaries by URL
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Fetch and parse the dictionary at `url`
    async fn fetch(&self, url: &str) -> I18nResult<Dictionary>;
}

/// Fetches dictionaries over HTTP relative to a site origin
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    origin: Url,
    bypass_cache: bool,
}

impl HttpSource {
    /// Create a source for `origin`, e.g. `https://example.github.io/`
    pub fn new(origin: &str, bypass_cache: bool) -> I18nResult<Self> {
        let origin = Url::parse(origin).map_err(|source| I18nError::InvalidUrl {
            url: origin.to_string(),
            source,
        })?;
        Ok(Self::with_client(Client::new(), origin, bypass_cache))
    }

    /// Create a source around an existing client
    pub fn with_client(client: Client, origin: Url, bypass_cache: bool) -> Self {
        Self {
            client,
            origin,
            bypass_cache,
        }
    }

    /// Resolve a dictionary URL against the origin
    pub fn resolve(&self, url: &str) -> I18nResult<Url> {
        self.origin.join(url).map_err(|source| I18nError::InvalidUrl {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> I18nResult<Dictionary> {
        let target = self.resolve(url)?;
        debug!("Requesting dictionary {}", target);

        let mut request = self.client.get(target.clone());
        if self.bypass_cache {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        let network_error = |source| I18nError::Network {
            url: target.to_string(),
            source,
        };
        let response = request.send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::Http {
                url: target.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network_error)?;
        Dictionary::from_slice(&body).map_err(|source| I18nError::Parse {
            url: target.to_string(),
            source,
        })
    }
}

/// Reads dictionaries from a site directory on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Serve dictionary URLs from files under `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a dictionary URL onto a file below the root.
    ///
    /// Empty, `.` and `..` segments are dropped, so the result never leaves
    /// the root.
    pub fn path_for(&self, url: &str) -> PathBuf {
        url.split('/')
            .filter(|segment| !matches!(*segment, "" | "." | ".."))
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl DictionarySource for FileSource {
    async fn fetch(&self, url: &str) -> I18nResult<Dictionary> {
        let path = self.path_for(url);
        debug!("Reading dictionary {:?}", path);

        let bytes = tokio::fs::read(&path).await.map_err(|source| I18nError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Dictionary::from_slice(&bytes).map_err(|source| I18nError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

/// Dictionaries held in memory, keyed by URL.
///
/// Useful for embedding dictionaries in the binary and for tests; every
/// request is recorded.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register raw JSON text under `url`
    pub fn with_document(mut self, url: impl Into<String>, json: impl Into<String>) -> Self {
        self.documents.insert(url.into(), json.into());
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl DictionarySource for MemorySource {
    async fn fetch(&self, url: &str) -> I18nResult<Dictionary> {
        self.requests.lock().push(url.to_string());
        let json = self
            .documents
            .get(url)
            .ok_or_else(|| I18nError::NotFound {
                url: url.to_string(),
            })?;
        Dictionary::from_json(json).map_err(|source| I18nError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_http_source_resolves_relative_urls() {
        let source = HttpSource::new("https://example.github.io/", true).unwrap();
        assert_eq!(
            source.resolve("/franchise-ALTSETING/data/pl.json").unwrap().as_str(),
            "https://example.github.io/franchise-ALTSETING/data/pl.json"
        );
        assert_eq!(
            source.resolve("./data/en.json").unwrap().as_str(),
            "https://example.github.io/data/en.json"
        );
    }

    #[test]
    fn test_http_source_rejects_relative_origin() {
        assert!(matches!(
            HttpSource::new("example.github.io", true),
            Err(I18nError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_file_source_path_mapping() {
        let source = FileSource::new("/srv/site");
        assert_eq!(source.path_for("./data/en.json"), PathBuf::from("/srv/site/data/en.json"));
        assert_eq!(
            source.path_for("/franchise-ALTSETING/data/ru.json"),
            PathBuf::from("/srv/site/franchise-ALTSETING/data/ru.json")
        );
    }

    #[test]
    fn test_file_source_stays_under_root() {
        let source = FileSource::new("/srv/site");
        assert_eq!(
            source.path_for("/../../etc/data/en.json"),
            PathBuf::from("/srv/site/etc/data/en.json")
        );
        assert_eq!(
            source.path_for("./data/../../pl.json"),
            PathBuf::from("/srv/site/data/pl.json")
        );
        assert!(source.path_for("../..").starts_with("/srv/site"));
    }

    #[tokio::test]
    async fn test_file_source_reads_and_parses() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/en.json"), r#"{"hero":{"title":"Hi"}}"#).unwrap();
        fs::write(dir.path().join("data/pl.json"), "{ broken").unwrap();

        let source = FileSource::new(dir.path());
        let dict = source.fetch("./data/en.json").await.unwrap();
        assert_eq!(dict.resolve_text("hero.title").as_deref(), Some("Hi"));

        assert!(matches!(
            source.fetch("./data/pl.json").await,
            Err(I18nError::Parse { .. })
        ));
        assert!(matches!(
            source.fetch("./data/ua.json").await,
            Err(I18nError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_source_records_requests() {
        let source = MemorySource::new().with_document("./data/en.json", "{}");

        assert!(source.fetch("./data/en.json").await.is_ok());
        assert!(matches!(
            source.fetch("./data/ru.json").await,
            Err(I18nError::NotFound { .. })
        ));
        assert_eq!(source.requests(), vec!["./data/en.json", "./data/ru.json"]);
    }
}
