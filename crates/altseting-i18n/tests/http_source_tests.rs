//! Dictionary fetches over a real HTTP connection

use altseting_common::test_utils::init_test_logging;
use altseting_common::Language;
use altseting_i18n::{
    DictionarySource, HttpSource, I18nError, LanguageStore, LoadOutcome,
    MemoryDocument, MemoryStore, PageContext, RenderSettings, SiteRenderer,
};
use parking_lot::Mutex;
use reqwest::Client;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// Canned HTTP/1.1 responses keyed by request path
struct StaticSite {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticSite {
    async fn serve(routes: &[(&str, u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
                .collect(),
        );

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = log.clone();
                tokio::spawn(async move { answer(stream, &routes, &log).await });
            }
        });

        Self { addr, requests }
    }

    /// A source pointed at this site, ignoring any proxy set in the environment
    fn source(&self, bypass_cache: bool) -> HttpSource {
        local_source(self.addr, bypass_cache)
    }

    /// Raw request heads received so far
    fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Request paths received so far, in order
    fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|head| head.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

async fn answer(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    log: &Mutex<Vec<String>>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head).into_owned();
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    log.lock().push(head);

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, String::from("not found")));
    let reason = if status == 200 { "OK" } else { "Not Found" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn local_source(addr: SocketAddr, bypass_cache: bool) -> HttpSource {
    let client = Client::builder().no_proxy().build().unwrap();
    let origin = Url::parse(&format!("http://{addr}/")).unwrap();
    HttpSource::with_client(client, origin, bypass_cache)
}

fn has_header(head: &str, name: &str, value: &str) -> bool {
    head.lines().any(|line| {
        line.split_once(':').map_or(false, |(key, found)| {
            key.trim().eq_ignore_ascii_case(name) && found.trim().eq_ignore_ascii_case(value)
        })
    })
}

#[tokio::test]
async fn test_bypass_sends_no_cache_headers() {
    let site = StaticSite::serve(&[("/data/en.json", 200, r#"{"hero":{"title":"Hi"}}"#)]).await;
    let source = site.source(true);

    let dict = source.fetch("./data/en.json").await.unwrap();

    assert_eq!(dict.resolve_text("hero.title").as_deref(), Some("Hi"));
    let requests = site.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /data/en.json "));
    assert!(has_header(&requests[0], "cache-control", "no-cache"));
    assert!(has_header(&requests[0], "pragma", "no-cache"));
}

#[tokio::test]
async fn test_cached_fetch_omits_no_cache_headers() {
    let site = StaticSite::serve(&[("/data/en.json", 200, "{}")]).await;
    let source = site.source(false);

    source.fetch("./data/en.json").await.unwrap();

    let requests = site.requests();
    assert!(!has_header(&requests[0], "cache-control", "no-cache"));
    assert!(!has_header(&requests[0], "pragma", "no-cache"));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let site = StaticSite::serve(&[]).await;
    let source = site.source(true);

    let err = source.fetch("./data/ua.json").await.unwrap_err();

    match err {
        I18nError::Http { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/data/ua.json"));
        }
        other => panic!("expected an HTTP status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let site = StaticSite::serve(&[("/data/ru.json", 200, "{ \"hero\": ")]).await;
    let source = site.source(true);

    assert!(matches!(
        source.fetch("./data/ru.json").await,
        Err(I18nError::Parse { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_origin_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = local_source(addr, true);

    assert!(matches!(
        source.fetch("./data/en.json").await,
        Err(I18nError::Network { .. })
    ));
}

#[tokio::test]
async fn test_renderer_falls_back_over_http() {
    init_test_logging();
    let site = StaticSite::serve(&[(
        "/franchise-ALTSETING/data/en.json",
        200,
        r#"{"hero":{"title":"Build a franchise"}}"#,
    )])
    .await;
    let source = site.source(true);
    let renderer = SiteRenderer::new(source, RenderSettings::default());

    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let title = doc.element(root, "h1", &[("data-i18n", "hero.title")]);
    doc.append_text(title, "Franchise");
    let mut ctx = PageContext::new(
        doc,
        MemoryStore::new(),
        "/franchise-ALTSETING/index.html",
        "/franchise-ALTSETING",
    );

    let outcome = renderer.load(&mut ctx, "UA").await;

    assert_eq!(
        outcome,
        LoadOutcome::Rendered {
            language: Language::En,
            fell_back: true
        }
    );
    assert_eq!(ctx.document.text_content(title), "Build a franchise");
    assert_eq!(ctx.store.get("altseting-lang").as_deref(), Some("EN"));
    assert_eq!(
        site.paths(),
        vec![
            "/franchise-ALTSETING/data/ua.json",
            "/franchise-ALTSETING/data/en.json"
        ]
    );
}
