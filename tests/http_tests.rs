use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use offlinify::error::ArchiveError;
use offlinify::filter::{FilterDecision, FilterPrompt};
use offlinify::loader::PageLoader;
use offlinify::session::CrawlSession;
use offlinify::store::FileStore;
use offlinify::{AssetFetcher, Crawler, HttpLoader};

struct PresetPrompt(String);

impl FilterPrompt for PresetPrompt {
    fn resolve_filter(&self, _candidates: &[String]) -> FilterDecision {
        FilterDecision::Resolved(self.0.clone())
    }
}

async fn serve_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_loader_loads_a_page() {
    let server = MockServer::start().await;
    serve_html(&server, "/page", "<html><body>hello</body></html>").await;

    let loader = HttpLoader::new(Duration::from_secs(5)).unwrap();
    let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
    let page = loader.open(&url).await.unwrap();

    assert_eq!(page.url().path(), "/page");
    let snapshot = page.snapshot().unwrap();
    assert!(snapshot.html.contains("hello"));
}

#[tokio::test]
async fn test_http_loader_reports_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let loader = HttpLoader::new(Duration::from_secs(5)).unwrap();
    let url = Url::parse(&format!("{}/gone", server.uri())).unwrap();

    let result = loader.open(&url).await;
    assert!(matches!(result, Err(ArchiveError::BadStatus { .. })));
}

#[tokio::test]
async fn test_http_loader_times_out_on_slow_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let loader = HttpLoader::new(Duration::from_millis(200)).unwrap();
    let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();

    let result = loader.open(&url).await;
    assert!(matches!(result, Err(ArchiveError::LoadTimeout { .. })));
}

#[tokio::test]
async fn test_fetch_all_saves_successes_and_survives_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"body{}".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.js"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = tempdir().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let fetcher = AssetFetcher::new(4, Duration::from_secs(5)).unwrap();

    let urls = vec![
        format!("{}/style.css", server.uri()),
        format!("{}/missing.js", server.uri()),
    ];
    let fetched = fetcher.fetch_all(&urls, &store).await;

    assert_eq!(fetched, 1);
    let assets_dir = temp_dir.path().join("assets");
    let saved: Vec<_> = std::fs::read_dir(&assets_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with("_style.css"));
}

#[tokio::test]
async fn test_end_to_end_archive_over_http() {
    let server = MockServer::start().await;
    serve_html(
        &server,
        "/",
        r#"<html><head><link rel="stylesheet" href="/style.css"></head>
           <body><a href="/about">about</a></body></html>"#,
    )
    .await;
    serve_html(&server, "/about", "<html><body>about us</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"body{}".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = tempdir().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();
    let session = Arc::new(CrawlSession::new());
    let crawler = Crawler::new(
        HttpLoader::new(Duration::from_secs(5)).unwrap(),
        PresetPrompt("127.0.0.1".to_string()),
        store.clone(),
        Arc::clone(&session),
        4,
    );

    let root = Url::parse(&server.uri()).unwrap();
    let outcome = crawler.crawl(&root).await.unwrap();
    assert_eq!(outcome.pages, 2);
    assert!(!outcome.cancelled);

    let fetcher = AssetFetcher::new(4, Duration::from_secs(5)).unwrap();
    let fetched = fetcher.fetch_all(&session.dependencies(), &store).await;
    assert_eq!(fetched, 1);

    assert!(temp_dir.path().join("_.html").exists());
    assert!(temp_dir.path().join("_about.html").exists());

    // The archived root references the local asset copy, not the server.
    let root_html = std::fs::read_to_string(temp_dir.path().join("_.html")).unwrap();
    assert!(root_html.contains("assets/"));
    assert!(!root_html.contains("/style.css\""));
}
