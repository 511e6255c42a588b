//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the fetcher and the full crawl cycle end-to-end.

use site_tally::config::{Config, HttpConfig};
use site_tally::crawler::{build_http_client, fetch_url, run_crawl, CrawlSummary};
use site_tally::output::format_report;
use site_tally::{FetchError, SkipReason};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` as HTML at `page_path`
async fn mount_html(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// Builds an HTML page containing one anchor per href
fn page_with_links(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!("<html><head><title>Test</title></head><body>{}</body></html>", anchors)
}

/// `127.0.0.1:PORT`, the registry key of the server root
fn root_key(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn rows(summary: &CrawlSummary) -> Vec<(String, usize)> {
    summary
        .pages
        .iter()
        .map(|p| (p.url.clone(), p.count))
        .collect()
}

async fn get_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_fetch_html_page() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", "<html><body>hello</body></html>").await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let body = fetch_url(&client, &format!("{}/", mock_server.uri()))
        .await
        .expect("fetch should succeed");

    assert!(body.contains("hello"));
}

#[tokio::test]
async fn test_fetch_accepts_html_with_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_url(&client, &format!("{}/", mock_server.uri())).await;

    assert_eq!(result.unwrap(), "<p>ok</p>");
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_url(&client, &format!("{}/gone", mock_server.uri())).await;

    match result {
        Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_rejects_non_html() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_url(&client, &format!("{}/data.json", mock_server.uri())).await;

    match result {
        Err(e @ FetchError::UnsupportedContentType { .. }) => {
            assert_eq!(e.kind(), "unsupported_content_type");
        }
        other => panic!("expected UnsupportedContentType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let mock_server = MockServer::builder().start().await;
    let url = format!("{}/", mock_server.uri());
    // Nothing listens on the port once the server is gone
    drop(mock_server);

    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_url(&client, &url).await;

    match result {
        Err(e @ FetchError::Network { .. }) => assert_eq!(e.kind(), "network"),
        other => panic!("expected Network, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_unsupported_scheme_is_network_error() {
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let result = fetch_url(&client, "ftp://127.0.0.1:21/file").await;

    match result {
        Err(FetchError::Network { url, .. }) => assert_eq!(url, "ftp://127.0.0.1:21/file"),
        other => panic!("expected Network, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_page_recorded_as_network_failure() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());
    mount_html(&mock_server, "/", &page_with_links(&["ftp://127.0.0.1:21/file"])).await;

    let summary = run_crawl(Config::new(base_url, 2, 10)).await.unwrap();

    assert_eq!(summary.pages.len(), 2);
    assert_eq!(summary.stats.failures.len(), 1);
    assert_eq!(summary.stats.failures[0].kind, "network");
}

#[tokio::test]
async fn test_full_crawl_small_site() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_html(&mock_server, "/", &page_with_links(&["/a", "/b"])).await;
    mount_html(&mock_server, "/a", &page_with_links(&["/"])).await;
    mount_html(&mock_server, "/b", &page_with_links(&[])).await;

    let summary = run_crawl(Config::new(base_url.clone(), 2, 10))
        .await
        .expect("crawl should run");

    let root = root_key(&mock_server);
    assert_eq!(
        rows(&summary),
        vec![
            (root.clone(), 2),
            (format!("{}/a", root), 1),
            (format!("{}/b", root), 1),
        ]
    );
    assert_eq!(get_count(&mock_server).await, 3);

    let report = format_report(&summary);
    assert!(report.contains(&format!("REPORT for {}", base_url)));
    assert!(report.contains(&format!("2  {}\n", root)));
}

#[tokio::test]
async fn test_crawl_respects_page_cap() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    let links: Vec<String> = (0..50).map(|i| format!("/page{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_html(&mock_server, "/", &page_with_links(&link_refs)).await;
    for link in &links {
        mount_html(&mock_server, link, &page_with_links(&[])).await;
    }

    let summary = run_crawl(Config::new(base_url, 4, 1)).await.unwrap();

    assert_eq!(rows(&summary), vec![(root_key(&mock_server), 1)]);
    assert_eq!(get_count(&mock_server).await, 1);
    assert_eq!(summary.stats.skipped(SkipReason::AtCapacity), 50);
}

#[tokio::test]
async fn test_failed_pages_registered_without_expansion() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_html(
        &mock_server,
        "/",
        &page_with_links(&["/missing", "/data.json", "http://other.invalid/x"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    // Links inside a non-HTML body must never be followed
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/hidden">x</a>"#, "application/json"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let summary = run_crawl(Config::new(base_url, 3, 10)).await.unwrap();

    let root = root_key(&mock_server);
    let mut urls: Vec<String> = summary.pages.iter().map(|p| p.url.clone()).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![
            root.clone(),
            format!("{}/data.json", root),
            format!("{}/missing", root),
        ]
    );
    assert!(summary.pages.iter().all(|p| p.count == 1));
    assert_eq!(summary.stats.pages_fetched, 1);
    assert_eq!(summary.stats.skipped(SkipReason::OutOfScope), 1);

    let mut kinds: Vec<&str> = summary.stats.failures.iter().map(|f| f.kind).collect();
    kinds.sort();
    assert_eq!(kinds, vec!["http_status", "unsupported_content_type"]);
}

#[tokio::test]
async fn test_crawl_rejects_invalid_seed() {
    let result = run_crawl(Config::new("not a url", 2, 10)).await;
    assert!(result.is_err());
}
