//! Page fetcher behavior against a mock server

use crate::test_config;
use philosophy_walker::crawler::{FetchError, Fetcher, PageSource};
use philosophy_walker::url::{PageId, Site};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> Fetcher {
    let config = test_config(&server.uri());
    let site = Site::new(&server.uri()).unwrap();
    Fetcher::new(&config.crawler, site).unwrap()
}

#[tokio::test]
async fn test_fetch_requests_render_mode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Cat"))
        .and(query_param("action", "render"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Cat</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher_for(&server).fetch(&PageId::from("Cat")).await.unwrap();

    assert_eq!(page.content, "<p>Cat</p>");
    assert_eq!(page.canonical.as_str(), "Cat");
}

#[tokio::test]
async fn test_fetch_canonicalizes_redirect_target() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Special:Random"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/wiki/Felidae?action=render", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Felidae"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Felidae</p>"))
        .mount(&server)
        .await;

    let page = fetcher_for(&server)
        .fetch(&PageId::from("Special:Random"))
        .await
        .unwrap();

    assert_eq!(page.canonical.as_str(), "Felidae");
}

#[tokio::test]
async fn test_fetch_http_error_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch(&PageId::from("Nope"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::HttpStatus {
            url: format!("{}/wiki/Nope", server.uri()),
            status: 404,
        }
    );
    assert_eq!(
        err.to_string(),
        format!("{}/wiki/Nope HTTP Error: 404", server.uri())
    );
}

#[tokio::test]
async fn test_fetch_server_error_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch(&PageId::from("Busy"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>slow</p>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch(&PageId::from("Slow"))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout);
    assert_eq!(err.to_string(), "Connection timed out.");
}

#[tokio::test]
async fn test_fetch_redirect_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Loop"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/wiki/Loop", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    let err = fetcher_for(&server)
        .fetch(&PageId::from("Loop"))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::TooManyRedirects);
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Nothing listens on port 1
    let config = test_config("http://127.0.0.1:1");
    let site = Site::new("http://127.0.0.1:1").unwrap();
    let fetcher = Fetcher::new(&config.crawler, site).unwrap();

    let err = fetcher.fetch(&PageId::from("Cat")).await.unwrap_err();

    assert_eq!(err, FetchError::Connect);
    assert_eq!(err.to_string(), "Can't connect to domain.");
}

#[tokio::test]
async fn test_fetch_full_url_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .and(query_param("action", "render"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>About</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    let page = PageId::from(format!("{}/about", server.uri()));
    let fetched = fetcher.fetch(&page).await.unwrap();

    // Not an article path, so the host stays on the identifier
    assert_eq!(fetched.canonical.as_str(), format!("{}/about", server.uri()));
}
