//! Integration tests for the walker
//!
//! These tests use wiremock to stand in for the encyclopedia and exercise
//! fetching, traversal, and session coordination end-to-end.

mod driver_tests;
mod fetch_tests;

use philosophy_walker::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointed at the mock server
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.timeout_secs = 1;
    config
}

/// Mounts an article whose body links to `next` (or to nothing)
///
/// `expected_fetches` is verified when the server is dropped.
pub async fn mount_article(
    server: &MockServer,
    name: &str,
    next: Option<&str>,
    expected_fetches: u64,
) {
    let body = match next {
        Some(next) => format!(
            r#"<div class="hatnote">Not to be confused with <a href="/wiki/Decoy">Decoy</a>.</div>
               <p><b>{name}</b> (from <a href="/wiki/Etymology">Latin</a>) is a
               <a href="/wiki/{next}">{next}</a> and <a href="/wiki/Other">other</a>.</p>"#
        ),
        None => "<p>This article has no links.</p>".to_string(),
    };

    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", name)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .expect(expected_fetches)
        .mount(server)
        .await;
}
