//! HTTP fetcher implementation
//!
//! This module owns the only network I/O of the crawler:
//! - Building the HTTP client with the configured timeout and redirect limit
//! - Requesting the markup-only rendering of an article
//! - Canonicalizing the post-redirect URL into a `PageId`
//! - Classifying failures into a closed set of reasons
//!
//! There are no retries. A failed fetch ends the run; the hop budget is the
//! only retry budget.

use crate::config::CrawlerConfig;
use crate::url::{PageId, Site};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be fetched
///
/// The `Display` text is the reason recorded on the run's result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Can't connect to domain.")]
    Connect,

    #[error("Connection timed out.")]
    Timeout,

    #[error("Too many redirects.")]
    TooManyRedirects,

    #[error("{url} HTTP Error: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Something unusual went wrong.")]
    Unknown,
}

impl FetchError {
    /// Classifies a transport error
    fn classify(error: &reqwest::Error) -> Self {
        if error.is_connect() {
            Self::Connect
        } else if error.is_timeout() {
            Self::Timeout
        } else if error.is_redirect() {
            Self::TooManyRedirects
        } else if let Some(status) = error.status() {
            Self::HttpStatus {
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            }
        } else {
            Self::Unknown
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Document markup
    pub content: String,

    /// Canonical identifier of the post-redirect URL
    pub canonical: PageId,
}

/// Result of a fetch operation
pub type FetchResult = Result<FetchedPage, FetchError>;

/// Source of page content for the traversal engine
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches the current content of a page
    async fn fetch(&self, page: &PageId) -> FetchResult;
}

/// Builds an HTTP client with the crawler configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher backed by an HTTP client
pub struct Fetcher {
    client: Client,
    site: Site,
}

impl Fetcher {
    /// Creates a fetcher for the given site
    pub fn new(config: &CrawlerConfig, site: Site) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            site,
        })
    }
}

impl PageSource for Fetcher {
    /// Fetches the markup-only rendering of a page
    ///
    /// # Request Flow
    ///
    /// 1. Build the article URL (bare names get the site's article prefix)
    /// 2. Send a GET with `action=render`, following redirects up to the limit
    /// 3. Fail on a 4xx/5xx status
    /// 4. Canonicalize the final URL and read the body
    ///
    /// # Failure Classes
    ///
    /// | Condition | Reason |
    /// |-----------|--------|
    /// | Connection refused, DNS failure, TLS error | `Can't connect to domain.` |
    /// | Timeout | `Connection timed out.` |
    /// | Redirect chain over the limit | `Too many redirects.` |
    /// | HTTP 4xx/5xx | `<url> HTTP Error: <status>` |
    /// | Anything else | `Something unusual went wrong.` |
    async fn fetch(&self, page: &PageId) -> FetchResult {
        let url = self.site.article_url(page);

        let response = self
            .client
            .get(&url)
            .query(&[("action", "render")])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Request for {} failed: {}", url, e);
                FetchError::classify(&e)
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let canonical = self.site.normalize(response.url().as_str());

        let content = response.text().await.map_err(|e| {
            tracing::debug!("Reading body of {} failed: {}", url, e);
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Unknown
            }
        })?;

        Ok(FetchedPage { content, canonical })
    }
}
