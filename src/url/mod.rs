//! Page identity for Philosophy Walker
//!
//! This module provides the canonical `PageId` key, the `Site` describing the
//! encyclopedia host, and the canonicalization rule shared by the fetcher,
//! the link extractor, and command-line input.

mod normalize;

use crate::{UrlError, UrlResult};
use std::borrow::Borrow;
use std::fmt;
use url::Url;

// Re-export main functions
pub use normalize::{normalize_page_id, resolve_href};

/// Base URL of the default encyclopedia
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// Canonical key identifying a page independent of URL decoration
///
/// Values built through [`normalize_page_id`] or [`Site::normalize`] are
/// canonical. The `From` conversions take the string as-is and assume it is
/// already canonical (bare article names such as `"Philosophy"` are).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the identifier is still a full URL (off-site page)
    pub fn is_url(&self) -> bool {
        self.0.starts_with("http")
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The encyclopedia host that article names are resolved against
///
/// All canonicalization prefixes are derived from the host, so a `Site`
/// pointed at a local mock server canonicalizes that server's URLs exactly
/// like the real encyclopedia's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    scheme: String,
    authority: String,
}

impl Site {
    /// Creates a site from a base URL such as `https://en.wikipedia.org`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not HTTP(S), or has no
    /// host.
    ///
    /// # Examples
    ///
    /// ```
    /// use philosophy_walker::url::Site;
    ///
    /// let site = Site::new("https://en.wikipedia.org").unwrap();
    /// assert_eq!(site.article_url(&"Cat".into()), "https://en.wikipedia.org/wiki/Cat");
    /// ```
    pub fn new(base_url: &str) -> UrlResult<Self> {
        let url = Url::parse(base_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            authority,
        })
    }

    /// Host (and port, if any) of the site
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Base URL of the site, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Prefix that turns an article name into its URL
    pub fn article_prefix(&self) -> String {
        format!("{}/wiki/", self.base_url())
    }

    /// Builds the URL to request for a page
    ///
    /// Off-site pages are still full URLs and are returned unchanged.
    pub fn article_url(&self, page: &PageId) -> String {
        if page.is_url() {
            page.as_str().to_string()
        } else {
            format!("{}{}", self.article_prefix(), page)
        }
    }

    /// Canonicalizes a bare page name or a full URL
    pub fn normalize(&self, raw: &str) -> PageId {
        normalize_page_id(raw, self)
    }

    /// Host decorations stripped during canonicalization
    pub(crate) fn strip_prefixes(&self) -> [String; 4] {
        [
            format!("http://{}/wiki/", self.authority),
            format!("https://{}/wiki/", self.authority),
            format!("http://{}/w/index.php?title=", self.authority),
            format!("https://{}/w/index.php?title=", self.authority),
        ]
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            authority: "en.wikipedia.org".to_string(),
        }
    }
}
