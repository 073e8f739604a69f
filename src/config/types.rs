use serde::Deserialize;

/// Default connection string for the result store: read-only, so the cache
/// can be seeded but results are never written
pub const READ_ONLY_STORE_URI: &str = "file:philosophy.db?mode=ro";

/// Main configuration structure for Philosophy Walker
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Traversal behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of hops before a run gives up
    #[serde(rename = "hop-limit")]
    pub hop_limit: u32,

    /// Number of independent runs per session
    pub runs: u32,

    /// Page every path aims to reach
    pub destination: String,

    /// How unmatched closing parentheses are treated during link extraction
    #[serde(rename = "paren-policy")]
    pub paren_policy: ParenPolicy,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Longest redirect chain followed before a fetch fails
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            hop_limit: 40,
            runs: 1,
            destination: "Philosophy".to_string(),
            paren_policy: ParenPolicy::default(),
            timeout_secs: 5,
            max_redirects: 10,
            user_agent: format!("philosophy-walker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Parenthesis-depth policy for link extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParenPolicy {
    /// An unmatched `)` leaves the depth at zero and scanning continues
    #[default]
    Clamp,

    /// An unmatched `)` ends extraction with no link
    Abort,
}

/// Encyclopedia host configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that article names are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: crate::url::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Result store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite connection string (`mode=ro` makes the store read-only)
    pub uri: String,

    /// Seed the path cache from stored successful results
    #[serde(rename = "seed-cache")]
    pub seed_cache: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: READ_ONLY_STORE_URI.to_string(),
            seed_cache: true,
        }
    }
}
