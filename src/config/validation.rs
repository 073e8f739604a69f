use crate::config::types::{Config, CrawlerConfig, SiteConfig, StoreConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on the hop limit; longer chains are certainly loops
const MAX_HOP_LIMIT: u32 = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_store_config(&config.store)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // Zero is allowed: only cached starts can succeed
    if config.hop_limit > MAX_HOP_LIMIT {
        return Err(ConfigError::Validation(format!(
            "hop_limit must be <= {}, got {}",
            MAX_HOP_LIMIT, config.hop_limit
        )));
    }

    if config.runs < 1 {
        return Err(ConfigError::Validation(format!(
            "runs must be >= 1, got {}",
            config.runs
        )));
    }

    if config.destination.trim().is_empty() {
        return Err(ConfigError::Validation(
            "destination cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.uri.trim().is_empty() {
        return Err(ConfigError::Validation("store uri cannot be empty".to_string()));
    }
    Ok(())
}
