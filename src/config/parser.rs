use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Values from the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub hop_limit: Option<u32>,
    pub runs: Option<u32>,
    pub store_uri: Option<String>,
    pub ignore_cache: bool,
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration file if one was given, otherwise the defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

/// Applies command-line overrides and re-validates the result
///
/// `ignore_cache` only ever turns seeding off; it never re-enables seeding
/// that the file disabled.
pub fn apply_overrides(mut config: Config, overrides: &Overrides) -> Result<Config, ConfigError> {
    if let Some(hop_limit) = overrides.hop_limit {
        config.crawler.hop_limit = hop_limit;
    }
    if let Some(runs) = overrides.runs {
        config.crawler.runs = runs;
    }
    if let Some(uri) = &overrides.store_uri {
        config.store.uri = uri.clone();
    }
    if overrides.ignore_cache {
        config.store.seed_cache = false;
    }

    validate(&config)?;
    Ok(config)
}
