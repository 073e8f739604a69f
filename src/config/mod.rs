//! Configuration module for Philosophy Walker
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and layering command-line overrides on top of them. Every key has a
//! default, so running without a configuration file is the common case.
//!
//! # Example
//!
//! ```no_run
//! use philosophy_walker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walker.toml")).unwrap();
//! println!("Hop limit: {}", config.crawler.hop_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ParenPolicy, SiteConfig, StoreConfig, READ_ONLY_STORE_URI};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, load_config_or_default, Overrides};
pub use validation::validate;
