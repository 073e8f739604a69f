//! Crawler module for first-link traversal
//!
//! This module contains the core traversal logic, including:
//! - HTTP fetching of markup-only article renderings
//! - First-link extraction
//! - The hop-by-hop traversal engine
//! - Session coordination across runs

mod coordinator;
mod fetcher;
mod parser;
mod traversal;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchError, FetchResult, FetchedPage, Fetcher, PageSource};
pub use parser::{first_link, LinkExtractor};
pub use traversal::{
    Traversal, TraversalResult, MSG_FETCH_FAILED, MSG_FOUND_IN_CACHE, MSG_LIMIT_REACHED,
    MSG_NO_LINK,
};
