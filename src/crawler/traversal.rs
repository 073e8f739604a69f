//! Traversal engine
//!
//! Follows first links from a starting page until the current page has a
//! cached path to the destination, the hop limit is reached, a fetch fails,
//! or a page has no qualifying link.

use crate::cache::PathCache;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::LinkExtractor;
use crate::state::WalkState;
use crate::url::PageId;

pub const MSG_FOUND_IN_CACHE: &str = "Found in cache";
pub const MSG_LIMIT_REACHED: &str = "Path link limit reached";
pub const MSG_FETCH_FAILED: &str = "Unable to get html content: ";
pub const MSG_NO_LINK: &str = "Unable to find first link";

/// Outcome of one traversal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    /// Visited pages in order, ending with the cached path on success
    pub path: Vec<PageId>,

    /// Configured hop limit
    pub hop_limit: u32,

    /// Canonical starting page
    pub starting_page: PageId,

    /// Human-readable outcome
    pub message: String,

    pub has_error: bool,

    pub reached_destination: bool,

    /// The state that ended the run
    pub outcome: WalkState,
}

impl TraversalResult {
    fn new(starting_page: PageId, hop_limit: u32) -> Self {
        Self {
            path: Vec::new(),
            hop_limit,
            starting_page,
            message: String::new(),
            has_error: false,
            reached_destination: false,
            outcome: WalkState::Walking,
        }
    }

    /// Key the result is stored under: its first visited page
    pub fn key(&self) -> Option<&PageId> {
        self.path.first()
    }

    /// Number of links followed along the full path
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A single traversal run
///
/// The run borrows the cache read-only; only the coordinator amends it, and
/// only between runs.
pub struct Traversal<'a, S: PageSource> {
    source: &'a S,
    extractor: &'a LinkExtractor,
    cache: &'a PathCache,
    current: PageId,
    hops: u32,
    state: WalkState,
    result: TraversalResult,
}

impl<'a, S: PageSource> Traversal<'a, S> {
    /// Creates a run starting at a bare page name or a full URL
    pub fn new(
        source: &'a S,
        extractor: &'a LinkExtractor,
        cache: &'a PathCache,
        start: &str,
        hop_limit: u32,
    ) -> Self {
        let current = extractor.site().normalize(start);
        let result = TraversalResult::new(current.clone(), hop_limit);

        Self {
            source,
            extractor,
            cache,
            current,
            hops: 0,
            state: WalkState::Walking,
            result,
        }
    }

    /// Runs to completion and returns the frozen result
    ///
    /// # Hop Order
    ///
    /// 1. Current page is cached → append its cached path, success
    /// 2. Hop limit reached → error
    /// 3. Fetch the page; on failure → error with the fetch reason
    /// 4. Append the canonical page, extract the next link, count the hop
    /// 5. No link → error; otherwise continue from the link
    pub async fn run(mut self) -> TraversalResult {
        if self.current.is_empty() {
            self.finish(WalkState::NoLinkFound, MSG_NO_LINK.to_string());
        }

        while !self.state.is_terminal() {
            self.state = self.hop().await;
        }

        self.result
    }

    /// Takes one hop; returns the state to continue in
    async fn hop(&mut self) -> WalkState {
        if let Some(cached) = self.cache.get(self.current.as_str()) {
            tracing::debug!("{} found in cache ({} pages)", self.current, cached.len());
            self.result.path.extend_from_slice(cached);
            return self.finish(WalkState::FoundInCache, MSG_FOUND_IN_CACHE.to_string());
        }

        if self.hops >= self.result.hop_limit {
            tracing::debug!("Hop limit {} reached at {}", self.result.hop_limit, self.current);
            return self.finish(WalkState::ReachedLimit, MSG_LIMIT_REACHED.to_string());
        }

        let page = match self.source.fetch(&self.current).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("Fetching {} failed: {}", self.current, e);
                return self.finish(WalkState::FetchFailed, format!("{}{}", MSG_FETCH_FAILED, e));
            }
        };

        tracing::debug!("Hop {}: {}", self.hops + 1, page.canonical);
        self.result.path.push(page.canonical);
        self.hops += 1;

        match self.extractor.first_link(&page.content) {
            Some(next) => {
                self.current = next;
                WalkState::Walking
            }
            None => self.finish(WalkState::NoLinkFound, MSG_NO_LINK.to_string()),
        }
    }

    fn finish(&mut self, outcome: WalkState, message: String) -> WalkState {
        self.result.outcome = outcome;
        self.result.has_error = outcome.is_error();
        self.result.reached_destination = outcome.is_success();
        self.result.message = message;
        self.state = WalkState::Done;
        WalkState::Done
    }
}
