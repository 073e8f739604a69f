//! Run driver - session orchestration
//!
//! The coordinator is the session context: it owns the path cache and the
//! result store, executes runs one after another, and folds each successful
//! path back into the cache before the next run starts.

use crate::cache::{CacheAdditions, PathCache};
use crate::config::Config;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::traversal::{Traversal, TraversalResult};
use crate::storage::ResultStore;
use crate::url::{PageId, Site};
use crate::WalkerError;

/// Main session structure
pub struct Coordinator<S: PageSource, R: ResultStore> {
    source: S,
    extractor: LinkExtractor,
    cache: PathCache,
    store: Option<R>,
    hop_limit: u32,
    runs: u32,
    caching: bool,
}

impl<S: PageSource, R: ResultStore> Coordinator<S, R> {
    /// Creates a new coordinator
    ///
    /// When cache seeding is enabled and a store is available, the cache is
    /// seeded with every suffix of every stored successful path. A store
    /// that cannot be read leaves the cache with only the destination.
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `source` - Where page content comes from
    /// * `store` - The result store, if one could be opened
    pub fn new(config: &Config, source: S, store: Option<R>) -> Result<Self, WalkerError> {
        let site = Site::new(&config.site.base_url)?;
        let destination = site.normalize(&config.crawler.destination);
        let caching = config.store.seed_cache;

        let cache = match (&store, caching) {
            (Some(store), true) => match store.load_successful_paths() {
                Ok(paths) => PathCache::seeded(&destination, paths),
                Err(e) => {
                    tracing::warn!("Unable to seed path cache: {}", e);
                    PathCache::new(&destination)
                }
            },
            _ => PathCache::new(&destination),
        };
        tracing::info!("Running with {} cached pages", cache.len());

        Ok(Self {
            source,
            extractor: LinkExtractor::new(site, config.crawler.paren_policy),
            cache,
            store,
            hop_limit: config.crawler.hop_limit,
            runs: config.crawler.runs,
            caching,
        })
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> Option<&R> {
        self.store.as_ref()
    }

    /// Executes every configured run from the same starting page
    ///
    /// `emit` receives each result as soon as its run completes.
    pub async fn run<F>(&mut self, start: &str, mut emit: F) -> Vec<TraversalResult>
    where
        F: FnMut(&TraversalResult),
    {
        let mut results = Vec::with_capacity(self.runs as usize);

        for run in 1..=self.runs {
            tracing::debug!("Starting run {}/{} from {}", run, self.runs, start);
            let result = self.run_once(start, &mut emit).await;
            results.push(result);
        }

        results
    }

    /// Executes a single run
    ///
    /// # Run Flow
    ///
    /// 1. Walk from `start` against the current cache
    /// 2. On success, collect every suffix of the path as cache additions
    /// 3. Emit the result
    /// 4. Merge the additions into the cache
    /// 5. Persist the result (best-effort)
    pub async fn run_once<F>(&mut self, start: &str, mut emit: F) -> TraversalResult
    where
        F: FnMut(&TraversalResult),
    {
        let result = Traversal::new(
            &self.source,
            &self.extractor,
            &self.cache,
            start,
            self.hop_limit,
        )
        .run()
        .await;

        tracing::info!(
            "Run from {} finished after {} pages: {}",
            result.starting_page,
            result.path.len(),
            result.message
        );

        let additions = if result.reached_destination && self.caching {
            PathCache::suffixes(&result.path)
        } else {
            CacheAdditions::new()
        };

        emit(&result);
        self.cache.merge(additions);
        self.persist(&result);

        result
    }

    /// Writes a result to the store, swallowing every failure
    fn persist(&mut self, result: &TraversalResult) {
        let Some(store) = self.store.as_mut() else {
            tracing::debug!("No result store, skipping persistence");
            return;
        };

        match store.insert_result(result) {
            Ok(()) => {
                let key = result.key().map(PageId::as_str).unwrap_or_default();
                tracing::info!("Stored result {}", key);
            }
            Err(e) if e.is_ignorable() => {
                tracing::debug!("Result not stored: {}", e);
            }
            Err(e) => {
                tracing::warn!("Failed to store result: {}", e);
            }
        }
    }
}
