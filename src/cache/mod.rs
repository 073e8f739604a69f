//! Path cache
//!
//! Maps a page to its known remaining path to the destination, inclusive of
//! the page itself. The cache only grows: entries are never evicted or
//! replaced within a session.

use crate::url::PageId;
use std::collections::HashMap;

/// Newly discovered paths waiting to be folded into a `PathCache`
pub type CacheAdditions = HashMap<PageId, Vec<PageId>>;

/// Known-successful remaining paths, keyed by page
#[derive(Debug, Clone)]
pub struct PathCache {
    paths: HashMap<PageId, Vec<PageId>>,
}

impl PathCache {
    /// Creates a cache holding only the destination's trivial path
    pub fn new(destination: &PageId) -> Self {
        let mut paths = HashMap::new();
        paths.insert(destination.clone(), vec![destination.clone()]);
        Self { paths }
    }

    /// Creates a cache seeded from complete successful paths
    ///
    /// Every suffix of every path becomes an entry.
    pub fn seeded<I>(destination: &PageId, paths: I) -> Self
    where
        I: IntoIterator<Item = Vec<PageId>>,
    {
        let mut cache = Self::new(destination);
        for path in paths {
            cache.merge(Self::suffixes(&path));
        }
        cache
    }

    /// Returns the remaining path from `page` to the destination
    pub fn get(&self, page: &str) -> Option<&[PageId]> {
        self.paths.get(page).map(Vec::as_slice)
    }

    pub fn contains(&self, page: &str) -> bool {
        self.paths.contains_key(page)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Maps every page on a successful path to its suffix of that path
    ///
    /// When a page appears more than once, its last (shortest) suffix wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use philosophy_walker::cache::PathCache;
    /// use philosophy_walker::PageId;
    ///
    /// let path: Vec<PageId> = vec!["A".into(), "B".into(), "Philosophy".into()];
    /// let additions = PathCache::suffixes(&path);
    /// assert_eq!(additions["B"], vec![PageId::from("B"), PageId::from("Philosophy")]);
    /// ```
    pub fn suffixes(path: &[PageId]) -> CacheAdditions {
        let mut additions = CacheAdditions::new();
        for (idx, page) in path.iter().enumerate() {
            additions.insert(page.clone(), path[idx..].to_vec());
        }
        additions
    }

    /// Folds additions into the cache; existing entries are kept
    pub fn merge(&mut self, additions: CacheAdditions) {
        for (page, path) in additions {
            self.paths.entry(page).or_insert(path);
        }
    }
}
