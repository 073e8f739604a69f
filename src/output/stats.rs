//! Statistics over stored run results
//!
//! Answers two questions for runs from one starting page (usually
//! `Special:Random`): how often does a walk reach the destination, and how
//! long are the successful paths.

use crate::crawler::TraversalResult;
use crate::storage::{ResultStore, StorageError};
use crate::url::Site;
use std::collections::HashMap;

/// Statistics for runs from one starting page
#[derive(Debug, Clone, PartialEq)]
pub struct WalkStatistics {
    /// Starting page the statistics are restricted to
    pub starting_page: String,

    /// Number of stored runs
    pub total_runs: u64,

    /// Number of runs that reached the destination
    pub successes: u64,

    /// Hops of each distinct successful path, sorted ascending
    pub path_lengths: Vec<usize>,
}

impl WalkStatistics {
    /// Share of runs that reached the destination, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        100.0 * self.successes as f64 / self.total_runs as f64
    }

    pub fn mean(&self) -> f64 {
        if self.path_lengths.is_empty() {
            return 0.0;
        }
        self.path_lengths.iter().sum::<usize>() as f64 / self.path_lengths.len() as f64
    }

    /// Middle value; the mean of the two middle values for an even count
    pub fn median(&self) -> f64 {
        let n = self.path_lengths.len();
        match n {
            0 => 0.0,
            _ if n % 2 == 1 => self.path_lengths[n / 2] as f64,
            _ => (self.path_lengths[n / 2 - 1] + self.path_lengths[n / 2]) as f64 / 2.0,
        }
    }

    /// Sample standard deviation; zero with fewer than two paths
    pub fn std_dev(&self) -> f64 {
        let n = self.path_lengths.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .path_lengths
            .iter()
            .map(|&len| (len as f64 - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    }
}

/// Computes statistics for results from one starting page
///
/// Successful paths are de-duplicated by their first visited page; the last
/// stored path for a page wins.
pub fn compute_statistics(results: &[TraversalResult], starting_page: &str) -> WalkStatistics {
    let matching: Vec<&TraversalResult> = results
        .iter()
        .filter(|r| r.starting_page.as_str() == starting_page)
        .collect();

    let successes = matching.iter().filter(|r| r.reached_destination).count() as u64;

    let mut by_first_page: HashMap<&str, usize> = HashMap::new();
    for result in matching.iter().filter(|r| r.reached_destination) {
        if let Some(first) = result.key() {
            by_first_page.insert(first.as_str(), result.hop_count());
        }
    }

    let mut path_lengths: Vec<usize> = by_first_page.into_values().collect();
    path_lengths.sort_unstable();

    WalkStatistics {
        starting_page: starting_page.to_string(),
        total_runs: matching.len() as u64,
        successes,
        path_lengths,
    }
}

/// Loads statistics from a result store
///
/// # Arguments
///
/// * `store` - The store to query
/// * `site` - Canonicalizes `starting_page` the way walks store it
/// * `starting_page` - Only runs that started here are counted; a page name
///   or a full URL
pub fn load_statistics(
    store: &dyn ResultStore,
    site: &Site,
    starting_page: &str,
) -> Result<WalkStatistics, StorageError> {
    let starting_page = site.normalize(starting_page);
    let results = store.load_results(Some(starting_page.as_str()))?;
    Ok(compute_statistics(&results, starting_page.as_str()))
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &WalkStatistics) {
    println!("=== Walk Statistics ({}) ===\n", stats.starting_page);

    println!("Total number of pages: {}", stats.total_runs);
    println!();
    println!(
        "Percentage of pages that lead to the destination: {:.1}%",
        stats.success_rate()
    );
    println!();
    println!("Distribution of path lengths (successful paths only):");
    println!("  Size: {}", stats.path_lengths.len());
    println!("  Mean: {:.2}", stats.mean());
    println!("  Median: {}", stats.median().trunc() as u64);
    println!("  Std: {:.2}", stats.std_dev());
}
