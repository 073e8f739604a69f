//! Output module for run results and reports
//!
//! This module handles:
//! - Printing each run's result as it completes
//! - Computing and printing statistics over stored results

pub mod stats;

pub use stats::{compute_statistics, load_statistics, print_statistics, WalkStatistics};

use crate::crawler::TraversalResult;

/// Formats a run result as an indented field listing
///
/// # Example
///
/// ```
/// use philosophy_walker::output::format_result;
/// use philosophy_walker::{TraversalResult, WalkState};
///
/// let result = TraversalResult {
///     path: vec!["Logic".into(), "Philosophy".into()],
///     hop_limit: 40,
///     starting_page: "Logic".into(),
///     message: "Found in cache".to_string(),
///     has_error: false,
///     reached_destination: true,
///     outcome: WalkState::FoundInCache,
/// };
/// assert!(format_result(&result).contains("  - Philosophy\n"));
/// ```
pub fn format_result(result: &TraversalResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("starting_url: {}\n", result.starting_page));
    out.push_str(&format!("path_link_limit: {}\n", result.hop_limit));
    out.push_str(&format!("reaches_destination: {}\n", result.reached_destination));
    out.push_str(&format!("errors: {}\n", result.has_error));
    out.push_str(&format!("message: {}\n", result.message));
    out.push_str(&format!("urls ({}):\n", result.path.len()));
    for page in &result.path {
        out.push_str(&format!("  - {}\n", page));
    }

    out
}

/// Prints a run result to stdout
pub fn print_result(result: &TraversalResult) {
    println!("{}", format_result(result));
}
