//! Philosophy Walker main entry point
//!
//! This is the command-line interface for the first-link crawler.

use anyhow::Context;
use clap::Parser;
use philosophy_walker::config::{apply_overrides, load_config_or_default, Config, Overrides};
use philosophy_walker::crawler::{Coordinator, Fetcher};
use philosophy_walker::output::{load_statistics, print_result, print_statistics};
use philosophy_walker::storage::SqliteStore;
use philosophy_walker::url::Site;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Philosophy Walker: does every article lead to Philosophy?
///
/// Starting from an article, follows the first link in the body text that is
/// not in parentheses, until it reaches Philosophy, fails, or hits the hop
/// limit.
#[derive(Parser, Debug)]
#[command(name = "philosophy-walker")]
#[command(version)]
#[command(about = "First-link crawler for the Getting to Philosophy hypothesis", long_about = None)]
struct Cli {
    /// The starting page name or URL (e.g. "Cat" or "Special:Random")
    #[arg(short = 'u', long = "url", required_unless_present = "stats")]
    url: Option<String>,

    /// Hop limit per run [default: 40]
    #[arg(short = 'l', long = "limit")]
    limit: Option<u32>,

    /// Number of runs [default: 1]
    #[arg(short = 'n', long = "runs")]
    runs: Option<u32>,

    /// Result store connection string [default: file:philosophy.db?mode=ro]
    #[arg(short = 'm', long = "store")]
    store: Option<String>,

    /// Do not seed or grow the path cache from stored results
    #[arg(short = 'i', long = "ignore-cache")]
    ignore_cache: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Show statistics from the result store and exit
    #[arg(long, conflicts_with = "url")]
    stats: bool,

    /// Starting page the statistics are restricted to
    #[arg(long, default_value = "Special:Random")]
    stats_start: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // An interrupt ends the session quietly; the cache only changes between
    // runs and each stored result is one transaction.
    tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("Interrupted");
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philosophy_walker=info,warn"),
            1 => EnvFilter::new("philosophy_walker=debug,info"),
            2 => EnvFilter::new("philosophy_walker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config_or_default(cli.config.as_deref()).context("loading configuration")?;
    let overrides = Overrides {
        hop_limit: cli.limit,
        runs: cli.runs,
        store_uri: cli.store,
        ignore_cache: cli.ignore_cache,
    };
    let config = apply_overrides(config, &overrides).context("applying command-line options")?;

    if cli.stats {
        return handle_stats(&config, &cli.stats_start);
    }

    let start = cli.url.unwrap_or_default();
    if start.trim().is_empty() {
        anyhow::bail!("the starting page cannot be empty");
    }

    handle_walk(config, &start).await
}

/// Handles the --stats mode: shows statistics from the result store
fn handle_stats(config: &Config, starting_page: &str) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.store.uri)
        .with_context(|| format!("opening result store {}", config.store.uri))?;

    let site = Site::new(&config.site.base_url)?;
    let stats = load_statistics(&store, &site, starting_page)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main walk: runs the configured number of traversals
async fn handle_walk(config: Config, start: &str) -> anyhow::Result<()> {
    let site = Site::new(&config.site.base_url)?;
    let fetcher = Fetcher::new(&config.crawler, site)?;

    let store = SqliteStore::open_or_skip(&config.store.uri);

    tracing::info!(
        "Walking from {} (hop limit {}, {} run(s))",
        start,
        config.crawler.hop_limit,
        config.crawler.runs
    );

    let mut coordinator = Coordinator::new(&config, fetcher, store)?;
    coordinator.run(start, print_result).await;

    Ok(())
}
