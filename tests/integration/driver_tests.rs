//! Session behavior across runs: cache growth and best-effort persistence

use crate::{mount_article, test_config};
use philosophy_walker::crawler::{Coordinator, Fetcher, TraversalResult};
use philosophy_walker::output::load_statistics;
use philosophy_walker::storage::{ResultStore, SqliteStore, StorageError};
use philosophy_walker::url::{PageId, Site};
use philosophy_walker::WalkState;
use tempfile::TempDir;
use wiremock::MockServer;

fn ids(names: &[&str]) -> Vec<PageId> {
    names.iter().map(|n| PageId::from(*n)).collect()
}

fn fetcher_for(server: &MockServer) -> Fetcher {
    let config = test_config(&server.uri());
    Fetcher::new(&config.crawler, Site::new(&server.uri()).unwrap()).unwrap()
}

fn success(path: &[&str]) -> TraversalResult {
    TraversalResult {
        path: ids(path),
        hop_limit: 40,
        starting_page: PageId::from(path[0]),
        message: "Found in cache".to_string(),
        has_error: false,
        reached_destination: true,
        outcome: WalkState::FoundInCache,
    }
}

#[tokio::test]
async fn test_successful_run_grows_cache_for_next_run() {
    let server = MockServer::start().await;

    // Each page is fetched exactly once across both runs
    mount_article(&server, "A", Some("B"), 1).await;
    mount_article(&server, "B", Some("Philosophy"), 1).await;

    let config = test_config(&server.uri());
    let mut coordinator =
        Coordinator::new(&config, fetcher_for(&server), Some(SqliteStore::open_in_memory().unwrap()))
            .unwrap();

    let first = coordinator.run_once("A", |_| {}).await;
    assert_eq!(first.path, ids(&["A", "B", "Philosophy"]));
    assert!(coordinator.cache().contains("B"));

    let second = coordinator.run_once("B", |_| {}).await;
    assert!(second.reached_destination);
    assert_eq!(second.message, "Found in cache");
    assert_eq!(second.path, ids(&["B", "Philosophy"]));
}

#[tokio::test]
async fn test_repeated_runs_use_cache() {
    let server = MockServer::start().await;

    mount_article(&server, "Cat", Some("Felidae"), 1).await;
    mount_article(&server, "Felidae", Some("Philosophy"), 1).await;

    let mut config = test_config(&server.uri());
    config.crawler.runs = 3;

    let store = SqliteStore::open_in_memory().unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher_for(&server), Some(store)).unwrap();

    let mut messages = Vec::new();
    let results = coordinator
        .run("Cat", |r| messages.push(r.message.clone()))
        .await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.reached_destination));
    assert!(results
        .iter()
        .all(|r| r.path == ids(&["Cat", "Felidae", "Philosophy"])));
    assert_eq!(messages, vec!["Found in cache"; 3]);

    // Same key every run: the first is stored, the duplicates are dropped
    assert_eq!(coordinator.store().unwrap().count_results().unwrap(), 1);
}

#[tokio::test]
async fn test_ignore_cache_disables_growth() {
    let server = MockServer::start().await;

    mount_article(&server, "A", Some("Philosophy"), 2).await;

    let mut config = test_config(&server.uri());
    config.store.seed_cache = false;
    config.crawler.runs = 2;

    let mut coordinator: Coordinator<Fetcher, SqliteStore> =
        Coordinator::new(&config, fetcher_for(&server), None).unwrap();

    let results = coordinator.run("A", |_| {}).await;

    assert!(results.iter().all(|r| r.reached_destination));
    assert_eq!(coordinator.cache().len(), 1);
}

#[tokio::test]
async fn test_read_only_store_seeds_but_ignores_writes() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("philosophy.db");
    let db_path = db_path.to_str().unwrap();

    {
        let mut store = SqliteStore::open(db_path).unwrap();
        store
            .insert_result(&success(&["Cat", "Felidae", "Philosophy"]))
            .unwrap();
    }

    let read_only = SqliteStore::open(&format!("file:{}?mode=ro", db_path)).unwrap();
    assert!(read_only.is_read_only());

    let server = MockServer::start().await;
    mount_article(&server, "Dog", Some("Felidae"), 1).await;

    let config = test_config(&server.uri());
    let mut coordinator = Coordinator::new(&config, fetcher_for(&server), Some(read_only)).unwrap();
    assert_eq!(coordinator.cache().len(), 3);

    let result = coordinator.run_once("Dog", |_| {}).await;
    assert_eq!(result.path, ids(&["Dog", "Felidae", "Philosophy"]));

    // The write was rejected and swallowed
    assert_eq!(coordinator.store().unwrap().count_results().unwrap(), 1);
}

#[test]
fn test_read_only_write_is_ignorable() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("philosophy.db");
    let db_path = db_path.to_str().unwrap();

    SqliteStore::open(db_path).unwrap();

    let mut read_only = SqliteStore::open(&format!("file:{}?mode=ro", db_path)).unwrap();
    let err = read_only
        .insert_result(&success(&["Cat", "Philosophy"]))
        .unwrap_err();

    assert!(matches!(err, StorageError::PermissionDenied(_)));
    assert!(err.is_ignorable());
}

#[test]
fn test_missing_read_only_store_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("missing.db");

    let result = SqliteStore::open(&format!("file:{}?mode=ro", db_path.display()));
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
}

#[test]
fn test_statistics_from_store() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    for path in [
        &["A", "Philosophy"][..],
        &["B", "X", "Philosophy"][..],
        &["C", "X", "Y", "Philosophy"][..],
    ] {
        let mut result = success(path);
        result.starting_page = PageId::from("Special:Random");
        store.insert_result(&result).unwrap();
    }

    let mut failed = success(&["D", "E"]);
    failed.starting_page = PageId::from("Special:Random");
    failed.reached_destination = false;
    failed.has_error = true;
    failed.outcome = WalkState::ReachedLimit;
    store.insert_result(&failed).unwrap();

    let stats = load_statistics(&store, &Site::default(), "Special:Random").unwrap();

    assert_eq!(stats.total_runs, 4);
    assert_eq!(stats.successes, 3);
    assert_eq!(stats.success_rate(), 75.0);
    assert_eq!(stats.path_lengths, vec![1, 2, 3]);
    assert_eq!(stats.median(), 2.0);

    let by_url = load_statistics(
        &store,
        &Site::default(),
        "https://en.wikipedia.org/wiki/Special:Random",
    )
    .unwrap();
    assert_eq!(by_url, stats);
}

#[tokio::test]
async fn test_walk_continues_when_store_cannot_open() {
    let dir = TempDir::new().unwrap();
    let missing = format!("file:{}?mode=ro", dir.path().join("missing.db").display());

    let server = MockServer::start().await;
    mount_article(&server, "Cat", Some("Philosophy"), 1).await;

    let mut config = test_config(&server.uri());
    config.store.uri = missing;

    let store = SqliteStore::open_or_skip(&config.store.uri);
    assert!(store.is_none());

    let mut coordinator = Coordinator::new(&config, fetcher_for(&server), store).unwrap();
    let result = coordinator.run_once("Cat", |_| {}).await;

    assert!(result.reached_destination);
    assert_eq!(result.path, ids(&["Cat", "Philosophy"]));
}

#[tokio::test]
async fn test_unreadable_seed_store_leaves_only_destination() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("empty.db");
    // A zero-length file opens as a database with no tables
    std::fs::File::create(&db_path).unwrap();

    let store = SqliteStore::open(&format!("file:{}?mode=ro", db_path.display())).unwrap();
    assert!(store.load_successful_paths().is_err());

    let server = MockServer::start().await;
    mount_article(&server, "Cat", Some("Philosophy"), 1).await;

    let config = test_config(&server.uri());
    let mut coordinator = Coordinator::new(&config, fetcher_for(&server), Some(store)).unwrap();
    assert_eq!(coordinator.cache().len(), 1);

    let result = coordinator.run_once("Cat", |_| {}).await;

    assert!(result.reached_destination);
    assert!(!result.has_error);
    assert_eq!(result.path, ids(&["Cat", "Philosophy"]));
    // The insert failed quietly and created nothing
    assert!(coordinator.store().unwrap().count_results().is_err());
}
