//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ResultStore trait.

use crate::crawler::TraversalResult;
use crate::state::WalkState;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ResultStore, StorageError, StorageResult};
use crate::url::PageId;
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, Row};
use std::time::Duration;

/// How long a statement waits on a busy database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(3);

/// Returns true if a connection string asks for a read-only database
pub fn is_read_only_uri(uri: &str) -> bool {
    uri.split_once('?')
        .map(|(_, query)| query.split('&').any(|param| param == "mode=ro"))
        .unwrap_or(false)
}

/// SQLite result store
pub struct SqliteStore {
    conn: Connection,
    read_only: bool,
}

impl SqliteStore {
    /// Opens a store from a SQLite connection string
    ///
    /// Accepts plain paths, `:memory:`, and `file:` URIs. With `mode=ro` the
    /// schema is left untouched and every write fails with
    /// `StorageError::PermissionDenied`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the database cannot be opened,
    /// which includes a read-only URI pointing at a missing file.
    pub fn open(uri: &str) -> StorageResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(uri, flags)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let read_only = is_read_only_uri(uri);
        if !read_only {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            initialize_schema(&conn)?;
        }

        tracing::debug!("Opened result store {} (read-only: {})", uri, read_only);
        Ok(Self { conn, read_only })
    }

    /// Opens a store, or returns None when it cannot be opened
    ///
    /// A session without a store still walks; it just neither seeds nor
    /// persists.
    pub fn open_or_skip(uri: &str) -> Option<Self> {
        match Self::open(uri) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Result store unavailable, continuing without it: {}", e);
                None
            }
        }
    }

    /// Creates an in-memory store
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open(":memory:")
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn load_path(&self, result_id: &str) -> StorageResult<Vec<PageId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT page FROM result_pages WHERE result_id = ?1 ORDER BY position")?;

        let pages = stmt
            .query_map(params![result_id], |row| row.get::<_, String>(0))?
            .map(|page| page.map(PageId::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }
}

/// Columns of `results` in the order `result_from_row` reads them
const RESULT_COLUMNS: &str =
    "id, starting_url, path_link_limit, message, errors, reaches_destination, outcome";

/// Builds a result without its path; returns the row id alongside it
fn result_from_row(row: &Row<'_>) -> rusqlite::Result<(String, TraversalResult)> {
    let outcome: String = row.get(6)?;
    let result = TraversalResult {
        path: Vec::new(),
        hop_limit: row.get(2)?,
        starting_page: PageId::from(row.get::<_, String>(1)?),
        message: row.get(3)?,
        has_error: row.get(4)?,
        reached_destination: row.get(5)?,
        outcome: WalkState::from_db_string(&outcome).unwrap_or(WalkState::Done),
    };
    Ok((row.get(0)?, result))
}

impl ResultStore for SqliteStore {
    fn load_successful_paths(&self) -> StorageResult<Vec<Vec<PageId>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM results WHERE reaches_destination = 1 ORDER BY recorded_at")?;

        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        ids.iter().map(|id| self.load_path(id)).collect()
    }

    fn insert_result(&mut self, result: &TraversalResult) -> StorageResult<()> {
        let key = result.key().ok_or(StorageError::MissingKey)?;
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO results (id, starting_url, path_link_limit, message, errors,
             reaches_destination, outcome, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                key.as_str(),
                result.starting_page.as_str(),
                result.hop_limit,
                result.message,
                result.has_error,
                result.reached_destination,
                result.outcome.to_db_string(),
                now
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO result_pages (result_id, position, page) VALUES (?1, ?2, ?3)",
            )?;
            for (position, page) in result.path.iter().enumerate() {
                stmt.execute(params![key.as_str(), position as i64, page.as_str()])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn load_results(&self, starting_page: Option<&str>) -> StorageResult<Vec<TraversalResult>> {
        let rows = match starting_page {
            Some(start) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM results WHERE starting_url = ?1 ORDER BY recorded_at",
                    RESULT_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![start], result_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {} FROM results ORDER BY recorded_at",
                    RESULT_COLUMNS
                ))?;
                let rows = stmt
                    .query_map([], result_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };

        rows.into_iter()
            .map(|(id, mut result)| {
                result.path = self.load_path(&id)?;
                Ok(result)
            })
            .collect()
    }

    fn count_results(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
