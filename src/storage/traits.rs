//! Storage traits and error types

use crate::crawler::TraversalResult;
use crate::url::PageId;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Store timed out: {0}")]
    Timeout(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Result has no visited pages to key it by")]
    MissingKey,

    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl StorageError {
    /// Returns true for failures a best-effort writer drops without logging
    ///
    /// Read-only stores and busy or unreachable stores are expected in normal
    /// operation (the default store is read-only).
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::PermissionDenied(_) | Self::Timeout(_))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(error: rusqlite::Error) -> Self {
        let code = match &error {
            rusqlite::Error::SqliteFailure(failure, _) => failure.code,
            _ => return Self::Sqlite(error),
        };

        match code {
            ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::AuthorizationForStatementDenied => {
                Self::PermissionDenied(error.to_string())
            }
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => Self::Timeout(error.to_string()),
            ErrorCode::CannotOpen | ErrorCode::NotADatabase => Self::Unavailable(error.to_string()),
            ErrorCode::ConstraintViolation => Self::Constraint(error.to_string()),
            _ => Self::Sqlite(error),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for result store implementations
pub trait ResultStore {
    /// Loads the full path of every stored result that reached the destination
    fn load_successful_paths(&self) -> StorageResult<Vec<Vec<PageId>>>;

    /// Stores a result keyed by its first visited page
    ///
    /// # Errors
    ///
    /// * `MissingKey` - the result visited no pages
    /// * `Constraint` - a result with the same key is already stored
    /// * `PermissionDenied` - the store is read-only
    fn insert_result(&mut self, result: &TraversalResult) -> StorageResult<()>;

    /// Loads stored results, optionally only those with a given starting page
    fn load_results(&self, starting_page: Option<&str>) -> StorageResult<Vec<TraversalResult>>;

    /// Counts stored results
    fn count_results(&self) -> StorageResult<u64>;
}
