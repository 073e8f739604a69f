//! Storage module for persisting run results
//!
//! The result store plays two roles:
//! - cache seed source: successful paths from earlier sessions
//! - result sink: every run's result, keyed by its first visited page
//!
//! Both roles are best-effort. A store that cannot be opened or written is
//! never fatal to a session.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{is_read_only_uri, SqliteStore};
pub use traits::{ResultStore, StorageError, StorageResult};
