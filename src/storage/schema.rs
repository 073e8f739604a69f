//! Database schema definitions

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per stored run, keyed by the first visited page
CREATE TABLE IF NOT EXISTS results (
    id TEXT PRIMARY KEY,
    starting_url TEXT NOT NULL,
    path_link_limit INTEGER NOT NULL,
    message TEXT NOT NULL,
    errors INTEGER NOT NULL,
    reaches_destination INTEGER NOT NULL,
    outcome TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_results_starting_url ON results(starting_url);
CREATE INDEX IF NOT EXISTS idx_results_reaches ON results(reaches_destination);

-- Visited pages of each run, in order
CREATE TABLE IF NOT EXISTS result_pages (
    result_id TEXT NOT NULL REFERENCES results(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    page TEXT NOT NULL,
    PRIMARY KEY (result_id, position)
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
