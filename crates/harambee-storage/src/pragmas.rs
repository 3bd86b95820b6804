//! SQLite PRAGMA configuration. Must be called on every connection
//! immediately after opening.

use rusqlite::Connection;

/// WAL for concurrent readers, busy timeout as the contention mechanism,
/// foreign keys on so projects cannot point at unknown tenants.
pub fn configure_connection(conn: &Connection, busy_timeout_ms: u32) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -8000;
        PRAGMA temp_store = MEMORY;
        ",
    )?;
    conn.pragma_update(None, "busy_timeout", busy_timeout_ms)?;
    Ok(())
}
