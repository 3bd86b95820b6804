//! Schema versioning through a dedicated single-row `schema_version` table.
//!
//! `migrate_to` exists so callers (and tests) can hold a database at an older
//! version, which is how deployments without `projects.module_key` are
//! reproduced locally.

use harambee_core::errors::{StoreError, StoreResult};
use rusqlite::Connection;
use tracing::info;

use crate::errors::sqlite;
use crate::schema::{PROJECTS_MODULE_KEY_V2, SCHEMA_VERSION_TABLE, TABLES_V1};

/// Current schema version. Bump this when adding new migrations.
pub const CURRENT_VERSION: u32 = 2;

/// Version recorded in the database; 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> StoreResult<u32> {
    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .map_err(sqlite)?;
    if !exists {
        return Ok(0);
    }

    match conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get::<_, u32>(0)
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(sqlite(e)),
    }
}

fn set_schema_version(conn: &Connection, version: u32) -> StoreResult<()> {
    conn.execute_batch(SCHEMA_VERSION_TABLE).map_err(sqlite)?;
    conn.execute("DELETE FROM schema_version", []).map_err(sqlite)?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        rusqlite::params![version],
    )
    .map_err(sqlite)?;
    Ok(())
}

/// Run all pending migrations. Returns the resulting version.
pub fn migrate(conn: &Connection) -> StoreResult<u32> {
    migrate_to(conn, CURRENT_VERSION)
}

/// Run pending migrations up to and including `target`.
///
/// A database already at or past `target` is left untouched.
pub fn migrate_to(conn: &Connection, target: u32) -> StoreResult<u32> {
    if target > CURRENT_VERSION {
        return Err(StoreError::InvalidQuery(format!(
            "schema version {target} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    let current = get_schema_version(conn)?;
    if current >= target {
        return Ok(current);
    }

    if current < 1 && target >= 1 {
        info!("Migrating schema: 0 → 1 (tenants, projects, client_kv)");
        conn.execute_batch(TABLES_V1).map_err(sqlite)?;
        set_schema_version(conn, 1)?;
    }

    if current < 2 && target >= 2 {
        info!("Migrating schema: 1 → 2 (projects.module_key)");
        conn.execute_batch(PROJECTS_MODULE_KEY_V2).map_err(sqlite)?;
        set_schema_version(conn, 2)?;
    }

    let final_version = get_schema_version(conn)?;
    info!(from = current, to = final_version, "Schema migration complete");
    Ok(final_version)
}
