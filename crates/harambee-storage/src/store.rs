//! `SqliteStore`: the only place in the workspace that holds a
//! `Mutex<Connection>`. Everything else goes through `RowStore` /
//! `KeyValueStore`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use harambee_core::config::StorageConfig;
use harambee_core::errors::{StoreError, StoreResult};
use harambee_core::traits::{KeyValueStore, Row, RowStore, SelectQuery};
use harambee_core::{ProjectId, TenantId};
use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use crate::errors::{map_sqlite_error, sqlite};
use crate::migrations;
use crate::pragmas::configure_connection;
use crate::projects::{self, NewProject};
use crate::sql::compile_select;

const KV_RELATION: &str = "client_kv";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a file-backed database. Migrations are not run.
    pub fn open(path: &Path, config: &StorageConfig) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::backend(format!("failed to open {}: {e}", path.display()))
        })?;
        Self::from_connection(conn, config)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::backend(format!("failed to open in-memory database: {e}")))?;
        Self::from_connection(conn, &StorageConfig::default())
    }

    /// Open the database named by `config.db_path`, or an in-memory one, and
    /// migrate it to the current version.
    pub fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        let store = match &config.db_path {
            Some(path) => Self::open(Path::new(path), config)?,
            None => {
                let conn = Connection::open_in_memory().map_err(sqlite)?;
                Self::from_connection(conn, config)?
            }
        };
        store.migrate()?;
        Ok(store)
    }

    fn from_connection(conn: Connection, config: &StorageConfig) -> StoreResult<Self> {
        configure_connection(&conn, config.effective_busy_timeout_ms()).map_err(sqlite)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::backend("connection lock poisoned"))
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    pub fn migrate(&self) -> StoreResult<u32> {
        self.with_conn(migrations::migrate)
    }

    pub fn migrate_to(&self, version: u32) -> StoreResult<u32> {
        self.with_conn(|conn| migrations::migrate_to(conn, version))
    }

    pub fn schema_version(&self) -> StoreResult<u32> {
        self.with_conn(migrations::get_schema_version)
    }

    pub fn insert_tenant(&self, tenant: &TenantId, name: &str) -> StoreResult<()> {
        self.with_conn(|conn| projects::insert_tenant(conn, tenant, name))
    }

    pub fn insert_project(&self, project: &NewProject) -> StoreResult<ProjectId> {
        self.with_conn(|conn| projects::insert_project(conn, project))
    }

    pub fn has_column(&self, table: &str, column: &str) -> StoreResult<bool> {
        self.with_conn(|conn| projects::has_column(conn, table, column))
    }
}

fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::from(v),
        ValueRef::Real(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

impl RowStore for SqliteStore {
    fn select(&self, query: &SelectQuery) -> StoreResult<Vec<Row>> {
        let compiled = compile_select(query)?;
        let relation = Some(query.relation.as_str());
        debug!(sql = %compiled.sql, params = compiled.params.len(), "select");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&compiled.sql)
            .map_err(|e| map_sqlite_error(e, relation))?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt
            .query_map(params_from_iter(compiled.params.iter()), |row| {
                let mut out = Row::new();
                for (i, name) in names.iter().enumerate() {
                    out.insert(name.clone(), json_value(row.get_ref(i)?));
                }
                Ok(out)
            })
            .map_err(|e| map_sqlite_error(e, relation))?;

        let collected = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlite_error(e, relation));
        collected
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM client_kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| map_sqlite_error(e, Some(KV_RELATION)))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO client_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = unixepoch()",
            params![key, value],
        )
        .map_err(|e| map_sqlite_error(e, Some(KV_RELATION)))?;
        Ok(())
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let changed = match expected {
            None => conn.execute(
                "INSERT INTO client_kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO NOTHING",
                params![key, new],
            ),
            Some(current) => conn.execute(
                "UPDATE client_kv SET value = ?2, updated_at = unixepoch()
                 WHERE key = ?1 AND value = ?3",
                params![key, new, current],
            ),
        }
        .map_err(|e| map_sqlite_error(e, Some(KV_RELATION)))?;
        Ok(changed == 1)
    }
}
