//! Mapping of rusqlite failures onto `StoreError`.
//!
//! SQLite reports schema-shape problems only as message text
//! (`no such column: x`, `table t has no column named x`, `no such table: y`),
//! so this is the one place that parses it. Everything above the store sees
//! typed variants.

use harambee_core::errors::StoreError;

const NO_SUCH_COLUMN: &str = "no such column: ";
const NO_SUCH_TABLE: &str = "no such table: ";
const HAS_NO_COLUMN: &str = " has no column named ";

/// Convert a rusqlite error, naming `relation` when the failing statement
/// targeted a single table.
pub fn map_sqlite_error(e: rusqlite::Error, relation: Option<&str>) -> StoreError {
    if is_busy_error(&e) {
        return StoreError::Busy;
    }

    let text = e.to_string();
    if let Some(column) = identifier_after(&text, NO_SUCH_COLUMN)
        .or_else(|| identifier_after(&text, HAS_NO_COLUMN))
    {
        return StoreError::MissingColumn {
            relation: relation.map(str::to_string),
            column,
        };
    }
    if let Some(table) = identifier_after(&text, NO_SUCH_TABLE) {
        return StoreError::MissingRelation { relation: table };
    }
    StoreError::backend(text)
}

/// `map_sqlite_error` without a relation hint, for `map_err` chains.
pub(crate) fn sqlite(e: rusqlite::Error) -> StoreError {
    map_sqlite_error(e, None)
}

/// Identifier following `marker`, with any `schema.` / `alias.` qualifier
/// stripped.
fn identifier_after(text: &str, marker: &str) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let ident: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    let ident = ident.rsplit('.').next().unwrap_or_default();
    if ident.is_empty() {
        None
    } else {
        Some(ident.to_string())
    }
}

/// Check if a rusqlite error is SQLITE_BUSY (lock contention).
fn is_busy_error(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::DatabaseBusy,
                ..
            },
            _,
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_missing_column_is_typed() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE projects (id INTEGER PRIMARY KEY)").unwrap();
        let err = conn.prepare("SELECT id FROM projects WHERE module_key = ?1").unwrap_err();
        match map_sqlite_error(err, Some("projects")) {
            StoreError::MissingColumn { relation, column } => {
                assert_eq!(column, "module_key");
                assert_eq!(relation.as_deref(), Some("projects"));
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_into_missing_column_is_typed() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE projects (id INTEGER PRIMARY KEY)").unwrap();
        let err = conn
            .execute("INSERT INTO projects (module_key) VALUES ('jpp')", [])
            .unwrap_err();
        assert!(matches!(
            map_sqlite_error(err, Some("projects")),
            StoreError::MissingColumn { ref column, .. } if column == "module_key"
        ));
    }

    #[test]
    fn test_missing_table_is_typed() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELECT id FROM ghosts").unwrap_err();
        match map_sqlite_error(err, Some("ghosts")) {
            StoreError::MissingRelation { relation } => assert_eq!(relation, "ghosts"),
            other => panic!("expected MissingRelation, got {other:?}"),
        }
    }

    #[test]
    fn test_other_errors_are_backend() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELEC nonsense").unwrap_err();
        assert!(matches!(map_sqlite_error(err, None), StoreError::Backend { .. }));
    }

    #[test]
    fn test_identifier_after_strips_qualifier() {
        assert_eq!(
            identifier_after("no such column: p.module_key in SELECT", NO_SUCH_COLUMN),
            Some("module_key".to_string())
        );
        assert_eq!(identifier_after("no such column: ", NO_SUCH_COLUMN), None);
    }
}
