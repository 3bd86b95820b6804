//! Store abstractions consumed by the access layer.
//!
//! `RowStore` is the relational store (remote in production, SQLite locally).
//! `KeyValueStore` is the small persisted store on the client device that
//! holds throttle timestamps.

use serde_json::{Map, Value};

use crate::errors::StoreResult;

use super::query::SelectQuery;

/// One result row keyed by column name.
pub type Row = Map<String, Value>;

/// Read access to the backing relational store.
pub trait RowStore: Send + Sync {
    /// Run a select query. Schema-shape failures must be reported as
    /// `StoreError::MissingColumn` / `MissingRelation` when the backend can
    /// tell, or as `StoreError::Remote` with the raw payload otherwise.
    fn select(&self, query: &SelectQuery) -> StoreResult<Vec<Row>>;

    /// Convenience: the integer `id` column of every returned row.
    fn select_ids(&self, query: &SelectQuery) -> StoreResult<Vec<i64>> {
        Ok(self
            .select(query)?
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_i64))
            .collect())
    }
}

/// Persisted string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Write `new` only if the current value equals `expected` (`None` meaning
    /// absent). Returns whether the write happened.
    fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> StoreResult<bool>;
}
