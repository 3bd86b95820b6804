//! In-memory test doubles for the store traits and the clock.
//!
//! Used by access-layer tests to avoid a real database and real time.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::errors::StoreResult;

use super::clock::Clock;
use super::query::SelectQuery;
use super::store::{KeyValueStore, Row, RowStore};

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `HashMap`-backed key-value store.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, new: &str) -> StoreResult<bool> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        entries.insert(key.to_string(), new.to_string());
        Ok(true)
    }
}

/// A `RowStore` that replays scripted responses and records every query.
///
/// Responses are consumed in order; once the script runs out every query
/// returns no rows.
#[derive(Default)]
pub struct ScriptedRowStore {
    responses: Mutex<VecDeque<StoreResult<Vec<Row>>>>,
    queries: Mutex<Vec<SelectQuery>>,
}

impl ScriptedRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: StoreResult<Vec<Row>>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// Queue a response of rows carrying only an `id`.
    pub fn push_ids(&self, ids: &[i64]) {
        let rows = ids
            .iter()
            .map(|id| {
                let mut row = Row::new();
                row.insert("id".to_string(), (*id).into());
                row
            })
            .collect();
        self.push_response(Ok(rows));
    }

    pub fn queries(&self) -> Vec<SelectQuery> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RowStore for ScriptedRowStore {
    fn select(&self, query: &SelectQuery) -> StoreResult<Vec<Row>> {
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
