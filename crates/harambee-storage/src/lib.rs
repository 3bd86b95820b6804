//! # harambee-storage
//!
//! SQLite implementation of the Harambee store traits.
//!
//! - `pragmas`: connection PRAGMAs
//! - `schema` / `migrations`: versioned schema; v1 predates `projects.module_key`
//! - `sql`: `SelectQuery` → parameterized SQL with identifier validation
//! - `errors`: rusqlite failures mapped onto typed `StoreError`s
//! - `projects`: tenant/project seeding and column introspection
//! - `store`: `SqliteStore`, implementing `RowStore` and `KeyValueStore`

pub mod errors;
pub mod migrations;
pub mod pragmas;
pub mod projects;
pub mod schema;
pub mod sql;
pub mod store;

pub use migrations::{migrate, migrate_to, CURRENT_VERSION};
pub use projects::NewProject;
pub use store::SqliteStore;
