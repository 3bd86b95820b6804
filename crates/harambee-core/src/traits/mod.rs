//! Traits at the collaborator seams: the relational store, the client-side
//! key-value store, and the wall clock.

pub mod clock;
pub mod query;
pub mod store;
pub mod test_helpers;

pub use clock::{Clock, SystemClock};
pub use query::{Filter, FilterOp, FilterValue, OrderBy, SelectQuery};
pub use store::{KeyValueStore, Row, RowStore};
