//! Batch operations over collections of records.
//!
//! [`ModelCollection`] sequences calls against a record store described by
//! the [`Record`], [`Connection`], [`Transaction`] and [`Query`] traits. It
//! does not persist anything itself.
//!
//! Persisting operations accept an optional [`Connection`]. With one, the
//! whole batch runs in a transaction: it commits when every record succeeds
//! and rolls back at the first store error, which is then returned unchanged.
//!
//! ```ignore
//! use ironseq::models::ModelCollection;
//! use ironseq::testing::fixtures::{Customer, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let customers = ModelCollection::from_records(vec![
//!     Customer::new("Alice", 30).attach(&store),
//!     Customer::new("Bob", 41).attach(&store),
//! ]);
//! customers.save_all(true, None, Some(&store))?;
//! assert_eq!(store.rows("customers").len(), 2);
//! ```

mod collection;
mod record;
mod transaction;

pub use collection::ModelCollection;
pub use record::{Connection, Query, Record, Transaction};
