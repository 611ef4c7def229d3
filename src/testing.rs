//! Testing utilities for collections and record batches.
//!
//! - **Assertions**: compare materialized collections with expected data
//! - **Fixtures**: ready-made models ([`fixtures::Customer`],
//!   [`fixtures::Product`]) and small datasets
//! - **Store**: [`MemoryStore`], an in-memory record store with
//!   transactions and an event log (feature `models`)
//!
//! # Quick Start
//!
//! ```ignore
//! use ironseq::*;
//! use ironseq::testing::*;
//!
//! #[test]
//! fn doubles() {
//!     let c = Collection::from_vec(vec![1, 2, 3]).map(|v, _| v.as_i64().unwrap_or(0) * 2);
//!     assert_values_equal(&c, vec![2, 4, 6]);
//! }
//! ```

pub mod assertions;
pub mod fixtures;

#[cfg(feature = "models")]
pub mod store;

pub use assertions::*;
#[cfg(feature = "models")]
pub use store::{MemoryStore, MemoryTransaction};
