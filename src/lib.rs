//! # Ironseq
//!
//! **Lazy, chainable key/value collections** for Rust. A [`Collection`] wraps
//! an ordered stream of `(key, value)` pairs and offers a fluent API of
//! transformations (map, filter, re-keying, flattening, merging), aggregates
//! (reduce, sum, min, max, contains), materializing operations (sorting,
//! grouping, slicing, pagination) and export (array snapshots and JSON). A
//! thin batch layer, [`models::ModelCollection`], sequences persistence calls
//! for collections of records against an external store.
//!
//! ## Key Features
//!
//! - **Lazy chains** - transformations do no work until the result is driven
//! - **Keys are data** - integer and string keys are preserved, re-keyed or
//!   swapped explicitly by each operation
//! - **Heterogeneous values** - numbers, strings, nested arrays and shared
//!   object handles in one collection, with strict and loose equality
//! - **Built-in combiners** - Sum, Min, Max, Count, or your own [`CombineFn`]
//! - **Batch records** - save, update, delete, validate and bulk-insert with
//!   optional transactions (feature `models`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironseq::*;
//!
//! # fn main() -> Result<()> {
//! let people = Collection::new(array![
//!     array! { "name" => "Ada", "age" => 36 },
//!     array! { "name" => "Linus", "age" => 21 },
//!     array! { "name" => "Grace", "age" => 45 },
//! ])?;
//!
//! let names_by_age = people
//!     .filter(|p, _| get_value(p, &"age".into(), Value::Null).loose_cmp(&Value::Int(30)).is_gt())
//!     .remap("name", "age");
//!
//! assert_eq!(names_by_age.to_array(), array! { "Ada" => 36, "Grace" => 45 });
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Values and keys
//!
//! Elements are [`Value`]s: null, booleans, integers, floats, strings, nested
//! [`Array`]s and [`Object`] handles to user types implementing [`Model`].
//! Keys are [`Key`]s: integers or strings, where canonical integer strings
//! such as `"8"` are stored as integers.
//!
//! ### Cursors
//!
//! Every collection sits on a [`Cursor`]. Collections built from arrays or
//! produced by materializing operations are **re-startable**: each traversal
//! starts at the first pair. Collections produced by chain operations, or
//! built from iterators, are **single-pass**: all consumers share one
//! position, so draining one (for example with `count()`) leaves it empty.
//! Take a [`snapshot`](Collection::snapshot) to iterate such a result more
//! than once.
//!
//! ### Transformations
//!
//! - [`map`](Collection::map), [`filter`](Collection::filter),
//!   [`each`](Collection::each) - element-wise, keys kept
//! - [`keys`](Collection::keys), [`values`](Collection::values),
//!   [`column`](Collection::column) - project, re-keyed `0..`
//! - [`index_by`](Collection::index_by), [`remap`](Collection::remap),
//!   [`flip`](Collection::flip) - derive new keys
//! - [`replace`](Collection::replace), [`remove`](Collection::remove) -
//!   strict or loose equality
//! - [`merge`](Collection::merge), [`collapse`](Collection::collapse),
//!   [`flat_map`](Collection::flat_map) - combine and flatten
//!
//! ### Terminal operations
//!
//! - [`reduce`](Collection::reduce), [`count`](Collection::count),
//!   [`sum`](Collection::sum), [`min`](Collection::min),
//!   [`max`](Collection::max), [`contains`](Collection::contains)
//! - [`sort`](Collection::sort), [`sort_by`](Collection::sort_by),
//!   [`group_by`](Collection::group_by), [`slice`](Collection::slice),
//!   [`paginate`](Collection::paginate), [`unique`](Collection::unique) -
//!   materialize and return a re-startable collection
//! - [`to_array`](Collection::to_array) and `to_json` - export
//!
//! ## Feature Flags
//!
//! - `json` (default) - `to_json` on collections and error collectors
//! - `models` (default) - the batch record layer and the in-memory store
//!   used by its tests
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (transaction boundaries, skipped
//! records, materialization sizes) and never installs a subscriber.
//!
//! ## Threading
//!
//! Collections share cursors and objects through `Rc`, so they are neither
//! `Send` nor `Sync`. Driving a single-pass collection from inside one of its
//! own callbacks panics on the shared cursor's `RefCell`.
//!
//! ## Module Overview
//!
//! - [`collection`] - the collection type and chain operations
//! - [`cursor`] / [`source`] - iteration protocol and input normalization
//! - [`accessor`] - key and dotted-path lookup
//! - [`combiners`] - built-in folds
//! - [`validation`] - validation errors and helpers
//! - [`models`] - batch record operations (feature `models`)
//! - [`testing`] - assertions, fixtures and an in-memory store

pub mod accessor;
pub mod array;
pub mod collection;
pub mod combiners;
pub mod cursor;
pub mod error;
pub mod helpers;
pub mod key;
pub mod object;
mod ops;
pub mod source;
pub mod testing;
pub mod validation;
pub mod value;

#[cfg(feature = "models")]
pub mod models;

// General re-exports
pub use accessor::{get_value, Path};
pub use array::Array;
pub use collection::Collection;
pub use combiners::CombineFn;
pub use cursor::Cursor;
pub use error::{CollectionError, Result};
pub use helpers::*;
pub use key::Key;
pub use object::{Model, Object};
pub use ops::EachOutcome;
pub use source::{normalize, Aggregate, Source};
pub use value::{Number, Value};

// Gated re-exports
#[cfg(feature = "models")]
pub use models::{Connection, ModelCollection, Query, Record, Transaction};
