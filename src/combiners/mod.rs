//! Built-in combiners for [`Collection::combine`](crate::Collection::combine)
//! and [`Collection::combine_by`](crate::Collection::combine_by).
//!
//! A combiner folds a stream of values into one result through an
//! accumulator:
//!
//! - [`Sum`] -- arithmetic sum; non-numeric values count as `0`.
//! - [`Min`] -- smallest value under loose ordering, `Null` when empty.
//! - [`Max`] -- largest value under loose ordering, `Null` when empty.
//! - [`Count`] -- number of values.
//!
//! # Examples
//! ```ignore
//! use ironseq::{array, Collection};
//! use ironseq::combiners::{Max, Sum};
//!
//! let c = Collection::from_array(array![3, 1, 2]);
//! assert_eq!(c.combine(Sum), Value::Int(6));
//! assert_eq!(c.combine(Max), Value::Int(3));
//! ```

mod basic;

pub use basic::{Count, Max, Min, Sum};

/// A fold with an explicit accumulator.
///
/// - `V`: input value type
/// - `A`: accumulator type
/// - `O`: output type
pub trait CombineFn<V, A, O> {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn finish(&self, acc: A) -> O;
}
