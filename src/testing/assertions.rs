//! Assertion functions for testing collection outputs.
//!
//! These compare materialized collections with expected data and panic with
//! a message showing both sides on mismatch.

use crate::array::Array;
use crate::collection::Collection;
use crate::key::Key;
use crate::value::Value;
use std::fmt::Debug;

/// Assert that two slices are equal in order and content.
///
/// # Panics
///
/// Panics if the slices differ in length or content.
///
/// # Example
///
/// ```
/// use ironseq::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that `actual` materializes to exactly `expected`: same keys, same
/// order, strictly equal values.
///
/// # Panics
///
/// Panics on the first differing pair.
pub fn assert_arrays_equal(actual: &Array, expected: &Array) {
    let a: Vec<(&Key, &Value)> = actual.iter().collect();
    let e: Vec<(&Key, &Value)> = expected.iter().collect();
    assert_collections_equal(&a, &e);
}

/// Assert the materialized values of `collection`, ignoring keys.
///
/// Drains a single-pass collection.
pub fn assert_values_equal<T: Into<Value>>(collection: &Collection, expected: Vec<T>) {
    let actual = collection.to_array().into_values();
    let expected: Vec<Value> = expected.into_iter().map(Into::into).collect();
    assert_collections_equal(&actual, &expected);
}

/// Assert that every value satisfies `predicate`.
///
/// # Panics
///
/// Panics naming the first key whose value fails.
pub fn assert_all(collection: &Collection, predicate: impl Fn(&Value) -> bool) {
    for (k, v) in collection.iter() {
        assert!(predicate(&v), "Predicate failed for key {k}: {v:?}");
    }
}

/// Assert that no value satisfies `predicate`.
pub fn assert_none(collection: &Collection, predicate: impl Fn(&Value) -> bool) {
    for (k, v) in collection.iter() {
        assert!(!predicate(&v), "Predicate unexpectedly held for key {k}: {v:?}");
    }
}
