//! Distinct helper.
//!
//! - [`Collection::unique`] - first occurrence of each strictly distinct value
//!
//! Scalars are deduplicated through a `HashSet` of hashable fingerprints.
//! Arrays and objects have no such fingerprint and are checked against the
//! values kept so far, which is quadratic in the number of compound values.

use crate::collection::Collection;
use crate::value::Value;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// Hashable stand-in for a scalar under strict equality.
#[derive(PartialEq, Eq, Hash)]
enum Fingerprint {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
}

fn fingerprint(v: &Value) -> Option<Fingerprint> {
    match v {
        Value::Null => Some(Fingerprint::Null),
        Value::Bool(b) => Some(Fingerprint::Bool(*b)),
        Value::Int(i) => Some(Fingerprint::Int(*i)),
        // NaN is never strictly equal to itself, so it never deduplicates
        Value::Float(f) if f.is_nan() => None,
        Value::Float(f) => Some(Fingerprint::Float(OrderedFloat(*f))),
        Value::Str(s) => Some(Fingerprint::Str(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl Collection {
    /// Keep the first occurrence of each value under strict equality.
    ///
    /// Returns a re-startable collection keyed `0..`; the original keys are
    /// dropped. Objects are distinct unless they are the same handle.
    ///
    /// # Example
    /// ```ignore
    /// let c = Collection::from_vec(vec![Value::Int(1), Value::from("1"), Value::Int(1)]);
    /// assert_eq!(c.unique().to_array(), array![1, "1"]);
    /// ```
    #[must_use]
    pub fn unique(&self) -> Collection {
        let mut scalars = HashSet::new();
        let mut kept: Vec<Value> = Vec::new();
        for (_, v) in self.iter() {
            let fresh = match fingerprint(&v) {
                Some(fp) => scalars.insert(fp),
                None => !kept.contains(&v),
            };
            if fresh {
                kept.push(v);
            }
        }
        Collection::from_vec(kept)
    }
}
