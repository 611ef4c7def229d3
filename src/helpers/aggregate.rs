//! Folding terminals for [`Collection`].
//!
//! Every method here drains a traversal of the collection. On a single-pass
//! collection that traversal is the only one: a second `count()` returns `0`.
//!
//! - [`Collection::reduce`] -- left fold over `(acc, value, key)`.
//! - [`Collection::combine`] / [`Collection::combine_by`] -- fold through a
//!   [`CombineFn`].
//! - [`Collection::sum`], [`Collection::min`], [`Collection::max`] and their
//!   `_by(path)` forms.
//! - [`Collection::contains`] / [`Collection::contains_where`] -- stop at the
//!   first match.

use crate::accessor::{get_value, Path};
use crate::collection::{same, Collection};
use crate::combiners::{CombineFn, Count, Max, Min, Sum};
use crate::key::Key;
use crate::value::Value;

impl Collection {
    /// Left fold: `acc = f(acc, value, key)` for every pair.
    ///
    /// # Example
    /// ```ignore
    /// let c = Collection::from_vec(vec![3, 4, 5]);
    /// let total = c.reduce(|acc, v, _| acc + v.as_i64().unwrap_or(0), 0);
    /// assert_eq!(total, 12);
    /// ```
    pub fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        F: FnMut(A, &Value, &Key) -> A,
    {
        self.iter().fold(initial, |acc, (k, v)| f(acc, &v, &k))
    }

    /// Fold the values through `comb`.
    pub fn combine<C, A, O>(&self, comb: C) -> O
    where
        C: CombineFn<Value, A, O>,
    {
        let mut acc = comb.create();
        for (_, v) in self.iter() {
            comb.add_input(&mut acc, v);
        }
        comb.finish(acc)
    }

    /// Fold the value at `path` of each element through `comb`. Elements
    /// without that path contribute `0`.
    pub fn combine_by<C, A, O>(&self, path: impl Into<Path>, comb: C) -> O
    where
        C: CombineFn<Value, A, O>,
    {
        let path = path.into();
        let mut acc = comb.create();
        for (_, v) in self.iter() {
            comb.add_input(&mut acc, get_value(&v, &path, Value::Int(0)));
        }
        comb.finish(acc)
    }

    pub fn count(&self) -> usize {
        if let Some(data) = self.cursor().backing() {
            return data.len();
        }
        self.combine(Count)
    }

    /// `count() == 0`; drains a single-pass collection like `count` does.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether some element equals `item` (strictly or loosely).
    pub fn contains(&self, item: impl Into<Value>, strict: bool) -> bool {
        let item = item.into();
        self.iter().any(|(_, v)| same(&v, &item, strict))
    }

    /// Whether `pred(value, key)` holds for some pair.
    pub fn contains_where<P>(&self, mut pred: P) -> bool
    where
        P: FnMut(&Value, &Key) -> bool,
    {
        self.iter().any(|(k, v)| pred(&v, &k))
    }

    pub fn sum(&self) -> Value {
        self.combine(Sum)
    }

    pub fn sum_by(&self, path: impl Into<Path>) -> Value {
        self.combine_by(path, Sum)
    }

    /// Smallest element, or `Null` when empty.
    pub fn min(&self) -> Value {
        self.combine(Min)
    }

    pub fn min_by(&self, path: impl Into<Path>) -> Value {
        self.combine_by(path, Min)
    }

    /// Largest element, or `Null` when empty.
    pub fn max(&self) -> Value {
        self.combine(Max)
    }

    pub fn max_by(&self, path: impl Into<Path>) -> Value {
        self.combine_by(path, Max)
    }
}
