//! The [`Collection`] type and its lazy chain operations.
//!
//! A `Collection` wraps one [`Cursor`]. Chain operations never touch elements
//! when called: they wrap a shared handle of the current cursor in a lazy
//! operator and return a new collection over that operator. Work happens only
//! when the result is iterated or handed to a terminal operation.
//!
//! Results of chain operations are **single-pass**. Draining one (for
//! example with [`count`](Collection::count)) leaves it empty; call
//! [`snapshot`](Collection::snapshot) first to iterate a result more than
//! once.
//!
//! ```ignore
//! use ironseq::{array, Collection};
//!
//! let c = Collection::new(array![1, 2, 3, 4])?;
//! let doubled_odds = c.filter(|v, _| v.as_i64().unwrap_or(0) % 2 == 1)
//!     .map(|v, _| v.as_i64().unwrap_or(0) * 2)
//!     .values();
//! assert_eq!(doubled_odds.to_array(), array![2, 6]);
//! ```

use crate::accessor::{get_value, Path};
use crate::array::Array;
use crate::cursor::Cursor;
use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::ops::{CollapseOp, EachOp, EachOutcome, FilterOp, MapOp, ReindexOp};
use crate::source::{normalize, Source};
use crate::value::Value;
use std::fmt;

#[derive(Clone)]
pub struct Collection {
    cursor: Cursor,
}

/// Strict or loose element comparison.
pub(crate) fn same(a: &Value, b: &Value, strict: bool) -> bool {
    if strict { a == b } else { a.loose_eq(b) }
}

impl Collection {
    /// Build a collection from any recognised source.
    ///
    /// Fails with [`CollectionError::InvalidInput`] when an object source is
    /// not iterable.
    pub fn new(source: impl Into<Source>) -> Result<Self> {
        Ok(Self::from_cursor(normalize(source.into())?))
    }

    pub fn from_cursor(cursor: Cursor) -> Self {
        Collection { cursor }
    }

    /// Re-startable collection over `values` with keys `0..n`.
    pub fn from_vec<T: Into<Value>>(values: Vec<T>) -> Self {
        Self::from_array(values.into_iter().map(Into::into).collect())
    }

    /// Re-startable collection over `array`, keys verbatim.
    pub fn from_array(array: Array) -> Self {
        Self::from_cursor(Cursor::seekable(array))
    }

    /// Lazy single-pass collection over `values` with keys `0..`.
    pub fn from_iter<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: Into<Value> + 'static,
    {
        let values = values.into_iter().map(Into::into);
        Self::from_cursor(Cursor::single_pass(ReindexOp::new(values)))
    }

    /// Lazy single-pass collection over `(key, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Key, Value)>,
        I::IntoIter: 'static,
    {
        Self::from_cursor(Cursor::single_pass(pairs.into_iter()))
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// A fresh traversal of the pairs; see [`Cursor::share`].
    pub fn iter(&self) -> Cursor {
        self.cursor.share()
    }

    /// Whether the collection can be iterated more than once.
    pub fn can_restart(&self) -> bool {
        self.cursor.can_restart()
    }

    fn chain<I>(iter: I) -> Collection
    where
        I: Iterator<Item = (Key, Value)> + 'static,
    {
        Collection::from_cursor(Cursor::single_pass(iter))
    }

    /// `f(value, key)` for every pair, keys kept.
    pub fn map<F, O>(&self, f: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> O + 'static,
        O: Into<Value>,
    {
        Self::chain(MapOp {
            input: self.iter(),
            f,
        })
    }

    /// Pairs for which `pred(value, key)` holds, keys kept.
    pub fn filter<P>(&self, pred: P) -> Collection
    where
        P: FnMut(&Value, &Key) -> bool + 'static,
    {
        Self::chain(FilterOp {
            input: self.iter(),
            pred,
        })
    }

    /// [`map`](Self::map) followed by [`collapse`](Self::collapse).
    pub fn flat_map<F, O>(&self, f: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> O + 'static,
        O: Into<Value>,
    {
        self.map(f).collapse()
    }

    /// The keys as values, re-keyed `0..`.
    pub fn keys(&self) -> Collection {
        Self::chain(ReindexOp::new(self.iter().map(|(k, _)| k.to_value())))
    }

    /// The values, re-keyed `0..`.
    pub fn values(&self) -> Collection {
        Self::chain(ReindexOp::new(self.iter().map(|(_, v)| v)))
    }

    /// Call `f(value, key)` on every pair as it passes through.
    ///
    /// With `stop_on_false`, a callback returning `false` ends the pass after
    /// the current pair. Callbacks returning `()` never stop it.
    pub fn each<F, R>(&self, f: F, stop_on_false: bool) -> Collection
    where
        F: FnMut(&Value, &Key) -> R + 'static,
        R: EachOutcome,
    {
        Self::chain(EachOp {
            input: self.iter(),
            f,
            stop_on_false,
            stopped: false,
        })
    }

    /// Re-key each element by the value at `path`.
    ///
    /// Duplicate keys are kept in the stream; materializing keeps the last.
    pub fn index_by(&self, path: impl Into<Path>) -> Collection {
        let path = path.into();
        Self::chain(self.iter().map(move |(_, v)| {
            let key = Key::from_value(&get_value(&v, &path, Value::Null));
            (key, v)
        }))
    }

    /// The value at `path` of each element.
    pub fn column(&self, path: impl Into<Path>, keep_keys: bool) -> Collection {
        let path = path.into();
        if keep_keys {
            Self::chain(
                self.iter()
                    .map(move |(k, v)| (k, get_value(&v, &path, Value::Null))),
            )
        } else {
            Self::chain(ReindexOp::new(
                self.iter().map(move |(_, v)| get_value(&v, &path, Value::Null)),
            ))
        }
    }

    /// Swap keys and values.
    pub fn flip(&self) -> Collection {
        Self::chain(self.iter().map(|(k, v)| (Key::from_value(&v), k.to_value())))
    }

    /// Key each element by the value at `from` and replace it with the value
    /// at `to`.
    pub fn remap(&self, from: impl Into<Path>, to: impl Into<Path>) -> Collection {
        let (from, to) = (from.into(), to.into());
        Self::chain(self.iter().map(move |(_, v)| {
            let key = Key::from_value(&get_value(&v, &from, Value::Null));
            (key, get_value(&v, &to, Value::Null))
        }))
    }

    /// Same as [`remap`](Self::remap).
    pub fn pluck(&self, from: impl Into<Path>, to: impl Into<Path>) -> Collection {
        self.remap(from, to)
    }

    /// Substitute `replacement` for every element equal to `item`.
    pub fn replace(
        &self,
        item: impl Into<Value>,
        replacement: impl Into<Value>,
        strict: bool,
    ) -> Collection {
        let (item, replacement) = (item.into(), replacement.into());
        self.map(move |v, _| {
            if same(v, &item, strict) {
                replacement.clone()
            } else {
                v.clone()
            }
        })
    }

    /// Drop every element equal to `item`.
    pub fn remove(&self, item: impl Into<Value>, strict: bool) -> Collection {
        let item = item.into();
        self.filter(move |v, _| !same(v, &item, strict))
    }

    /// Drop every pair for which `pred(value, key)` holds.
    pub fn remove_where<P>(&self, mut pred: P) -> Collection
    where
        P: FnMut(&Value, &Key) -> bool + 'static,
    {
        self.filter(move |v, k| !pred(v, k))
    }

    /// All pairs of `self`, then all pairs of `other`, keys as emitted.
    ///
    /// Fails with [`CollectionError::InvalidInput`] when `other` is a scalar
    /// or an object that cannot be iterated.
    pub fn merge(&self, other: impl Into<Source>) -> Result<Collection> {
        let other = other.into();
        if other.is_scalar() {
            return Err(CollectionError::invalid_input(
                "merge expects an iterable source",
            ));
        }
        let tail = normalize(other)?;
        Ok(Self::chain(self.iter().chain(tail)))
    }

    /// Recursively flatten nested arrays and iterable objects into leaf
    /// values keyed `0..`.
    pub fn collapse(&self) -> Collection {
        Self::chain(CollapseOp::new(self.iter()))
    }
}

impl IntoIterator for &Collection {
    type Item = (Key, Value);
    type IntoIter = Cursor;

    fn into_iter(self) -> Cursor {
        self.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = Cursor;

    fn into_iter(self) -> Cursor {
        self.cursor
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl From<Array> for Collection {
    fn from(array: Array) -> Self {
        Collection::from_array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    #[test]
    fn chain_calls_are_lazy() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let c = Collection::from_vec(vec![1, 2, 3]);
        let mapped = c.map(move |v, _| {
            seen.set(seen.get() + 1);
            v.clone()
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.iter().count(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn seekable_sources_restart() {
        let c = Collection::from_array(array! { "a" => 1, "b" => 2 });
        assert!(c.can_restart());
        assert_eq!(c.iter().count(), 2);
        assert_eq!(c.iter().count(), 2);
    }

    #[test]
    fn merge_rejects_scalars() {
        let c = Collection::from_vec(vec![1]);
        assert!(matches!(
            c.merge(Value::Int(5)),
            Err(CollectionError::InvalidInput(_))
        ));
    }
}
