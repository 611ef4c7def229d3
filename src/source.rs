//! Turning inputs into cursors.
//!
//! Anything a collection can be built from is first expressed as a
//! [`Source`] (usually through one of the `From` conversions) and then
//! [`normalize`]d into a [`Cursor`].

use crate::array::Array;
use crate::collection::Collection;
use crate::cursor::Cursor;
use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::object::Object;
use crate::value::Value;
use std::fmt;

/// An object that supplies its own cursor.
pub trait Aggregate {
    fn cursor(&self) -> Result<Cursor>;
}

impl Aggregate for Collection {
    fn cursor(&self) -> Result<Cursor> {
        Ok(self.cursor().share())
    }
}

/// Objects iterate over their traversable attributes.
impl Aggregate for Object {
    fn cursor(&self) -> Result<Cursor> {
        match self.traverse() {
            Some(pairs) => Ok(Cursor::seekable(pairs)),
            None => Err(CollectionError::invalid_input(format!(
                "{} is not iterable",
                self.type_name()
            ))),
        }
    }
}

/// Recognised collection inputs.
pub enum Source {
    /// Null (empty) or a single scalar (`[0 => v]`).
    Scalar(Value),
    Array(Array),
    Aggregate(Box<dyn Aggregate>),
    Cursor(Cursor),
    /// A generator-like producer, consumed once.
    Producer(Box<dyn Iterator<Item = (Key, Value)>>),
}

impl Source {
    /// Wrap a pair producer.
    pub fn producer<I>(iter: I) -> Self
    where
        I: Iterator<Item = (Key, Value)> + 'static,
    {
        Source::Producer(Box::new(iter))
    }

    pub(crate) fn is_scalar(&self) -> bool {
        matches!(self, Source::Scalar(_))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Source::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Source::Aggregate(_) => f.write_str("Aggregate(..)"),
            Source::Cursor(c) => f.debug_tuple("Cursor").field(c).finish(),
            Source::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Produce a cursor for `source`.
pub fn normalize(source: Source) -> Result<Cursor> {
    match source {
        Source::Scalar(Value::Null) => Ok(Cursor::seekable(Array::new())),
        Source::Scalar(v) => {
            let mut single = Array::with_capacity(1);
            single.push(v);
            Ok(Cursor::seekable(single))
        }
        Source::Array(a) => Ok(Cursor::seekable(a)),
        Source::Aggregate(agg) => agg.cursor(),
        Source::Cursor(c) => Ok(c),
        Source::Producer(iter) => Ok(Cursor::single_pass(iter)),
    }
}

impl From<Value> for Source {
    fn from(v: Value) -> Self {
        match v {
            Value::Array(a) => Source::Array(a),
            Value::Object(o) => Source::Aggregate(Box::new(o)),
            scalar => Source::Scalar(scalar),
        }
    }
}

impl From<Array> for Source {
    fn from(a: Array) -> Self {
        Source::Array(a)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Source {
    fn from(v: Vec<T>) -> Self {
        Source::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Collection> for Source {
    fn from(c: Collection) -> Self {
        Source::Aggregate(Box::new(c))
    }
}

impl From<&Collection> for Source {
    fn from(c: &Collection) -> Self {
        Source::Aggregate(Box::new(c.clone()))
    }
}

impl From<Cursor> for Source {
    fn from(c: Cursor) -> Self {
        Source::Cursor(c)
    }
}

impl From<Object> for Source {
    fn from(o: Object) -> Self {
        Source::Aggregate(Box::new(o))
    }
}

macro_rules! scalar_source {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Source {
                fn from(v: $t) -> Self {
                    Source::Scalar(Value::from(v))
                }
            }
        )*
    };
}

scalar_source!(&str, String, i64, i32, f64, bool);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    fn pairs(source: Source) -> Vec<(Key, Value)> {
        normalize(source).unwrap().collect()
    }

    #[test]
    fn scalars_wrap_or_vanish() {
        assert!(pairs(Source::from(Value::Null)).is_empty());
        assert_eq!(pairs(Source::from("x")), vec![(Key::Int(0), Value::from("x"))]);
    }

    #[test]
    fn arrays_keep_keys() {
        let got = pairs(Source::from(array! { "a" => 1, 7 => 2 }));
        assert_eq!(got, vec![(Key::from("a"), Value::Int(1)), (Key::Int(7), Value::Int(2))]);
    }

    #[test]
    fn producers_are_single_pass() {
        let cursor = normalize(Source::producer(std::iter::once((Key::Int(0), Value::Int(1))))).unwrap();
        assert!(!cursor.can_restart());
    }
}
