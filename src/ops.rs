//! Lazy pair operators.
//!
//! Each operator wraps an upstream [`Cursor`] and is itself an iterator of
//! `(key, value)` pairs. Nothing is pulled from upstream until the operator
//! is driven.

use crate::cursor::Cursor;
use crate::key::Key;
use crate::value::Value;

/// Yields `f(value, key)` under the original key.
pub(crate) struct MapOp<F> {
    pub(crate) input: Cursor,
    pub(crate) f: F,
}

impl<F, O> Iterator for MapOp<F>
where
    F: FnMut(&Value, &Key) -> O,
    O: Into<Value>,
{
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.input.next()?;
        let out = (self.f)(&v, &k).into();
        Some((k, out))
    }
}

/// Keeps the pairs for which `pred(value, key)` holds.
pub(crate) struct FilterOp<P> {
    pub(crate) input: Cursor,
    pub(crate) pred: P,
}

impl<P> Iterator for FilterOp<P>
where
    P: FnMut(&Value, &Key) -> bool,
{
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (k, v) = self.input.next()?;
            if (self.pred)(&v, &k) {
                return Some((k, v));
            }
        }
    }
}

/// What an `each` callback returned.
///
/// Callbacks returning `()` never stop the pass; callbacks returning `bool`
/// stop it by returning `false` when `stop_on_false` is set.
pub trait EachOutcome {
    fn is_false(&self) -> bool;
}

impl EachOutcome for () {
    fn is_false(&self) -> bool {
        false
    }
}

impl EachOutcome for bool {
    fn is_false(&self) -> bool {
        !*self
    }
}

/// Calls `f` on each pair before passing it through unchanged.
pub(crate) struct EachOp<F> {
    pub(crate) input: Cursor,
    pub(crate) f: F,
    pub(crate) stop_on_false: bool,
    pub(crate) stopped: bool,
}

impl<F, R> Iterator for EachOp<F>
where
    F: FnMut(&Value, &Key) -> R,
    R: EachOutcome,
{
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let (k, v) = self.input.next()?;
        if (self.f)(&v, &k).is_false() && self.stop_on_false {
            // the current pair is still yielded
            self.stopped = true;
        }
        Some((k, v))
    }
}

/// Attaches sequential integer keys from `0` to a stream of values.
pub(crate) struct ReindexOp<I> {
    input: I,
    next_key: i64,
}

impl<I> ReindexOp<I> {
    pub(crate) fn new(input: I) -> Self {
        Self { input, next_key: 0 }
    }
}

impl<I: Iterator<Item = Value>> Iterator for ReindexOp<I> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.input.next()?;
        let k = Key::Int(self.next_key);
        self.next_key += 1;
        Some((k, v))
    }
}

/// Depth-first flattening of nested arrays and traversable objects into
/// leaf values with sequential keys.
pub(crate) struct CollapseOp {
    stack: Vec<Cursor>,
    next_key: i64,
}

impl CollapseOp {
    pub(crate) fn new(input: Cursor) -> Self {
        Self {
            stack: vec![input],
            next_key: 0,
        }
    }

    fn leaf(&mut self, v: Value) -> (Key, Value) {
        let k = Key::Int(self.next_key);
        self.next_key += 1;
        (k, v)
    }
}

impl Iterator for CollapseOp {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let Some((_, v)) = top.next() else {
                self.stack.pop();
                continue;
            };
            match v {
                Value::Array(nested) => self.stack.push(Cursor::seekable(nested)),
                Value::Object(o) => match o.traverse() {
                    Some(attrs) => self.stack.push(Cursor::seekable(attrs)),
                    None => return Some(self.leaf(Value::Object(o))),
                },
                leaf => return Some(self.leaf(leaf)),
            }
        }
    }
}
