//! Cursors over `(key, value)` pairs.
//!
//! A [`Cursor`] is the one iteration protocol every collection sits on. There
//! are two kinds:
//!
//! - **seekable**: backed by a materialized [`Array`]; every [`share`] starts
//!   again from the first pair, so a collection over it can be iterated any
//!   number of times
//! - **single-pass**: backed by an arbitrary iterator; all handles obtained
//!   through [`share`] advance one shared position, so once drained it stays
//!   drained
//!
//! [`share`]: Cursor::share

use crate::array::Array;
use crate::key::Key;
use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Boxed pair iterator.
pub type Pairs = Box<dyn Iterator<Item = (Key, Value)>>;

#[derive(Clone)]
enum CursorKind {
    Seekable { data: Rc<Array>, pos: usize },
    SinglePass(Rc<RefCell<Pairs>>),
}

#[derive(Clone)]
pub struct Cursor {
    kind: CursorKind,
}

impl Cursor {
    /// Re-startable cursor over a materialized array.
    pub fn seekable(data: Array) -> Self {
        Self::from_shared(Rc::new(data))
    }

    pub fn from_shared(data: Rc<Array>) -> Self {
        Cursor {
            kind: CursorKind::Seekable { data, pos: 0 },
        }
    }

    /// Forward-only cursor over `iter`.
    pub fn single_pass<I>(iter: I) -> Self
    where
        I: Iterator<Item = (Key, Value)> + 'static,
    {
        let boxed: Pairs = Box::new(iter);
        Cursor {
            kind: CursorKind::SinglePass(Rc::new(RefCell::new(boxed))),
        }
    }

    /// A handle for a new traversal: seekable cursors restart at the first
    /// pair, single-pass cursors continue from the shared position.
    pub fn share(&self) -> Cursor {
        match &self.kind {
            CursorKind::Seekable { data, .. } => Cursor::from_shared(Rc::clone(data)),
            CursorKind::SinglePass(inner) => Cursor {
                kind: CursorKind::SinglePass(Rc::clone(inner)),
            },
        }
    }

    pub fn can_restart(&self) -> bool {
        matches!(self.kind, CursorKind::Seekable { .. })
    }

    /// The backing array of a seekable cursor, independent of its position.
    pub fn backing(&self) -> Option<Rc<Array>> {
        match &self.kind {
            CursorKind::Seekable { data, .. } => Some(Rc::clone(data)),
            CursorKind::SinglePass(_) => None,
        }
    }
}

impl Iterator for Cursor {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.kind {
            CursorKind::Seekable { data, pos } => {
                let (k, v) = data.get_index(*pos)?;
                *pos += 1;
                Some((k.clone(), v.clone()))
            }
            CursorKind::SinglePass(inner) => inner.borrow_mut().next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.kind {
            CursorKind::Seekable { data, pos } => {
                let left = data.len().saturating_sub(*pos);
                (left, Some(left))
            }
            CursorKind::SinglePass(_) => (0, None),
        }
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CursorKind::Seekable { data, pos } => f
                .debug_struct("Cursor")
                .field("len", &data.len())
                .field("pos", pos)
                .finish(),
            CursorKind::SinglePass(_) => f.write_str("Cursor(single-pass)"),
        }
    }
}
