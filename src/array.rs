//! Insertion-ordered key/value storage.
//!
//! [`Array`] is the materialized form of a collection: an ordered map whose
//! keys are unique. Writing an existing key keeps its original position and
//! replaces the value, so "last wins" while order reflects first insertion.

use crate::key::Key;
use crate::value::Value;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Default)]
pub struct Array {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
    next_int: i64,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_int: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite `key`, returning the previous value if any.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Key::Int(i) = key {
            if i >= self.next_int {
                self.next_int = i.saturating_add(1);
            }
        }
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Append `value` under the next free integer key and return that key.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::Int(self.next_int);
        self.insert(key.clone(), value);
        key
    }

    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Value> {
        self.get_key(&key.into())
    }

    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        let pos = *self.index.get(key)?;
        Some(&mut self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Entry at insertion position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<(&Key, &Value)> {
        self.entries.get(pos).map(|(k, v)| (k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// True when the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == Key::Int(i as i64))
    }

    pub fn into_pairs(self) -> Vec<(Key, Value)> {
        self.entries
    }

    /// Values in order, discarding keys.
    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl FromIterator<(Key, Value)> for Array {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Array::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            array.insert(k, v);
        }
        array
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Array::with_capacity(iter.size_hint().0);
        for v in iter {
            array.push(v);
        }
        array
    }
}

impl IntoIterator for Array {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Strict comparison: same keys in the same order with strictly equal values.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for v in self.values() {
                seq.serialize_element(v)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(&k.to_string(), v)?;
            }
            map.end()
        }
    }
}

/// Build an [`Array`] literal.
///
/// ```
/// use ironseq::{array, Value};
///
/// let list = array![1, 2, 3];
/// assert!(list.is_list());
///
/// let map = array! { "a" => 1, 5 => "five" };
/// assert_eq!(map.get("a"), Some(&Value::Int(1)));
/// assert_eq!(map.get(5), Some(&Value::from("five")));
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::Array::new();
        $( array.insert($crate::Key::from($key), $crate::Value::from($value)); )+
        array
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut array = $crate::Array::new();
        $( array.push($crate::Value::from($value)); )+
        array
    }};
}
