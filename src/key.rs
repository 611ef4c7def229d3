//! Keys of a collection.
//!
//! A key is either an integer ordinal or a string label. String labels that
//! spell a canonical decimal integer are stored as integers, so `"8"` and `8`
//! address the same slot of an [`Array`](crate::Array).

use crate::value::Value;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Coerce an arbitrary value into a key.
    ///
    /// - integers stay integers, canonical integer strings become integers
    /// - booleans become `0`/`1`, floats are truncated toward zero
    /// - null becomes the empty string
    /// - arrays and objects use their display text
    pub fn from_value(value: &Value) -> Key {
        match value {
            Value::Int(i) => Key::Int(*i),
            Value::Str(s) => Key::from(s.as_str()),
            Value::Bool(b) => Key::Int(i64::from(*b)),
            Value::Float(f) if f.is_finite() => Key::Int(f.trunc() as i64),
            Value::Float(_) => Key::Int(0),
            Value::Null => Key::Str(String::new()),
            other => Key::Str(other.to_string()),
        }
    }

    /// The key as a value: integers as [`Value::Int`], labels as [`Value::Str`].
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }
}

/// Parse `s` as an integer only if it is written canonically: no sign other
/// than a leading `-`, no leading zeros, no whitespace, and `-0` excluded.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut chars = digits.chars();
    let first = chars.next()?;
    if !first.is_ascii_digit() || !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    if first == '0' && (digits.len() > 1 || s.starts_with('-')) {
        return None;
    }
    s.parse().ok()
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_int(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_int(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}
