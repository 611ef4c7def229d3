//! Value paths.
//!
//! Several operations (`index_by`, `column`, `group_by`, `sort_by`, ...) pick a
//! value out of each element. The selector is a [`Path`]: either a key, which
//! may be a dotted path into nested arrays and objects, or a function of the
//! element.

use crate::key::Key;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Selects a value from an element.
#[derive(Clone)]
pub enum Path {
    Key(Key),
    Func(Rc<dyn Fn(&Value) -> Value>),
}

impl Path {
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Path::Func(Rc::new(f))
    }

    /// Resolve against `source`, falling back to `default`.
    pub fn get(&self, source: &Value, default: Value) -> Value {
        get_value(source, self, default)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Key(k) => f.debug_tuple("Key").field(k).finish(),
            Path::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<Key> for Path {
    fn from(k: Key) -> Self {
        Path::Key(k)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::Key(Key::from(s))
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::Key(Key::from(s))
    }
}

impl From<i64> for Path {
    fn from(i: i64) -> Self {
        Path::Key(Key::Int(i))
    }
}

impl From<i32> for Path {
    fn from(i: i32) -> Self {
        Path::Key(Key::from(i))
    }
}

/// Look up `path` inside `source`.
///
/// A function path is simply applied. A key path is first tried literally;
/// if that misses and the key contains dots, each dot-separated segment is
/// resolved in turn, through array keys and object attributes. Any miss
/// yields `default`.
///
/// ```ignore
/// let row = Value::from(array! { "a" => array! { "b" => 5 } });
/// assert_eq!(get_value(&row, &"a.b".into(), Value::Null), Value::Int(5));
/// ```
pub fn get_value(source: &Value, path: &Path, default: Value) -> Value {
    let key = match path {
        Path::Func(f) => return f(source),
        Path::Key(k) => k,
    };
    if let Some(v) = lookup(source, key) {
        return v;
    }
    let Key::Str(dotted) = key else {
        return default;
    };
    if !dotted.contains('.') {
        return default;
    }
    let mut current = source.clone();
    for segment in dotted.split('.') {
        match lookup(&current, &Key::from(segment)) {
            Some(next) => current = next,
            None => return default,
        }
    }
    current
}

fn lookup(source: &Value, key: &Key) -> Option<Value> {
    match source {
        Value::Array(a) => a.get_key(key).cloned(),
        Value::Object(o) => o.attribute(&key.to_string()),
        _ => None,
    }
}
