//! Grouping helpers for [`Collection`].
//!
//! - [`Collection::group_by`] -- bucket elements by the value at a path.
//! - [`Collection::group_by_paths`] -- nested buckets, one level per path.

use crate::accessor::{get_value, Path};
use crate::array::Array;
use crate::collection::Collection;
use crate::key::Key;
use crate::value::Value;
use std::collections::HashMap;

fn group_level(items: Vec<(Key, Value)>, paths: &[Path], preserve_keys: bool) -> Array {
    let Some((path, rest)) = paths.split_first() else {
        return if preserve_keys {
            items.into_iter().collect()
        } else {
            items.into_iter().map(|(_, v)| v).collect()
        };
    };

    let mut order: Vec<(Key, Vec<(Key, Value)>)> = Vec::new();
    let mut slot: HashMap<Key, usize> = HashMap::new();
    for (k, v) in items {
        let group = Key::from_value(&get_value(&v, path, Value::Null));
        let pos = *slot.entry(group.clone()).or_insert_with(|| {
            order.push((group, Vec::new()));
            order.len() - 1
        });
        order[pos].1.push((k, v));
    }

    order
        .into_iter()
        .map(|(group, members)| (group, Value::Array(group_level(members, rest, preserve_keys))))
        .collect()
}

impl Collection {
    /// Bucket elements by the value at `path`.
    ///
    /// The result maps each distinct group value (as a key) to an array of
    /// its members, in first-seen order. With `preserve_keys` the members
    /// keep their original keys; otherwise they are keyed `0..`.
    ///
    /// # Example
    /// ```ignore
    /// let people = Collection::from_vec(vec![
    ///     Value::from(array! { "name" => "a", "age" => 2 }),
    ///     Value::from(array! { "name" => "b", "age" => 42 }),
    ///     Value::from(array! { "name" => "c", "age" => 2 }),
    /// ]);
    /// let by_age = people.group_by("age", false).to_array();
    /// assert_eq!(by_age.get(2).and_then(Value::as_array).map(Array::len), Some(2));
    /// ```
    #[must_use]
    pub fn group_by(&self, path: impl Into<Path>, preserve_keys: bool) -> Collection {
        self.group_by_paths(vec![path.into()], preserve_keys)
    }

    /// Nested grouping: the first path picks the outer bucket, each further
    /// path splits the buckets of the previous level.
    #[must_use]
    pub fn group_by_paths(&self, paths: Vec<Path>, preserve_keys: bool) -> Collection {
        let items = self.to_array().into_pairs();
        Collection::from_array(group_level(items, &paths, preserve_keys))
    }
}
