//! Sorting helpers for [`Collection`].
//!
//! All sorts materialize the collection first and return a new re-startable
//! collection. Sorting is stable: elements that compare equal keep their
//! relative order, in both directions.
//!
//! - [`Collection::sort`] -- by value, keys preserved.
//! - [`Collection::sort_by_key`] -- by key, keys preserved.
//! - [`Collection::sort_natural`] -- by value in natural order, keys preserved.
//! - [`Collection::sort_by`] / [`Collection::sort_by_paths`] -- by one or more
//!   paths; integer keys are renumbered, string keys kept.

use crate::accessor::{get_value, Path};
use crate::array::Array;
use crate::collection::Collection;
use crate::key::Key;
use crate::value::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// How two values are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareMode {
    /// Coercive comparison: numbers and numeric strings by magnitude, other
    /// strings byte-wise (see [`Value::loose_cmp`]).
    #[default]
    Numeric,
    /// Compare the text forms byte-wise, so `11` sorts before `4`.
    Lexicographic,
}

impl CompareMode {
    fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            CompareMode::Numeric => a.loose_cmp(b),
            CompareMode::Lexicographic => a.to_string().cmp(&b.to_string()),
        }
    }
}

fn chunk_regex() -> &'static Regex {
    static CHUNKS: OnceLock<Regex> = OnceLock::new();
    CHUNKS.get_or_init(|| Regex::new(r"\d+|\D+").expect("valid chunk regex"))
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural order: runs of digits compare by numeric value, everything else
/// compares as text.
pub fn natural_cmp(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    let (a, b) = if case_insensitive {
        (a.to_lowercase(), b.to_lowercase())
    } else {
        (a.to_string(), b.to_string())
    };
    let re = chunk_regex();
    let mut left = re.find_iter(&a).map(|m| m.as_str());
    let mut right = re.find_iter(&b).map(|m| m.as_str());
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let both_digits = x.starts_with(|c: char| c.is_ascii_digit())
                    && y.starts_with(|c: char| c.is_ascii_digit());
                let ord = if both_digits { cmp_digits(x, y) } else { x.cmp(y) };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

impl Collection {
    fn sorted_pairs<F>(&self, mut cmp: F) -> Vec<(Key, Value)>
    where
        F: FnMut(&(Key, Value), &(Key, Value)) -> Ordering,
    {
        let mut pairs = self.to_array().into_pairs();
        pairs.sort_by(|a, b| cmp(a, b));
        pairs
    }

    /// Sort by value, keeping keys.
    ///
    /// # Example
    /// ```ignore
    /// let c = Collection::from_vec(vec![4, 6, 5, 8, 11, 1]);
    /// let asc = c.sort(SortOrder::Asc, CompareMode::Lexicographic).values();
    /// assert_eq!(asc.to_array(), array![1, 11, 4, 5, 6, 8]);
    /// ```
    #[must_use]
    pub fn sort(&self, order: SortOrder, mode: CompareMode) -> Collection {
        let pairs = self.sorted_pairs(|a, b| order.apply(mode.compare(&a.1, &b.1)));
        Collection::from_array(pairs.into_iter().collect())
    }

    /// Sort by key, keeping keys.
    #[must_use]
    pub fn sort_by_key(&self, order: SortOrder, mode: CompareMode) -> Collection {
        let pairs = self.sorted_pairs(|a, b| {
            order.apply(mode.compare(&a.0.to_value(), &b.0.to_value()))
        });
        Collection::from_array(pairs.into_iter().collect())
    }

    /// Sort ascending by value in natural order, keeping keys.
    ///
    /// With `case_insensitive`, `"anti"` sorts before `"Auto"`; without it
    /// every upper-case initial sorts first.
    #[must_use]
    pub fn sort_natural(&self, case_insensitive: bool) -> Collection {
        let pairs = self.sorted_pairs(|a, b| {
            natural_cmp(&a.1.to_string(), &b.1.to_string(), case_insensitive)
        });
        Collection::from_array(pairs.into_iter().collect())
    }

    /// Sort by the value at `path`.
    #[must_use]
    pub fn sort_by(&self, path: impl Into<Path>, order: SortOrder) -> Collection {
        self.sort_by_paths(vec![path.into()], &[order])
    }

    /// Composite sort: compare by the first path, break ties with the next.
    ///
    /// `orders[i]` applies to `paths[i]`; missing orders default to
    /// ascending. Integer keys are renumbered from `0` in the new order;
    /// string keys are kept.
    #[must_use]
    pub fn sort_by_paths(&self, paths: Vec<Path>, orders: &[SortOrder]) -> Collection {
        let pairs = self.sorted_pairs(|a, b| {
            paths
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    let order = orders.get(i).copied().unwrap_or_default();
                    let x = get_value(&a.1, path, Value::Null);
                    let y = get_value(&b.1, path, Value::Null);
                    order.apply(x.loose_cmp(&y))
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        let mut out = Array::with_capacity(pairs.len());
        for (k, v) in pairs {
            match k {
                Key::Int(_) => {
                    out.push(v);
                }
                label => {
                    out.insert(label, v);
                }
            }
        }
        Collection::from_array(out)
    }
}
