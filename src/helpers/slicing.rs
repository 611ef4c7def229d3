//! Positional helpers for [`Collection`]: reverse, slice and paginate.

use crate::collection::Collection;
use serde::{Deserialize, Serialize};

/// Page request for [`Collection::paginate`].
///
/// `page` is zero-based. When `page_size_limit` is set, the page size is
/// clamped into that inclusive range; without a limit, a page size below `1`
/// means "everything on one page".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: usize,
    pub page_size: i64,
    pub page_size_limit: Option<(i64, i64)>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 20,
            page_size_limit: Some((1, 50)),
        }
    }
}

impl Pagination {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn without_limit(mut self) -> Self {
        self.page_size_limit = None;
        self
    }

    /// Effective page size; `None` means unlimited.
    pub fn limit(&self) -> Option<usize> {
        let size = match self.page_size_limit {
            Some((min, max)) => self.page_size.clamp(min, max.max(min)),
            None => self.page_size,
        };
        usize::try_from(size).ok().filter(|s| *s > 0)
    }

    /// Index of the first element on the current page.
    pub fn offset(&self) -> usize {
        self.limit().map_or(0, |l| self.page.saturating_mul(l))
    }
}

impl Collection {
    /// Reverse the order, keeping keys.
    #[must_use]
    pub fn reverse(&self) -> Collection {
        let mut pairs = self.to_array().into_pairs();
        pairs.reverse();
        Collection::from_array(pairs.into_iter().collect())
    }

    /// `length` pairs starting at position `offset` (all remaining when
    /// `None`), keeping keys.
    #[must_use]
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Collection {
        let tail = self.to_array().into_iter().skip(offset);
        let picked = match length {
            Some(n) => tail.take(n).collect(),
            None => tail.collect(),
        };
        Collection::from_array(picked)
    }

    /// The current page of `pagination`, keyed `0..`.
    #[must_use]
    pub fn paginate(&self, pagination: &Pagination) -> Collection {
        let page = self.to_array().into_values().into_iter().skip(pagination.offset());
        let values: Vec<_> = match pagination.limit() {
            Some(n) => page.take(n).collect(),
            None => page.collect(),
        };
        Collection::from_vec(values)
    }
}
