pub(crate) mod aggregate;
pub(crate) mod distinct;
pub(crate) mod grouping;
pub(crate) mod materialize;
pub(crate) mod slicing;
pub(crate) mod sorting;

// Only re-export the option types; the rest are `impl Collection` blocks
#[cfg(feature = "json")]
pub use materialize::JsonOptions;
pub use slicing::Pagination;
pub use sorting::{natural_cmp, CompareMode, SortOrder};
