//! Interfaces the batch layer consumes from an external record store.
//!
//! None of these are implemented by this crate outside of the test
//! fixtures in [`crate::testing`]. The batch layer only sequences calls
//! against them.

use crate::array::Array;
use crate::object::{Model, Object};
use crate::validation::ValidationError;
use crate::value::Value;

/// A persistable model.
///
/// Persistence methods return `Ok(false)` when the record declined the
/// operation (for example because validation failed) and `Err` when the
/// store itself failed.
pub trait Record: Model {
    fn table_name(&self) -> &str;

    /// Current primary key value, `Null` while unsaved.
    fn primary_key(&self) -> Value;

    /// Assign attributes by name. With `safe_only`, attributes that are not
    /// safe to mass-assign in the current scenario are ignored.
    fn set_attributes(&mut self, values: &Array, safe_only: bool);

    fn set_scenario(&mut self, scenario: &str);

    fn scenario(&self) -> &str;

    /// Run validation rules, limited to `attribute_names` when given.
    /// Replaces the previous errors.
    fn validate(&mut self, attribute_names: Option<&[String]>) -> bool;

    fn errors(&self) -> Vec<ValidationError> {
        Vec::new()
    }

    /// Whether the last validation left errors, optionally for one attribute.
    fn has_errors(&self, attribute: Option<&str>) -> bool {
        self.errors()
            .iter()
            .any(|e| attribute.is_none_or(|a| e.field.as_deref() == Some(a)))
    }

    fn save(&mut self, run_validation: bool, attribute_names: Option<&[String]>) -> anyhow::Result<bool>;

    fn update(&mut self, run_validation: bool, attribute_names: Option<&[String]>)
        -> anyhow::Result<bool>;

    fn delete(&mut self) -> anyhow::Result<bool>;

    /// Column values written by a bulk insert.
    fn insert_values(&self) -> Array {
        self.attributes()
    }

    /// Receives the primary key generated by a bulk insert.
    fn after_insert(&mut self, primary_key: Value) {
        let _ = primary_key;
    }
}

/// A store transaction. Consumed by either outcome.
pub trait Transaction {
    fn commit(self: Box<Self>) -> anyhow::Result<()>;
    fn rollback(self: Box<Self>) -> anyhow::Result<()>;
}

/// Handle to the record store.
pub trait Connection {
    fn begin_transaction(&self) -> anyhow::Result<Box<dyn Transaction>>;

    /// Insert `rows` (values in `columns` order) into `table` with one
    /// statement, returning the generated primary keys in row order.
    fn batch_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Value>],
    ) -> anyhow::Result<Vec<Value>>;
}

/// The query a model collection was loaded from.
pub trait Query {
    /// Run the query.
    fn all(&self) -> anyhow::Result<Vec<Object>>;

    /// Eager-load `relations` into already fetched `models`.
    fn find_with(&self, relations: &[String], models: &[Object]) -> anyhow::Result<()>;
}
