use super::record::{Connection, Query, Record};
use super::transaction::in_transaction;
use crate::array::Array;
use crate::collection::Collection;
use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::object::{short_type_name, Object};
use crate::source::Source;
use crate::validation::ErrorCollector;
use crate::value::Value;
use std::cell::RefMut;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

#[cfg(feature = "json")]
use crate::helpers::JsonOptions;

/// A collection of `R` records with batch persistence operations.
///
/// Every batch operation first materializes the collection and checks that
/// each element is an `R` object handle, failing with
/// [`CollectionError::InvalidValue`] at the first element that is not.
/// Operations that return a `ModelCollection` return a fresh re-startable
/// collection over the same handles.
pub struct ModelCollection<R: Record> {
    collection: Collection,
    query: Option<Rc<dyn Query>>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for ModelCollection<R> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            query: self.query.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for ModelCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCollection")
            .field("record", &short_type_name(std::any::type_name::<R>()))
            .field("collection", &self.collection)
            .field("has_query", &self.query.is_some())
            .finish()
    }
}

fn owned_names(names: Option<&[&str]>) -> Option<Vec<String>> {
    names.map(|n| n.iter().map(|s| s.to_string()).collect())
}

impl<R: Record> ModelCollection<R> {
    fn wrap(collection: Collection, query: Option<Rc<dyn Query>>) -> Self {
        Self {
            collection,
            query,
            _record: PhantomData,
        }
    }

    /// Wrap an existing source of record handles.
    ///
    /// A null source means "load from the query"; without a query it fails
    /// with [`CollectionError::InvalidOperation`]. Use
    /// [`from_query`](Self::from_query) to load.
    pub fn new(source: impl Into<Source>) -> Result<Self> {
        let source = source.into();
        if matches!(source, Source::Scalar(Value::Null)) {
            return Err(CollectionError::invalid_operation(
                "collection was not created from a query",
            ));
        }
        Ok(Self::wrap(Collection::new(source)?, None))
    }

    /// Wrap owned records, keyed `0..`.
    pub fn from_records(records: Vec<R>) -> Self {
        let values: Vec<Value> = records.into_iter().map(|r| Value::Object(Object::new(r))).collect();
        Self::wrap(Collection::from_vec(values), None)
    }

    /// Run `query` and wrap its results, keeping the query for
    /// [`reload`](Self::reload) and [`find_with`](Self::find_with).
    pub fn from_query(query: Rc<dyn Query>) -> anyhow::Result<Self> {
        let models = query.all()?;
        tracing::debug!(count = models.len(), "loaded models from query");
        Ok(Self::wrap(Collection::from_vec(models), Some(query)))
    }

    pub fn with_query(mut self, query: Rc<dyn Query>) -> Self {
        self.query = Some(query);
        self
    }

    pub fn query(&self) -> Option<&Rc<dyn Query>> {
        self.query.as_ref()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn into_collection(self) -> Collection {
        self.collection
    }

    /// Materialize and check that every element is an `R` handle.
    pub fn ensure_all(&self) -> Result<Vec<(Key, Object)>> {
        self.collection
            .to_array()
            .into_iter()
            .map(|(key, value)| match value {
                Value::Object(o) if o.is::<R>() => Ok((key, o)),
                other => Err(mismatch::<R>(key, &other)),
            })
            .collect()
    }

    /// The record handles in order.
    pub fn models(&self) -> Result<Vec<Object>> {
        Ok(self.ensure_all()?.into_iter().map(|(_, o)| o).collect())
    }

    fn record_mut<'a>(key: &Key, obj: &'a Object) -> Result<RefMut<'a, R>> {
        obj.downcast_mut::<R>()
            .ok_or_else(|| mismatch::<R>(key.clone(), &Value::Object(obj.clone())))
    }

    fn rebuilt(&self, items: &[(Key, Object)]) -> Self {
        let array: Array = items
            .iter()
            .map(|(k, o)| (k.clone(), Value::Object(o.clone())))
            .collect();
        Self::wrap(Collection::from_array(array), self.query.clone())
    }

    /// Save every record, inside a transaction on `conn` when given.
    ///
    /// A record that declines to save (for example because it failed
    /// validation) does not stop the batch; a store error does, rolling the
    /// transaction back and returning that error.
    pub fn save_all(
        &self,
        run_validation: bool,
        attribute_names: Option<&[&str]>,
        conn: Option<&dyn Connection>,
    ) -> anyhow::Result<Self> {
        let items = self.ensure_all()?;
        let names = owned_names(attribute_names);
        in_transaction(conn, "save_all", || {
            for (key, obj) in &items {
                let saved = Self::record_mut(key, obj)?.save(run_validation, names.as_deref())?;
                if !saved {
                    tracing::debug!(key = %key, "record not saved");
                }
            }
            Ok(())
        })?;
        Ok(self.rebuilt(&items))
    }

    /// Assign `attributes` to every record and update it, limited to the
    /// assigned attribute names. An empty `attributes` array writes no
    /// attributes at all; it never widens to a full update.
    pub fn update_all(
        &self,
        attributes: &Array,
        safe_only: bool,
        run_validation: bool,
        conn: Option<&dyn Connection>,
    ) -> anyhow::Result<Self> {
        let items = self.ensure_all()?;
        let names: Vec<String> = attributes.keys().map(|k| k.to_string()).collect();
        in_transaction(conn, "update_all", || {
            for (key, obj) in &items {
                let mut record = Self::record_mut(key, obj)?;
                record.set_attributes(attributes, safe_only);
                record.update(run_validation, Some(names.as_slice()))?;
            }
            Ok(())
        })?;
        Ok(self.rebuilt(&items))
    }

    /// Delete every record; returns each record's outcome under its key.
    pub fn delete_all(&self, conn: Option<&dyn Connection>) -> anyhow::Result<Collection> {
        let items = self.ensure_all()?;
        let outcomes = in_transaction(conn, "delete_all", || {
            let mut outcomes = Array::with_capacity(items.len());
            for (key, obj) in &items {
                let deleted = Self::record_mut(key, obj)?.delete()?;
                outcomes.insert(key.clone(), Value::Bool(deleted));
            }
            Ok(outcomes)
        })?;
        Ok(Collection::from_array(outcomes))
    }

    /// Validate every record; `true` only if all pass. Every record is
    /// validated, so each carries its own errors afterwards.
    pub fn validate_all(&self) -> Result<bool> {
        let mut all_valid = true;
        for (key, obj) in self.ensure_all()? {
            if !Self::record_mut(&key, &obj)?.validate(None) {
                all_valid = false;
            }
        }
        Ok(all_valid)
    }

    /// [`validate_all`](Self::validate_all), also recording each failing
    /// record's errors in `collector` under its key.
    pub fn validate_all_with(&self, collector: &mut ErrorCollector) -> Result<bool> {
        let mut all_valid = true;
        for (key, obj) in self.ensure_all()? {
            let mut record = Self::record_mut(&key, &obj)?;
            if !record.validate(None) {
                all_valid = false;
                collector.add_error(Some(key.to_string()), record.errors());
            }
        }
        Ok(all_valid)
    }

    /// Assign `attributes` to every record without saving.
    pub fn fill_all(&self, attributes: &Array, safe_only: bool) -> Result<Self> {
        let items = self.ensure_all()?;
        for (key, obj) in &items {
            Self::record_mut(key, obj)?.set_attributes(attributes, safe_only);
        }
        Ok(self.rebuilt(&items))
    }

    /// Set the scenario of every record.
    pub fn scenario(&self, scenario: &str) -> Result<Self> {
        let items = self.ensure_all()?;
        for (key, obj) in &items {
            Self::record_mut(key, obj)?.set_scenario(scenario);
        }
        Ok(self.rebuilt(&items))
    }

    /// Insert all records with a single bulk statement.
    ///
    /// With `run_validation`, records failing validation are skipped. The
    /// columns and table come from the first inserted record. Generated
    /// primary keys are handed to each record through
    /// [`Record::after_insert`] and returned under the records' keys.
    ///
    /// With `use_transaction`, the bulk statement and the key hand-off run
    /// inside one transaction on `conn`.
    pub fn insert_all(
        &self,
        conn: &dyn Connection,
        run_validation: bool,
        use_transaction: bool,
    ) -> anyhow::Result<Collection> {
        let mut table: Option<String> = None;
        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<Value>> = Vec::new();
        let mut inserted: Vec<(Key, Object)> = Vec::new();

        for (key, obj) in self.ensure_all()? {
            let row = {
                let mut record = Self::record_mut(&key, &obj)?;
                if run_validation && !record.validate(None) {
                    tracing::debug!(key = %key, "skipping invalid record");
                    continue;
                }
                let values = record.insert_values();
                if table.is_none() {
                    table = Some(record.table_name().to_string());
                    columns = values.keys().map(|k| k.to_string()).collect();
                }
                columns
                    .iter()
                    .map(|c| values.get(c.as_str()).cloned().unwrap_or_default())
                    .collect::<Vec<_>>()
            };
            rows.push(row);
            inserted.push((key, obj));
        }

        let Some(table) = table else {
            return Ok(Collection::from_array(Array::new()));
        };

        let keys = in_transaction(use_transaction.then_some(conn), "insert_all", || {
            tracing::debug!(table = %table, rows = rows.len(), "bulk insert");
            let generated = conn.batch_insert(&table, &columns, &rows)?;
            if generated.len() != rows.len() {
                return Err(CollectionError::invalid_operation(format!(
                    "store returned {} keys for {} rows",
                    generated.len(),
                    rows.len()
                ))
                .into());
            }
            let mut keys = Array::with_capacity(inserted.len());
            for ((key, obj), pk) in inserted.iter().zip(generated) {
                Self::record_mut(key, obj)?.after_insert(pk.clone());
                keys.insert(key.clone(), pk);
            }
            Ok(keys)
        })?;
        Ok(Collection::from_array(keys))
    }

    fn require_query(&self, op: &str) -> Result<&Rc<dyn Query>> {
        self.query.as_ref().ok_or_else(|| {
            CollectionError::invalid_operation(format!(
                "collection was not created from a query, so {op} is not possible"
            ))
        })
    }

    /// Run the originating query again.
    pub fn reload(&self) -> anyhow::Result<Self> {
        let query = Rc::clone(self.require_query("reload")?);
        Self::from_query(query)
    }

    /// Eager-load `relations` into the current records through the
    /// originating query.
    pub fn find_with(&self, relations: &[&str]) -> anyhow::Result<Self> {
        let query = self.require_query("find_with")?;
        let items = self.ensure_all()?;
        let models: Vec<Object> = items.iter().map(|(_, o)| o.clone()).collect();
        let relations: Vec<String> = relations.iter().map(|r| r.to_string()).collect();
        query.find_with(&relations, &models)?;
        Ok(self.rebuilt(&items))
    }

    /// Lazily export every record through [`Model::to_array`](crate::Model::to_array).
    /// Elements that are not objects pass through unchanged.
    pub fn to_array(&self, fields: &[&str], expand: &[&str], recursive: bool) -> Collection {
        let fields: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        let expand: Vec<String> = expand.iter().map(|s| s.to_string()).collect();
        self.collection.map(move |v, _| match v {
            Value::Object(o) => Value::Array(o.to_array(&fields, &expand, recursive)),
            other => other.clone(),
        })
    }

    /// JSON text of the exported records.
    #[cfg(feature = "json")]
    pub fn to_json(&self, opts: &JsonOptions) -> Result<String> {
        self.to_array(&[], &[], true).to_json(opts)
    }
}

fn mismatch<R: Record>(key: Key, found: &Value) -> CollectionError {
    CollectionError::invalid_value(
        key,
        short_type_name(std::any::type_name::<R>()),
        found.type_name(),
    )
}
