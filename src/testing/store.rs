//! In-memory record store for tests.
//!
//! [`MemoryStore`] keeps rows per table, generates integer primary keys, can
//! enforce NOT NULL columns and supports transactions by snapshotting its
//! state. Every store call is appended to an event log so tests can assert
//! the exact sequence of begin/commit/rollback and writes.

use crate::array::Array;
use crate::key::Key;
use crate::models::{Connection, Transaction};
use crate::value::Value;
use anyhow::{anyhow, bail};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
struct StoreState {
    tables: HashMap<String, BTreeMap<i64, Array>>,
    next_id: i64,
    required: Vec<(String, String)>,
    fail_rollback: bool,
}

/// Shared handle to an in-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
    events: Rc<RefCell<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes to `table` where `column` is null.
    pub fn with_required(self, table: &str, column: &str) -> Self {
        self.state
            .borrow_mut()
            .required
            .push((table.to_string(), column.to_string()));
        self
    }

    /// Make every rollback fail (the data is still restored).
    pub fn with_failing_rollback(self) -> Self {
        self.state.borrow_mut().fail_rollback = true;
        self
    }

    fn log(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    /// Store calls so far, e.g. `"begin"`, `"insert customers 1"`.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn check_required(state: &StoreState, table: &str, row: &Array) -> anyhow::Result<()> {
        for (t, column) in &state.required {
            if t == table && row.get(column.as_str()).is_none_or(Value::is_null) {
                bail!("integrity constraint violation: {table}.{column} cannot be null");
            }
        }
        Ok(())
    }

    /// Insert a row and return its generated id.
    pub fn insert_row(&self, table: &str, row: Array) -> anyhow::Result<i64> {
        let mut state = self.state.borrow_mut();
        Self::check_required(&state, table, &row)?;
        state.next_id += 1;
        let id = state.next_id;
        let mut stored = Array::with_capacity(row.len() + 1);
        stored.insert(Key::from("id"), Value::Int(id));
        for (k, v) in row {
            if k != Key::from("id") {
                stored.insert(k, v);
            }
        }
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .insert(id, stored);
        drop(state);
        self.log(format!("insert {table} {id}"));
        Ok(id)
    }

    /// Overwrite the given columns of an existing row.
    pub fn update_row(&self, table: &str, id: i64, values: &Array) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        let mut row = state
            .tables
            .get(table)
            .and_then(|rows| rows.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!("no row {id} in {table}"))?;
        for (k, v) in values.iter() {
            row.insert(k.clone(), v.clone());
        }
        Self::check_required(&state, table, &row)?;
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .insert(id, row);
        drop(state);
        self.log(format!("update {table} {id}"));
        Ok(())
    }

    /// Remove a row; `false` if it did not exist.
    pub fn delete_row(&self, table: &str, id: i64) -> bool {
        let removed = self
            .state
            .borrow_mut()
            .tables
            .get_mut(table)
            .and_then(|rows| rows.remove(&id))
            .is_some();
        self.log(format!("delete {table} {id}"));
        removed
    }

    pub fn row(&self, table: &str, id: i64) -> Option<Array> {
        self.state
            .borrow()
            .tables
            .get(table)
            .and_then(|rows| rows.get(&id))
            .cloned()
    }

    /// All rows of `table` ordered by id.
    pub fn rows(&self, table: &str) -> Vec<Array> {
        self.state
            .borrow()
            .tables
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Transaction over a [`MemoryStore`]; rollback restores the state seen at
/// begin.
pub struct MemoryTransaction {
    store: MemoryStore,
    snapshot: StoreState,
}

impl Transaction for MemoryTransaction {
    fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.store.log("commit");
        Ok(())
    }

    fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        let MemoryTransaction { store, snapshot } = *self;
        let fail = snapshot.fail_rollback;
        *store.state.borrow_mut() = snapshot;
        store.log("rollback");
        if fail {
            bail!("rollback failed");
        }
        Ok(())
    }
}

impl Connection for MemoryStore {
    fn begin_transaction(&self) -> anyhow::Result<Box<dyn Transaction>> {
        let snapshot = self.state.borrow().clone();
        self.log("begin");
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            snapshot,
        }))
    }

    fn batch_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Value>],
    ) -> anyhow::Result<Vec<Value>> {
        self.log(format!("batch_insert {table} {}", rows.len()));
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let array: Array = columns
                .iter()
                .zip(row)
                .map(|(c, v)| (Key::from(c.as_str()), v.clone()))
                .collect();
            ids.push(Value::Int(self.insert_row(table, array)?));
        }
        Ok(ids)
    }
}
