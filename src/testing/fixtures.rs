//! Pre-built models and datasets for tests.
//!
//! - [`Customer`]: `id`, `name`, `age`; names need at least 3 characters,
//!   ages must be within `0..=150` (and at least 18 in the `"adult"`
//!   scenario). Only `name` and `age` are safe to mass-assign.
//! - [`Product`]: `id`, `name`, `cost`; the store created by
//!   [`product_store`] rejects products without a cost.
//! - [`CustomerQuery`]: loads every stored customer.

use crate::array::Array;
use crate::key::Key;
use crate::object::Model;
use crate::validation::{combine_validations, validators, ValidationError};
use crate::value::Value;
use crate::array;

#[cfg(feature = "models")]
use super::store::MemoryStore;
#[cfg(feature = "models")]
use crate::models::{Query, Record};
#[cfg(feature = "models")]
use crate::object::Object;
#[cfg(feature = "models")]
use anyhow::anyhow;

fn value_to_i64(v: &Value) -> i64 {
    match v {
        Value::Int(i) => *i,
        other => other.to_number().map_or(0, |n| n.as_f64() as i64),
    }
}

fn keep_named(attributes: Array, names: Option<&[String]>) -> Array {
    match names {
        None => attributes,
        Some(names) => attributes
            .into_iter()
            .filter(|(k, _)| names.iter().any(|n| *n == k.to_string()))
            .collect(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub age: i64,
    scenario: String,
    errors: Vec<ValidationError>,
    relations: Vec<String>,
    #[cfg(feature = "models")]
    store: Option<MemoryStore>,
}

impl Customer {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            ..Self::default()
        }
    }

    pub fn with_id(id: i64, name: &str, age: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, age)
        }
    }

    /// Relations loaded through [`CustomerQuery`].
    pub fn loaded_relations(&self) -> &[String] {
        &self.relations
    }

    fn check(&self) -> Vec<ValidationError> {
        let min_age = if self.scenario == "adult" { 18 } else { 0 };
        match combine_validations(vec![
            validators::min_length("name", &self.name, 3),
            validators::in_range("age", self.age, min_age, 150),
        ]) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        }
    }
}

impl Model for Customer {
    fn attributes(&self) -> Array {
        array! {
            "id" => self.id,
            "name" => self.name.as_str(),
            "age" => self.age,
        }
    }
}

/// Customers 1 to 3 aged 2, 2 and 42.
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::with_id(1, "Alice", 2),
        Customer::with_id(2, "Bob", 2),
        Customer::with_id(3, "Carol", 42),
    ]
}

/// Rows of `{id, age}` arrays keyed by id: `{1: {id: 1, age: -2}, ...}`.
pub fn sample_rows() -> Array {
    [(1, -2), (2, 2), (3, 42)]
        .into_iter()
        .map(|(id, age)| (Key::Int(id), Value::from(array! { "id" => id, "age" => age })))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub cost: Option<f64>,
    #[cfg(feature = "models")]
    store: Option<MemoryStore>,
}

impl Product {
    pub fn new(name: &str, cost: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            cost,
            ..Self::default()
        }
    }
}

impl Model for Product {
    fn attributes(&self) -> Array {
        array! {
            "id" => self.id,
            "name" => self.name.as_str(),
            "cost" => self.cost,
        }
    }
}

#[cfg(feature = "models")]
fn attached(store: &Option<MemoryStore>, what: &str) -> anyhow::Result<MemoryStore> {
    store
        .clone()
        .ok_or_else(|| anyhow!("{what} is not attached to a store"))
}

/// A store whose `products.cost` column is NOT NULL.
#[cfg(feature = "models")]
pub fn product_store() -> MemoryStore {
    MemoryStore::new().with_required("products", "cost")
}

#[cfg(feature = "models")]
impl Customer {
    pub fn attach(mut self, store: &MemoryStore) -> Self {
        self.store = Some(store.clone());
        self
    }
}

#[cfg(feature = "models")]
impl Record for Customer {
    fn table_name(&self) -> &str {
        "customers"
    }

    fn primary_key(&self) -> Value {
        self.id.into()
    }

    fn set_attributes(&mut self, values: &Array, safe_only: bool) {
        for (k, v) in values.iter() {
            match k.to_string().as_str() {
                "name" => self.name = v.to_string(),
                "age" => self.age = value_to_i64(v),
                "id" if !safe_only => self.id = v.as_i64(),
                _ => {}
            }
        }
    }

    fn set_scenario(&mut self, scenario: &str) {
        self.scenario = scenario.to_string();
    }

    fn scenario(&self) -> &str {
        &self.scenario
    }

    fn validate(&mut self, attribute_names: Option<&[String]>) -> bool {
        self.errors = self
            .check()
            .into_iter()
            .filter(|e| {
                attribute_names.is_none_or(|names| {
                    e.field.as_ref().is_some_and(|f| names.contains(f))
                })
            })
            .collect();
        self.errors.is_empty()
    }

    fn errors(&self) -> Vec<ValidationError> {
        self.errors.clone()
    }

    fn save(&mut self, run_validation: bool, attribute_names: Option<&[String]>) -> anyhow::Result<bool> {
        if self.id.is_some() {
            return self.update(run_validation, attribute_names);
        }
        if run_validation && !self.validate(attribute_names) {
            return Ok(false);
        }
        let store = attached(&self.store, "customer")?;
        self.id = Some(store.insert_row("customers", self.insert_values())?);
        Ok(true)
    }

    fn update(&mut self, run_validation: bool, attribute_names: Option<&[String]>) -> anyhow::Result<bool> {
        let id = self
            .id
            .ok_or_else(|| anyhow!("customer {} was never saved", self.name))?;
        if run_validation && !self.validate(attribute_names) {
            return Ok(false);
        }
        let store = attached(&self.store, "customer")?;
        store.update_row("customers", id, &keep_named(self.insert_values(), attribute_names))?;
        Ok(true)
    }

    fn delete(&mut self) -> anyhow::Result<bool> {
        let Some(id) = self.id else {
            return Ok(false);
        };
        Ok(attached(&self.store, "customer")?.delete_row("customers", id))
    }

    fn insert_values(&self) -> Array {
        array! { "name" => self.name.as_str(), "age" => self.age }
    }

    fn after_insert(&mut self, primary_key: Value) {
        self.id = primary_key.as_i64();
    }
}

#[cfg(feature = "models")]
impl Product {
    pub fn attach(mut self, store: &MemoryStore) -> Self {
        self.store = Some(store.clone());
        self
    }
}

#[cfg(feature = "models")]
impl Record for Product {
    fn table_name(&self) -> &str {
        "products"
    }

    fn primary_key(&self) -> Value {
        self.id.into()
    }

    fn set_attributes(&mut self, values: &Array, _safe_only: bool) {
        for (k, v) in values.iter() {
            match k.to_string().as_str() {
                "name" => self.name = v.to_string(),
                "cost" => self.cost = v.as_f64(),
                _ => {}
            }
        }
    }

    fn set_scenario(&mut self, _scenario: &str) {}

    fn scenario(&self) -> &str {
        "default"
    }

    fn validate(&mut self, _attribute_names: Option<&[String]>) -> bool {
        true
    }

    fn save(&mut self, run_validation: bool, attribute_names: Option<&[String]>) -> anyhow::Result<bool> {
        let store = attached(&self.store, "product")?;
        match self.id {
            Some(id) => {
                if run_validation && !self.validate(attribute_names) {
                    return Ok(false);
                }
                store.update_row("products", id, &keep_named(self.insert_values(), attribute_names))?;
            }
            None => self.id = Some(store.insert_row("products", self.insert_values())?),
        }
        Ok(true)
    }

    fn update(&mut self, run_validation: bool, attribute_names: Option<&[String]>) -> anyhow::Result<bool> {
        if self.id.is_none() {
            return Err(anyhow!("product {} was never saved", self.name));
        }
        self.save(run_validation, attribute_names)
    }

    fn delete(&mut self) -> anyhow::Result<bool> {
        let Some(id) = self.id else {
            return Ok(false);
        };
        Ok(attached(&self.store, "product")?.delete_row("products", id))
    }

    fn insert_values(&self) -> Array {
        array! { "name" => self.name.as_str(), "cost" => self.cost }
    }

    fn after_insert(&mut self, primary_key: Value) {
        self.id = primary_key.as_i64();
    }
}

/// Query over the `customers` table of a [`MemoryStore`].
#[cfg(feature = "models")]
#[derive(Debug, Clone)]
pub struct CustomerQuery {
    store: MemoryStore,
}

#[cfg(feature = "models")]
impl CustomerQuery {
    pub fn new(store: &MemoryStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[cfg(feature = "models")]
impl Query for CustomerQuery {
    fn all(&self) -> anyhow::Result<Vec<Object>> {
        Ok(self
            .store
            .rows("customers")
            .iter()
            .map(|row| {
                let mut customer = Customer::default().attach(&self.store);
                customer.set_attributes(row, false);
                Object::new(customer)
            })
            .collect())
    }

    fn find_with(&self, relations: &[String], models: &[Object]) -> anyhow::Result<()> {
        for model in models {
            let mut customer = model
                .downcast_mut::<Customer>()
                .ok_or_else(|| anyhow!("expected a customer, found {}", model.type_name()))?;
            for relation in relations {
                if relation != "orders" {
                    return Err(anyhow!("customer has no relation named {relation}"));
                }
                if !customer.relations.contains(relation) {
                    customer.relations.push(relation.clone());
                }
            }
        }
        Ok(())
    }
}
