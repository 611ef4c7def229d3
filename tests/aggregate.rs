use ironseq::combiners::{Count, Max, Min, Sum};
use ironseq::testing::fixtures::{sample_rows, Customer};
use ironseq::*;

fn customers(rows: &[(i64, i64)]) -> Collection {
    Collection::from_vec(
        rows.iter()
            .map(|&(id, age)| Value::from(Object::new(Customer::with_id(id, "Someone", age))))
            .collect(),
    )
}

#[test]
fn reduce_folds_with_initial_value() {
    let c = customers(&[(1, 0), (2, 0), (3, 0)]);
    let total = c.reduce(
        |acc, v, _| acc + get_value(v, &"id".into(), Value::Null).as_i64().unwrap_or(0),
        6,
    );
    assert_eq!(total, 12);
}

#[test]
fn sums_of_fields_and_plain_values() {
    let empty = Collection::from_vec(Vec::<Value>::new());
    assert_eq!(empty.sum_by("id"), Value::Int(0));
    assert_eq!(empty.sum_by("age"), Value::Int(0));

    let c = customers(&[(1, -2), (2, 2), (3, 42)]);
    assert_eq!(c.sum_by("id"), Value::Int(6));
    assert_eq!(c.sum_by("age"), Value::Int(42));

    assert_eq!(Collection::from_vec(vec![-2, 1, 3]).sum(), Value::Int(2));
    assert_eq!(
        Collection::from_vec(vec![Value::Int(1), Value::Float(0.5), Value::from("2")]).sum(),
        Value::Float(3.5)
    );
}

#[test]
fn min_and_max() {
    let empty = Collection::from_vec(Vec::<Value>::new());
    assert!(empty.min_by("id").is_null());
    assert!(empty.max().is_null());

    let c = customers(&[(1, -2), (2, 2), (3, 42)]);
    assert_eq!(c.min_by("id"), Value::Int(1));
    assert_eq!(c.min_by("age"), Value::Int(-2));
    assert_eq!(c.max_by("id"), Value::Int(3));
    assert_eq!(c.max_by("age"), Value::Int(42));

    let plain = Collection::from_vec(vec![-2, 1, 3]);
    assert_eq!(plain.min(), Value::Int(-2));
    assert_eq!(plain.max(), Value::Int(3));
}

#[test]
fn missing_fields_read_as_zero() {
    let rows = Collection::from_array(sample_rows());
    assert_eq!(rows.sum_by("weight"), Value::Int(0));
    assert_eq!(rows.max_by("weight"), Value::Int(0));
}

#[test]
fn builtin_combiners_through_combine() {
    let c = Collection::from_array(array![3, 1, 2]);
    assert_eq!(c.combine(Sum), Value::Int(6));
    assert_eq!(c.combine(Min), Value::Int(1));
    assert_eq!(c.combine(Max), Value::Int(3));
    assert_eq!(c.combine(Count), 3);
}

struct Joined;

impl CombineFn<Value, Vec<String>, String> for Joined {
    fn create(&self) -> Vec<String> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<String>, v: Value) {
        acc.push(v.to_string());
    }

    fn finish(&self, acc: Vec<String>) -> String {
        acc.join(",")
    }
}

#[test]
fn custom_combiner_over_a_path() {
    let rows = Collection::from_array(sample_rows());
    assert_eq!(rows.combine_by("age", Joined), "-2,2,42");
}

#[test]
fn count_and_is_empty() {
    let c = Collection::from_vec(vec!["a", "b"]);
    assert_eq!(c.count(), 2);
    assert!(!c.is_empty());
    assert!(Collection::new(Value::Null).unwrap().is_empty());
}

#[test]
fn unique_drops_strict_duplicates() {
    let c = Collection::from_vec(vec![Value::Int(1), Value::from("1"), Value::Int(1), Value::Int(2)]);
    let unique = c.unique();
    assert!(unique.can_restart());
    assert_eq!(
        unique.to_array().into_values(),
        vec![Value::Int(1), Value::from("1"), Value::Int(2)]
    );
}

#[test]
fn unique_handles_compound_values() {
    let shared = Object::new(Customer::with_id(1, "Ann", 30));
    let c = Collection::from_vec(vec![
        Value::from(array![1, 2]),
        Value::Float(0.0),
        Value::from(shared.clone()),
        Value::from(array![1, 2]),
        Value::Float(-0.0),
        Value::from(shared),
        Value::from(Object::new(Customer::with_id(1, "Ann", 30))),
        Value::Float(f64::NAN),
        Value::Float(f64::NAN),
    ]);
    let unique = c.unique().to_array().into_values();
    let kinds: Vec<String> = unique.iter().map(Value::type_name).collect();
    assert_eq!(kinds, vec!["array", "float", "Customer", "Customer", "float", "float"]);
}
