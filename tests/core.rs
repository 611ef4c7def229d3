use ironseq::testing::fixtures::Customer;
use ironseq::testing::*;
use ironseq::*;
use std::cell::Cell;
use std::rc::Rc;

fn customers(rows: &[(i64, i64)]) -> Vec<Value> {
    rows.iter()
        .map(|&(id, age)| Value::from(Object::new(Customer::with_id(id, "Someone", age))))
        .collect()
}

fn id_of(v: &Value) -> i64 {
    get_value(v, &"id".into(), Value::Null).as_i64().unwrap_or(-1)
}

fn mixed_keys() -> Array {
    array! { 0 => "a", "b" => "c", 1 => "test" }
}

#[test]
fn iterates_models_with_sequential_keys() -> anyhow::Result<()> {
    let c = Collection::new(customers(&[(1, 0), (2, 0), (3, 0)]))?;
    let seen: Vec<(Key, i64)> = c.iter().map(|(k, v)| (k, id_of(&v))).collect();
    assert_collections_equal(
        &seen,
        &[(Key::Int(0), 1), (Key::Int(1), 2), (Key::Int(2), 3)],
    );
    // array-backed collections restart
    assert_eq!(c.iter().count(), 3);
    Ok(())
}

#[test]
fn scalar_sources_become_single_element_collections() -> anyhow::Result<()> {
    assert_arrays_equal(&Collection::new("foo")?.to_array(), &array!["foo"]);
    assert_arrays_equal(&Collection::new(123)?.to_array(), &array![123]);
    assert!(Collection::new(Value::Null)?.to_array().is_empty());
    Ok(())
}

#[test]
fn model_source_yields_its_attributes() -> anyhow::Result<()> {
    let customer = Object::new(Customer::with_id(1, "foo", 15));
    let c = Collection::new(customer.clone())?;
    assert_arrays_equal(&c.to_array(), &customer.attributes());
    Ok(())
}

#[test]
fn collection_source_copies_contents() -> anyhow::Result<()> {
    let first = Collection::new(customers(&[(1, 0), (2, 0)]))?;
    let second = Collection::new(&first)?;
    assert_arrays_equal(&second.to_array(), &first.to_array());
    Ok(())
}

#[test]
fn map_keeps_keys() -> anyhow::Result<()> {
    let c = Collection::new(customers(&[(1, 0), (2, 0), (3, 0)]))?;
    assert_arrays_equal(&c.map(|v, _| id_of(v)).to_array(), &array![1, 2, 3]);
    Ok(())
}

#[test]
fn flat_map_flattens_nested_results() {
    let c = Collection::from_vec(vec![
        Value::from(vec![1]),
        Value::from(vec![2, 3]),
        Value::from(vec![4, 5]),
    ]);
    assert_arrays_equal(&c.flat_map(|v, _| v.clone()).to_array(), &array![1, 2, 3, 4, 5]);
}

#[test]
fn filter_sees_values_and_keys() -> anyhow::Result<()> {
    let c = Collection::new(customers(&[(1, 0), (2, 0), (3, 0)]))?;
    let only_two = c.filter(|v, _| id_of(v) == 2).map(|v, _| id_of(v));
    assert_arrays_equal(&only_two.to_array(), &array! { 1 => 2 });

    let two_or_key_two = c
        .filter(|v, k| id_of(v) == 2 || *k == Key::Int(2))
        .map(|v, _| id_of(v));
    assert_arrays_equal(&two_or_key_two.to_array(), &array! { 1 => 2, 2 => 3 });
    Ok(())
}

#[test]
fn each_stops_after_the_first_false() {
    let c = Collection::from_vec(vec![1, 2, 3, 4, 5]);
    let (a, b) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let (counter, summed) = (Rc::clone(&a), Rc::clone(&b));

    let passed = c
        .each(move |_, _| counter.set(counter.get() + 1), false)
        .each(
            move |v, _| {
                let n = v.as_i64().unwrap_or(0);
                if n > 3 {
                    return false;
                }
                summed.set(summed.get() + n);
                true
            },
            true,
        )
        .count();

    // the stopping pair itself still passes through
    assert_eq!(passed, 4);
    assert_eq!(a.get(), 4);
    assert_eq!(b.get(), 6);
    assert_values_equal(&c, vec![1, 2, 3, 4, 5]);
}

#[test]
fn keys_values_and_flip() {
    let c = Collection::from_array(mixed_keys());
    assert_values_equal(&c.keys(), vec![Value::Int(0), Value::from("b"), Value::Int(1)]);
    assert_values_equal(&c.values(), vec!["a", "c", "test"]);
    assert_arrays_equal(
        &c.flip().to_array(),
        &array! { "a" => 0, "c" => "b", "test" => 1 },
    );
}

#[test]
fn column_reads_each_element() {
    let rows = Collection::new(array![
        array! { "a" => 1, "b" => 2 },
        array! { "a" => 5, "b" => 10 },
        array! { "a" => 3, "b" => 2 },
    ])
    .unwrap();
    assert_arrays_equal(&rows.column("a", false).to_array(), &array![1, 5, 3]);

    let flat = Collection::from_array(array! { "a" => 1, "b" => 2 });
    assert_arrays_equal(
        &flat.column("a", false).to_array(),
        &array![Value::Null, Value::Null],
    );
    assert_arrays_equal(
        &flat.column("a", true).to_array(),
        &array! { "a" => Value::Null, "b" => Value::Null },
    );
}

#[test]
fn remap_by_path_and_by_function() -> anyhow::Result<()> {
    let c = Collection::new(customers(&[(1, -2), (2, 2), (3, 42)]))?;
    assert_arrays_equal(
        &c.remap("id", "age").to_array(),
        &array! { 1 => -2, 2 => 2, 3 => 42 },
    );

    let age_of = |v: &Value| get_value(v, &"age".into(), Value::Null);
    let joined = Path::func(move |v| Value::from(format!("{}{}", id_of(v), age_of(v))));
    let summed = Path::func(move |v| Value::Int(id_of(v)).add(&age_of(v)));
    assert_arrays_equal(
        &c.remap(joined, summed).to_array(),
        &array! { "1-2" => -1, 22 => 4, 342 => 45 },
    );

    assert_arrays_equal(
        &Collection::from_array(fixtures::sample_rows()).pluck("id", "age").to_array(),
        &array! { 1 => -2, 2 => 2, 3 => 42 },
    );
    Ok(())
}

#[test]
fn index_by_rekeys_with_last_wins() -> anyhow::Result<()> {
    let models = customers(&[(1, -2), (2, 2), (3, 42)]);
    let c = Collection::new(models.clone())?;
    let indexed = c.index_by("id").to_array();
    assert_eq!(indexed.len(), 3);
    for (k, v) in indexed.iter() {
        assert_eq!(k.as_int(), Some(id_of(v)));
    }
    assert_eq!(indexed.get(2), Some(&models[1]));

    let by_age = Collection::new(customers(&[(1, 7), (2, 7)]))?.index_by("age").to_array();
    assert_eq!(by_age.len(), 1);
    assert_eq!(by_age.get(7).map(id_of), Some(2));
    Ok(())
}

#[test]
fn merge_concatenates_sources() -> anyhow::Result<()> {
    let letters = Collection::from_vec(vec!["a", "b", "c"]);
    let numbers = Collection::from_vec(vec![1, 2, 3]);

    assert_values_equal(
        &letters.merge(&numbers)?.values(),
        vec![Value::from("a"), "b".into(), "c".into(), 1.into(), 2.into(), 3.into()],
    );
    assert_values_equal(
        &numbers.merge(vec!["a", "b", "c"])?.values(),
        vec![Value::from(1), 2.into(), 3.into(), "a".into(), "b".into(), "c".into()],
    );

    // keys are concatenated as emitted, so materializing keeps the tail
    assert_arrays_equal(&letters.merge(&numbers)?.to_array(), &array![1, 2, 3]);
    Ok(())
}

#[test]
fn merge_rejects_non_iterables() {
    let c = Collection::from_vec(vec!["a", "b", "c"]);
    let err = c.merge("string").unwrap_err();
    assert!(matches!(err, CollectionError::InvalidInput(_)));
}

#[test]
fn contains_strict_and_loose() {
    let c = Collection::from_vec(vec![1, 2, 3, 4, 5, 6]);
    assert!(c.contains(1, false));
    assert!(c.contains("1", false));
    assert!(c.contains(1, true));
    assert!(!c.contains("1", true));

    assert!(!c.contains(8, false));
    assert!(!c.contains("8", false));
    assert!(!c.contains(8, true));
    assert!(!c.contains("8", true));

    assert!(!c.contains_where(|v, _| v.as_i64().unwrap_or(0) > 6));
    assert!(c.contains_where(|v, _| v.as_i64().unwrap_or(0) > 5));
}

#[test]
fn remove_strict_and_loose() {
    let c = Collection::from_vec(vec![1, 2, 3, 4, 5, 6]);
    assert_values_equal(&c.remove(3, false).values(), vec![1, 2, 4, 5, 6]);
    assert_values_equal(&c.remove("3", false).values(), vec![1, 2, 4, 5, 6]);
    assert_values_equal(&c.remove(3, true).values(), vec![1, 2, 4, 5, 6]);
    assert_values_equal(&c.remove("3", true), vec![1, 2, 3, 4, 5, 6]);
    assert_values_equal(&c.remove(7, false), vec![1, 2, 3, 4, 5, 6]);
    assert_values_equal(&c.remove("7", true), vec![1, 2, 3, 4, 5, 6]);

    assert_arrays_equal(
        &c.remove_where(|v, _| v.as_i64().unwrap_or(0) > 3).to_array(),
        &array![1, 2, 3],
    );
}

#[test]
fn replace_strict_and_loose() {
    let c = Collection::from_vec(vec![1, 2, 3, 4, 3, 6]);
    assert_values_equal(&c.replace(3, 9, false), vec![1, 2, 9, 4, 9, 6]);
    assert_values_equal(&c.replace("3", 9, false), vec![1, 2, 9, 4, 9, 6]);
    assert_values_equal(&c.replace(3, 9, true), vec![1, 2, 9, 4, 9, 6]);
    assert_values_equal(&c.replace("3", 9, true), vec![1, 2, 3, 4, 3, 6]);
    assert_values_equal(&c.replace(7, 9, false), vec![1, 2, 3, 4, 3, 6]);
    assert_values_equal(&c.replace("7", 9, true), vec![1, 2, 3, 4, 3, 6]);
}

#[test]
fn collapse_flattens_recursively() -> anyhow::Result<()> {
    let nested = Collection::new(array![
        array![1],
        array![2, 3],
        array![4, array![5]],
    ])?;
    assert_arrays_equal(&nested.collapse().to_array(), &array![1, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn collapse_expands_models_into_attributes() {
    let c = Collection::from_vec(vec![
        Value::from(Object::new(Customer::with_id(1, "Ann", 30))),
        Value::from("tail"),
    ]);
    assert_values_equal(&c.collapse(), vec![Value::Int(1), "Ann".into(), 30.into(), "tail".into()]);
}
