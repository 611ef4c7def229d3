use ironseq::testing::fixtures::Customer;
use ironseq::testing::*;
use ironseq::*;

fn keys_of(c: &Collection) -> Vec<Key> {
    c.to_array().keys().cloned().collect()
}

fn ids_of(c: &Collection) -> Vec<i64> {
    c.to_array()
        .values()
        .map(|v| get_value(v, &"id".into(), Value::Null).as_i64().unwrap_or(-1))
        .collect()
}

#[test]
fn sort_by_value_in_both_modes() {
    let c = Collection::from_vec(vec![4, 6, 5, 8, 11, 1]);
    assert_values_equal(
        &c.sort(SortOrder::Asc, CompareMode::Numeric),
        vec![1, 4, 5, 6, 8, 11],
    );
    assert_values_equal(
        &c.sort(SortOrder::Asc, CompareMode::Lexicographic),
        vec![1, 11, 4, 5, 6, 8],
    );
    assert_values_equal(
        &c.sort(SortOrder::Desc, CompareMode::Numeric),
        vec![11, 8, 6, 5, 4, 1],
    );
    assert_values_equal(
        &c.sort(SortOrder::Desc, CompareMode::Lexicographic),
        vec![8, 6, 5, 4, 11, 1],
    );
}

#[test]
fn sort_keeps_keys() {
    let c = Collection::from_vec(vec![30, 10, 20]);
    assert_eq!(
        keys_of(&c.sort(SortOrder::Asc, CompareMode::Numeric)),
        vec![Key::Int(1), Key::Int(2), Key::Int(0)]
    );
}

#[test]
fn sort_by_key_in_both_modes() {
    let c = Collection::from_array(array! { 5 => 4, 44 => 55, 55 => 44, 4 => 5 });
    let ints = |keys: [i64; 4]| keys.map(Key::Int).to_vec();

    let asc = c.sort_by_key(SortOrder::Asc, CompareMode::Numeric);
    assert_eq!(keys_of(&asc), ints([4, 5, 44, 55]));
    assert_values_equal(&asc, vec![5, 4, 55, 44]);

    assert_eq!(
        keys_of(&c.sort_by_key(SortOrder::Asc, CompareMode::Lexicographic)),
        ints([4, 44, 5, 55])
    );
    assert_eq!(
        keys_of(&c.sort_by_key(SortOrder::Desc, CompareMode::Numeric)),
        ints([55, 44, 5, 4])
    );
    assert_eq!(
        keys_of(&c.sort_by_key(SortOrder::Desc, CompareMode::Lexicographic)),
        ints([55, 5, 44, 4])
    );
}

#[test]
fn natural_sort_orders_digit_runs() {
    let c = Collection::from_vec(vec!["100.", "1.", "11.", "2."]);
    assert_values_equal(&c.sort_natural(true).values(), vec!["1.", "2.", "11.", "100."]);
    assert_values_equal(&c.sort_natural(false).values(), vec!["1.", "2.", "11.", "100."]);
}

#[test]
fn natural_sort_case_handling() {
    let c = Collection::from_vec(vec!["anti", "Auto", "Zett", "beta"]);
    assert_values_equal(&c.sort_natural(true).values(), vec!["anti", "Auto", "beta", "Zett"]);
    assert_values_equal(&c.sort_natural(false).values(), vec!["Auto", "Zett", "anti", "beta"]);
}

fn unordered_customers() -> Collection {
    Collection::from_array(
        [(2, 42), (1, 2), (3, 2)]
            .into_iter()
            .map(|(id, age)| {
                let customer = Object::new(Customer::with_id(id, "Someone", age));
                (Key::Int(id), Value::from(customer))
            })
            .collect(),
    )
}

#[test]
fn sort_by_single_path() {
    let c = unordered_customers();

    let by_id = c.sort_by("id", SortOrder::Asc);
    assert_eq!(ids_of(&by_id), vec![1, 2, 3]);
    // integer keys are renumbered
    assert_eq!(keys_of(&by_id), vec![Key::Int(0), Key::Int(1), Key::Int(2)]);

    assert_eq!(ids_of(&c.sort_by("id", SortOrder::Desc)), vec![3, 2, 1]);
}

#[test]
fn sort_by_several_paths() {
    let c = unordered_customers();
    let paths = || vec![Path::from("age"), Path::from("id")];

    assert_eq!(ids_of(&c.sort_by_paths(paths(), &[])), vec![1, 3, 2]);
    assert_eq!(
        ids_of(&c.sort_by_paths(paths(), &[SortOrder::Asc, SortOrder::Desc])),
        vec![3, 1, 2]
    );
}

#[test]
fn sort_by_keeps_string_keys() {
    let c = Collection::from_array(array! {
        "x" => array! { "n" => 2 },
        "y" => array! { "n" => 1 },
    });
    let sorted = c.sort_by("n", SortOrder::Asc);
    assert_eq!(keys_of(&sorted), vec![Key::from("y"), Key::from("x")]);
}

#[test]
fn sort_by_function_path() {
    let c = Collection::from_vec(vec!["ccc", "a", "bb"]);
    let len = Path::func(|v| Value::from(v.to_string().len()));
    assert_values_equal(&c.sort_by(len, SortOrder::Asc), vec!["a", "bb", "ccc"]);
}

#[test]
fn sorted_results_restart() {
    let c = Collection::from_vec(vec![3, 1, 2]).map(|v, _| v.clone());
    assert!(!c.can_restart());
    let sorted = c.sort(SortOrder::Asc, CompareMode::Numeric);
    assert!(sorted.can_restart());
    assert_eq!(sorted.count(), 3);
    assert_eq!(sorted.count(), 3);
}

#[test]
fn numeric_sort_ranks_mixed_kinds() {
    let cycle = [
        Value::Null,
        Value::Int(-1),
        Value::Int(0),
        Value::Int(9),
        Value::Int(10),
        Value::from("10a"),
        Value::from("abc"),
        Value::Int(3),
    ];
    let values: Vec<Value> = cycle.iter().cycle().take(60).cloned().collect();
    let sorted = Collection::from_vec(values)
        .sort(SortOrder::Asc, CompareMode::Numeric)
        .to_array()
        .into_values();

    assert_eq!(sorted.len(), 60);
    assert!(sorted.windows(2).all(|w| w[0].loose_cmp(&w[1]).is_le()));
    assert_eq!(sorted.first(), Some(&Value::Null));
    assert_eq!(sorted.last(), Some(&Value::from("abc")));

    let distinct = Collection::from_vec(cycle.to_vec()).sort(SortOrder::Asc, CompareMode::Numeric);
    assert_values_equal(&distinct, vec![
        Value::Null,
        Value::Int(-1),
        Value::Int(0),
        Value::Int(3),
        Value::Int(9),
        Value::Int(10),
        Value::from("10a"),
        Value::from("abc"),
    ]);
}

#[test]
fn rows_without_the_field_sort_first() {
    let rows = Collection::from_vec(vec![
        array! { "id" => 1, "score" => "n/a" },
        array! { "id" => 2 },
        array! { "id" => 3, "score" => 7 },
        array! { "id" => 4, "score" => "12" },
    ]);
    assert_eq!(ids_of(&rows.sort_by("score", SortOrder::Asc)), vec![2, 3, 4, 1]);
    assert_eq!(ids_of(&rows.sort_by("score", SortOrder::Desc)), vec![1, 4, 3, 2]);
}
