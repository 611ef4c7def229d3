use ironseq::testing::fixtures::sample_rows;
use ironseq::testing::*;
use ironseq::*;

fn bucket(groups: &Array, key: impl Into<Key>) -> Array {
    groups
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn rows() -> Collection {
    Collection::from_array(array! {
        1 => array! { "id" => 1, "age" => 2 },
        2 => array! { "id" => 2, "age" => 2 },
        3 => array! { "id" => 3, "age" => 42 },
    })
}

#[test]
fn group_by_preserving_keys() {
    let groups = rows().group_by("age", true).to_array();
    assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(2), Key::Int(42)]);

    let twos = bucket(&groups, 2);
    assert_eq!(twos.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(1), Key::Int(2)]);
    let forty_two = bucket(&groups, 42);
    assert_eq!(forty_two.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(3)]);
}

#[test]
fn group_by_without_keys() {
    let groups = rows().group_by("age", false).to_array();
    let twos = bucket(&groups, 2);
    assert_eq!(twos.keys().cloned().collect::<Vec<_>>(), vec![Key::Int(0), Key::Int(1)]);
    assert_eq!(
        twos.get(1).cloned(),
        Some(Value::from(array! { "id" => 2, "age" => 2 }))
    );
}

#[test]
fn group_by_unique_field_gives_singletons() {
    let groups = rows().group_by("id", true).to_array();
    assert_eq!(groups.len(), 3);
    for id in 1..=3i64 {
        let members = bucket(&groups, id);
        assert_eq!(members.len(), 1);
        assert!(members.contains_key(&Key::Int(id)));
    }
}

#[test]
fn nested_grouping() {
    let people = Collection::new(array![
        array! { "city" => "Oslo", "role" => "dev", "name" => "a" },
        array! { "city" => "Oslo", "role" => "ops", "name" => "b" },
        array! { "city" => "Rome", "role" => "dev", "name" => "c" },
        array! { "city" => "Oslo", "role" => "dev", "name" => "d" },
    ])
    .unwrap();
    let groups = people
        .group_by_paths(vec!["city".into(), "role".into()], false)
        .to_array();

    let oslo = bucket(&groups, "Oslo");
    let oslo_devs = bucket(&oslo, "dev");
    let names: Vec<Value> = oslo_devs
        .values()
        .map(|p| get_value(p, &"name".into(), Value::Null))
        .collect();
    assert_collections_equal(&names, &[Value::from("a"), Value::from("d")]);
    assert_eq!(bucket(&groups, "Rome").len(), 1);
}

#[test]
fn grouped_results_are_restartable() {
    let grouped = Collection::from_array(sample_rows()).group_by("age", true);
    assert!(grouped.can_restart());
    assert_eq!(grouped.count(), 3);
    assert_eq!(grouped.count(), 3);
}
