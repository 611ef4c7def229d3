#![cfg(feature = "json")]

use ironseq::testing::fixtures::Customer;
use ironseq::*;

#[test]
fn lists_encode_as_arrays() -> anyhow::Result<()> {
    let c = Collection::from_vec(vec![Value::Int(1), Value::from("two"), Value::Null, Value::Bool(true)]);
    assert_eq!(c.to_json(&JsonOptions::default())?, r#"[1,"two",null,true]"#);
    Ok(())
}

#[test]
fn keyed_arrays_encode_as_objects() -> anyhow::Result<()> {
    let c = Collection::from_array(array! { "a" => 1, 5 => array![1.5, 2.5] });
    assert_eq!(c.to_json(&JsonOptions::default())?, r#"{"a":1,"5":[1.5,2.5]}"#);

    // a list that no longer starts at zero is an object too
    let sliced = Collection::from_vec(vec![1, 2, 3]).slice(1, None);
    assert_eq!(sliced.to_json(&JsonOptions::default())?, r#"{"1":2,"2":3}"#);
    Ok(())
}

#[test]
fn models_encode_as_attributes() -> anyhow::Result<()> {
    let c = Collection::from_vec(vec![Object::new(Customer::with_id(7, "Ann", 30))]);
    assert_eq!(
        c.to_json(&JsonOptions::default())?,
        r#"[{"id":7,"name":"Ann","age":30}]"#
    );
    Ok(())
}

#[test]
fn escaping_options() -> anyhow::Result<()> {
    let c = Collection::from_vec(vec!["a/b", "café"]);
    assert_eq!(c.to_json(&JsonOptions::default())?, r#"["a/b","café"]"#);

    let escaped = JsonOptions {
        escape_slashes: true,
        escape_unicode: true,
        ..JsonOptions::default()
    };
    assert_eq!(c.to_json(&escaped)?, r#"["a\/b","caf\u00e9"]"#);
    Ok(())
}

#[test]
fn pretty_output() -> anyhow::Result<()> {
    let c = Collection::from_array(array! { "a" => 1 });
    assert_eq!(c.to_json(&JsonOptions::pretty())?, "{\n  \"a\": 1\n}");
    Ok(())
}

#[test]
fn single_pass_results_encode_once() -> anyhow::Result<()> {
    let doubled = Collection::from_vec(vec![1, 2]).map(|v, _| v.add(v));
    assert_eq!(doubled.to_json(&JsonOptions::default())?, "[2,4]");
    assert_eq!(doubled.to_json(&JsonOptions::default())?, "[]");
    Ok(())
}
