/// Tests for the whole-element and field-keyed orderers and reversal.
///
/// Elements are built from JSON literals so the cases read like the data
/// users feed the CLI.
use dtmpl_core::{reverse_values, sort_values, sort_values_by_field, Kind, OrderError, Value};
use serde_json::json;

fn seq(json: serde_json::Value) -> Vec<Value> {
    match Value::from(json) {
        Value::Sequence(items) => items,
        other => panic!("expected a sequence, got {:?}", other),
    }
}

fn field(items: &[Value], key: &str) -> Vec<Option<Value>> {
    items.iter().map(|item| item.get(key).cloned()).collect()
}

// ============================================================================
// sort_values
// ============================================================================

#[test]
fn sorts_strings_lexicographically() {
    let sorted = sort_values(&seq(json!(["c", "a", "b"]))).unwrap();
    assert_eq!(sorted, seq(json!(["a", "b", "c"])));
}

#[test]
fn sorts_signed_integers() {
    let sorted = sort_values(&seq(json!([3, -1, 2, 0]))).unwrap();
    assert_eq!(sorted, seq(json!([-1, 0, 2, 3])));
}

#[test]
fn sorts_floats() {
    let sorted = sort_values(&seq(json!([2.5, -0.5, 1.25]))).unwrap();
    assert_eq!(sorted, seq(json!([-0.5, 1.25, 2.5])));
}

#[test]
fn sorts_large_unsigned_integers() {
    let input = vec![Value::Uint(u64::MAX), Value::Uint(u64::MAX - 7)];
    let sorted = sort_values(&input).unwrap();
    assert_eq!(sorted, vec![Value::Uint(u64::MAX - 7), Value::Uint(u64::MAX)]);
}

#[test]
fn string_order_is_bytewise() {
    let sorted = sort_values(&seq(json!(["b", "B", "a", "é"]))).unwrap();
    assert_eq!(sorted, seq(json!(["B", "a", "b", "é"])));
}

#[test]
fn does_not_mutate_input() {
    let input = seq(json!([3, 1, 2]));
    let _ = sort_values(&input).unwrap();
    assert_eq!(input, seq(json!([3, 1, 2])));
}

#[test]
fn empty_and_single_sequences_pass_through() {
    assert!(sort_values::<Value>(&[]).unwrap().is_empty());
    assert_eq!(
        sort_values(&seq(json!([{"a": 1}]))).unwrap(),
        seq(json!([{"a": 1}]))
    );
}

#[test]
fn mixed_categories_fail() {
    let err = sort_values(&seq(json!([1, "a", 2]))).unwrap_err();
    assert!(matches!(err, OrderError::Incomparable { .. }));
}

#[test]
fn integers_and_floats_do_not_mix() {
    let err = sort_values(&seq(json!([1, 2.5]))).unwrap_err();
    assert_eq!(
        err,
        OrderError::Incomparable {
            left: Kind::Int,
            right: Kind::Float
        }
    );
}

#[test]
fn booleans_are_unordered() {
    let err = sort_values(&seq(json!([true, false]))).unwrap_err();
    assert_eq!(err, OrderError::Unordered(Kind::Bool));
}

#[test]
fn nested_values_are_unordered() {
    let err = sort_values(&seq(json!([[1], [0]]))).unwrap_err();
    assert_eq!(err, OrderError::Unordered(Kind::Sequence));
}

// ============================================================================
// sort_values_by_field
// ============================================================================

#[test]
fn sorts_mappings_by_numeric_field() {
    let sorted = sort_values_by_field(&seq(json!([{"n": 1}, {"n": 3}, {"n": 2}])), "n").unwrap();
    assert_eq!(
        field(&sorted, "n"),
        vec![Some(Value::Int(1)), Some(Value::Int(2)), Some(Value::Int(3))]
    );
}

#[test]
fn missing_key_sorts_first() {
    let input = seq(json!([{"n": 1, "id": "a"}, {"id": "b"}, {"n": -5, "id": "c"}]));
    let sorted = sort_values_by_field(&input, "n").unwrap();
    assert_eq!(
        field(&sorted, "id"),
        vec![
            Some(Value::from("b")),
            Some(Value::from("c")),
            Some(Value::from("a"))
        ]
    );
}

#[test]
fn missing_keys_keep_input_order() {
    let input = seq(json!([
        {"id": 1},
        {"id": 2, "k": "z"},
        {"id": 3},
        {"id": 4, "k": "a"},
        {"id": 5}
    ]));
    let sorted = sort_values_by_field(&input, "k").unwrap();
    assert_eq!(
        field(&sorted, "id"),
        [1, 3, 5, 4, 2].map(|i| Some(Value::Int(i))).to_vec()
    );
}

#[test]
fn equal_keys_keep_input_order() {
    let input = seq(json!([
        {"id": "first", "rank": 2},
        {"id": "second", "rank": 1},
        {"id": "third", "rank": 2},
        {"id": "fourth", "rank": 1}
    ]));
    let sorted = sort_values_by_field(&input, "rank").unwrap();
    assert_eq!(
        field(&sorted, "id"),
        ["second", "fourth", "first", "third"]
            .map(|s| Some(Value::from(s)))
            .to_vec()
    );
}

#[test]
fn layered_sorts_compose() {
    let input = seq(json!([
        {"last": "b", "first": "y"},
        {"last": "a", "first": "z"},
        {"last": "b", "first": "x"},
        {"last": "a", "first": "w"}
    ]));
    let by_first = sort_values_by_field(&input, "first").unwrap();
    let sorted = sort_values_by_field(&by_first, "last").unwrap();
    assert_eq!(
        field(&sorted, "first"),
        ["w", "z", "x", "y"].map(|s| Some(Value::from(s))).to_vec()
    );
}

#[test]
fn no_element_has_the_key() {
    let input = seq(json!([{"a": 2}, {"a": 1}]));
    assert_eq!(sort_values_by_field(&input, "b").unwrap(), input);
}

#[test]
fn non_mapping_element_fails() {
    let err = sort_values_by_field(&seq(json!([{"n": 1}, 7])), "n").unwrap_err();
    assert_eq!(
        err,
        OrderError::NotAMapping {
            index: 1,
            kind: Kind::Int
        }
    );
}

#[test]
fn single_non_mapping_still_fails() {
    let err = sort_values_by_field(&seq(json!(["x"])), "n").unwrap_err();
    assert!(matches!(err, OrderError::NotAMapping { index: 0, .. }));
}

#[test]
fn mixed_field_categories_fail() {
    let err = sort_values_by_field(&seq(json!([{"n": 1}, {"n": "1"}])), "n").unwrap_err();
    assert!(matches!(err, OrderError::Incomparable { .. }));
}

#[test]
fn null_field_is_present_but_unordered() {
    let err = sort_values_by_field(&seq(json!([{"n": null}, {"n": 1}])), "n").unwrap_err();
    assert_eq!(err, OrderError::Unordered(Kind::Null));
}

// ============================================================================
// reverse_values
// ============================================================================

#[test]
fn reverses_any_elements() {
    let input = seq(json!([1, "two", {"three": 3}, null]));
    assert_eq!(
        reverse_values(&input),
        seq(json!([null, {"three": 3}, "two", 1]))
    );
}

#[test]
fn reverse_of_empty_is_empty() {
    assert!(reverse_values::<Value>(&[]).is_empty());
}
