//! Integration test: validate bridged documents end to end through the
//! public API, from the root schema down to nested leaves.

use jsonproc_core::{ProcessorError, ValidatorError};
use jsonproc_schema::{validate, SchemaRegistry};
use proptest::prelude::*;
use serde_json::{json, Value};

fn violated_keyword(err: &ProcessorError) -> Option<&'static str> {
    err.as_validator().and_then(|e| e.keyword())
}

fn number_array() -> Value {
    json!({"type": "array", "items": {"type": "number"}})
}

#[test]
fn scalar_promoted_to_single_element_array() {
    assert_eq!(validate("root", json!(45), &number_array()).unwrap(), json!([45]));
    assert_eq!(validate("root", json!("45"), &number_array()).unwrap(), json!([45]));
}

#[test]
fn item_count_bounds_are_inclusive() {
    let schema = json!({"type": "array", "minItems": 2, "maxItems": 3});
    assert!(validate("root", json!([1, 2]), &schema).is_ok());
    assert!(validate("root", json!([1, 2, 3]), &schema).is_ok());

    let err = validate("root", json!([1]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("minItems"));
    assert!(err.to_string().contains("at least 2"));

    let err = validate("root", json!([1, 2, 3, 4]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("maxItems"));
    assert!(err.to_string().contains("at most 3"));
}

#[test]
fn unique_items() {
    let schema = json!({"type": "array", "uniqueItems": true});
    assert!(validate("root", json!([1, 2, 3]), &schema).is_ok());
    let err = validate("root", json!([1, 2, 2]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("uniqueItems"));
}

#[test]
fn tuple_dispatch_and_additional_items() {
    let tuple = json!([{"type": "boolean"}, {"type": "number"}]);

    let open = json!({"type": "array", "items": tuple});
    assert_eq!(validate("root", json!(["true", "3"]), &open).unwrap(), json!([true, 3]));
    assert_eq!(
        validate("root", json!(["true", "3", "extra"]), &open).unwrap(),
        json!([true, 3, "extra"])
    );

    let closed = json!({"type": "array", "items": tuple, "additionalItems": false});
    let err = validate("root", json!(["true", "3", "extra"]), &closed).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("additionalItems"));
    assert!(err.to_string().contains("more items than allowed"));

    let typed = json!({
        "type": "array",
        "items": [{"type": "boolean"}],
        "additionalItems": {"type": "number"}
    });
    assert_eq!(
        validate("root", json!(["true", "4", "5"]), &typed).unwrap(),
        json!([true, 4, 5])
    );
    assert!(validate("root", json!(["true", "4", "five"]), &typed).is_err());
}

#[test]
fn null_items_discard_scalars() {
    let schema = json!({"type": "array", "items": {"type": "null"}});
    assert_eq!(
        validate("root", json!([1, "x", true]), &schema).unwrap(),
        json!([null, null, null])
    );
}

#[test]
fn deep_failure_surfaces_unchanged() {
    let schema = json!({
        "type": "object",
        "properties": {
            "orders": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "lines": {"type": "array", "items": {"type": "integer"}}
                    }
                }
            }
        }
    });
    let doc = json!({"orders": [{"lines": ["1", "2"]}, {"lines": ["3", "4.5"]}]});
    let err = validate("doc", doc, &schema).unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::Validator(ValidatorError::Coercion { target: "integer", ref value }) if value == "4.5"
    ));

    let ok = json!({"orders": [{"lines": "7"}, {"lines": ["8"]}]});
    assert_eq!(
        validate("doc", ok, &schema).unwrap(),
        json!({"orders": [{"lines": [7]}, {"lines": [8]}]})
    );
}

#[test]
fn bridged_order_document() {
    let schema = json!({
        "type": "object",
        "required": ["id", "lines"],
        "additionalProperties": false,
        "properties": {
            "id": {"type": "integer", "minimum": 1},
            "rush": {"type": "boolean"},
            "customer": {"type": "string", "minLength": 1},
            "comment": {"type": "null"},
            "lines": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["sku"],
                    "properties": {
                        "sku": {"type": "string", "pattern": "^[A-Z]{3}-\\d+$"},
                        "qty": {"type": "integer", "minimum": 1},
                        "price": {"type": "number", "exclusiveMinimum": 0}
                    }
                }
            }
        }
    });
    let doc = json!({
        "id": "1001",
        "rush": "TRUE",
        "customer": "Acme",
        "comment": "",
        "lines": {"sku": "ABC-1", "qty": "2", "price": "9.5"}
    });
    let expected = json!({
        "id": 1001,
        "rush": true,
        "customer": "Acme",
        "comment": null,
        "lines": [{"sku": "ABC-1", "qty": 2, "price": 9.5}]
    });
    let validated = validate("order", doc, &schema).unwrap();
    assert_eq!(validated, expected);
    assert_eq!(validate("order", validated, &schema).unwrap(), expected);
}

#[test]
fn schema_errors_are_distinguished() {
    let cases = [
        json!({"type": "array", "minItems": -1}),
        json!({"type": "array", "items": 5}),
        json!({"type": "array", "items": {"minimum": 0}}),
        json!({"type": "widget"}),
        json!({"type": "array", "additionalItems": "{broken"}),
    ];
    for schema in cases {
        let err = validate("root", json!([1]), &schema).unwrap_err();
        assert!(err.is_schema_error(), "{schema} produced {err}");
    }
    let err = validate("root", json!([1, 1]), &json!({"type": "array", "uniqueItems": true}))
        .unwrap_err();
    assert!(!err.is_schema_error());
}

#[test]
fn single_quoted_keyword_values() {
    let schema = json!({"type": "'array'", "minItems": "'2'", "items": {"type": "'number'"}});
    let err = validate("root", json!([1]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("minItems"));
    assert_eq!(validate("root", json!(["1", "2"]), &schema).unwrap(), json!([1, 2]));
    assert_eq!(validate("n", json!("3"), &json!({"type": "'number'"})).unwrap(), json!(3));
}

#[test]
fn integral_float_counts() {
    let schema = json!({"type": "array", "minItems": 2.0, "maxItems": "3.0"});
    assert!(validate("root", json!([1, 2]), &schema).is_ok());
    let err = validate("root", json!([1]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("minItems"));
}

#[test]
fn large_integer_bounds_are_exact() {
    let schema = json!({"type": "integer", "maximum": 9_007_199_254_740_992_u64});
    assert_eq!(
        validate("n", json!("9007199254740992"), &schema).unwrap(),
        json!(9_007_199_254_740_992_u64)
    );
    let err = validate("n", json!("9007199254740993"), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("maximum"));
}

#[test]
fn unique_items_equates_large_float_and_integer() {
    let schema = json!({"type": "array", "uniqueItems": true});
    let err = validate("root", json!([1e19, 10_000_000_000_000_000_000_u64]), &schema).unwrap_err();
    assert_eq!(violated_keyword(&err), Some("uniqueItems"));
}

#[test]
fn registry_validates_by_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tags.schema.yaml"),
        "type: array\nuniqueItems: true\nitems:\n  type: string\n",
    )
    .unwrap();
    let registry = SchemaRegistry::new(dir.path()).unwrap();
    assert_eq!(
        registry.validate("tags.schema.yaml", "tags", json!("solo")).unwrap(),
        json!(["solo"])
    );
    assert!(registry
        .validate("tags.schema.yaml", "tags", json!(["a", "a"]))
        .is_err());
}

proptest! {
    #[test]
    fn typed_integer_arrays_are_fixed_points(items in proptest::collection::vec(any::<i64>(), 0..16)) {
        let input = json!(items);
        let out = validate("root", input.clone(), &number_array()).unwrap();
        prop_assert_eq!(out, input);
    }

    #[test]
    fn textual_integers_are_coerced_in_place(items in proptest::collection::vec(any::<i32>(), 0..16)) {
        let text: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        let out = validate("root", json!(text), &number_array()).unwrap();
        prop_assert_eq!(out, json!(items));
    }

    #[test]
    fn tuple_with_open_tail_preserves_length(
        head in any::<bool>(),
        tail in proptest::collection::vec("[a-z]{0,6}", 0..8),
    ) {
        let schema = json!({"type": "array", "items": [{"type": "boolean"}]});
        let mut input = vec![json!(head.to_string())];
        input.extend(tail.iter().map(|s| json!(s)));
        let len = input.len();
        let out = validate("root", Value::Array(input), &schema).unwrap();
        let out = out.as_array().unwrap();
        prop_assert_eq!(out.len(), len);
        prop_assert_eq!(&out[0], &json!(head));
    }

    #[test]
    fn string_arrays_are_fixed_points(items in proptest::collection::vec("[a-zA-Z0-9 ]{0,10}", 0..10)) {
        let schema = json!({"type": "array", "items": {"type": "string"}});
        let input = json!(items);
        prop_assert_eq!(validate("root", input.clone(), &schema).unwrap(), input);
    }
}
