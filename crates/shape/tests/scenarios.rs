//! End-to-end parse scenarios over every schema kind.

use nebula_shape::prelude::*;
use nebula_shape::{ConstraintKind, Subject};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn parse(schema: &impl Parse, input: serde_json::Value) -> Result<serde_json::Value, ParseError> {
    schema.parse_json(&input).map(Value::into_json)
}

// ============================================================================
// NUMBERS AND STRINGS
// ============================================================================

#[rstest]
#[case(json!(2), true)]
#[case(json!(3), true)]
#[case(json!(50), true)]
#[case(json!(1.999), false)]
#[case(json!(100), false)]
fn bounded_number(#[case] input: serde_json::Value, #[case] ok: bool) {
    let schema = number().min(2.0).max(50.0);
    assert_eq!(schema.parse_json(&input).is_ok(), ok);
}

#[test]
fn number_above_max_reports_the_max_bound() {
    let err = number().min(2.0).max(50.0).parse(&Value::from(100)).unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::ConstraintViolation {
            subject: Subject::Number,
            constraint: ConstraintKind::Max,
            limit: 50.0,
            actual: 100.0,
        }
    );
}

#[rstest]
#[case(10, true)]
#[case(9, false)]
#[case(11, false)]
fn exact_string_length(#[case] len: usize, #[case] ok: bool) {
    let result = string().length(10).parse(&Value::from("x".repeat(len)));
    assert_eq!(result.is_ok(), ok);
    if let Err(err) = result {
        assert_eq!(err.kind.code(), "constraint_violation");
    }
}

#[test]
fn redeclared_bound_uses_last_value() {
    let schema = string().max(2).max(4);
    assert!(schema.parse(&Value::from("abcd")).is_ok());
    assert!(schema.parse(&Value::from("abcde")).is_err());
}

// ============================================================================
// COMPOSITES
// ============================================================================

#[test]
fn boolean_array() {
    let schema = array(boolean());
    assert_eq!(parse(&schema, json!([true, false])).unwrap(), json!([true, false]));

    let err = parse(&schema, json!([true, 1])).unwrap_err();
    assert_eq!(err.kind.code(), "type_mismatch");
    assert_eq!(err.path.segments(), [PathSegment::Index(1)]);
}

#[test]
fn string_number_tuple() {
    let schema = tuple![string(), number()];
    assert_eq!(parse(&schema, json!(["a", 1])).unwrap(), json!(["a", 1]));

    let err = parse(&schema, json!(["a"])).unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TupleLengthMismatch {
            expected: 2,
            received: 1
        }
    );
}

#[test]
fn flat_object() {
    let schema = object! { a: boolean(), b: number() };
    assert_eq!(
        parse(&schema, json!({"a": true, "b": 0})).unwrap(),
        json!({"a": true, "b": 0})
    );
}

#[rstest]
#[case(json!(true), json!(true))]
#[case(json!("s"), json!("s"))]
#[case(json!(4.5), json!(4.5))]
fn union_keeps_the_matching_candidate_value(
    #[case] input: serde_json::Value,
    #[case] expected: serde_json::Value,
) {
    let schema = union![string(), boolean(), number()];
    assert_eq!(parse(&schema, input).unwrap(), expected);
}

#[rstest]
#[case(json!(null))]
#[case(json!([]))]
#[case(json!({}))]
fn union_exhausted(#[case] input: serde_json::Value) {
    let err = parse(&union![string(), boolean(), number()], input).unwrap_err();
    assert_eq!(err.kind.code(), "union_exhausted");
    assert_eq!(err.total_error_count(), 4);
}

#[test]
fn merged_object_validates_against_the_right_side() {
    let merged = merge(&object! { a: string() }, &object! { a: number() });
    assert!(parse(&merged, json!({"a": 1})).is_ok());
    assert!(parse(&merged, json!({"a": "x"})).is_err());
}

#[test]
fn merged_object_drops_modifiers() {
    let merged = merge(&object! { a: string() }.optional(), &object! { b: number() });
    assert_eq!(
        merged.parse(&Value::Undefined).unwrap_err().kind,
        FailureKind::MissingOrUndefinedValue
    );
}

#[test]
fn deep_failure_path() {
    let schema = object! {
        config: object! {
            servers: array(object! { port: number().max(65535.0) }),
        },
    };
    let err = parse(
        &schema,
        json!({"config": {"servers": [{"port": 80}, {"port": 70000}]}}),
    )
    .unwrap_err();
    assert_eq!(err.path.to_string(), "config.servers[1].port");
}

#[test]
fn input_is_not_mutated() {
    let schema = object! { a: number().default(1) }.strip();
    let input = Value::from(json!({"extra": true}));
    let before = input.clone();
    let out = schema.parse(&input).unwrap();
    assert_eq!(input, before);
    assert_eq!(out.into_json(), json!({"a": 1}));
}

#[test]
fn schema_is_shareable_across_threads() {
    let schema = std::sync::Arc::new(array(number().min(0.0)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || schema.parse(&Value::from(vec![i, i + 1])).is_ok())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
