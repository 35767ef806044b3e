//! Statically typed parsing.

use nebula_shape::prelude::*;
use nebula_shape::typed::{self, Union2, Union3};
use nebula_shape::{ConstraintKind, Subject};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, PartialEq, Deserialize)]
struct Server {
    host: String,
    port: u16,
    tags: Vec<String>,
    tls: Option<bool>,
}

fn server_schema() -> Typed<Server> {
    typed::record(&object! {
        host: string().min(1),
        port: number().min(1.0).max(65535.0),
        tags: array(string()).default(Value::Array(vec![])),
        tls: boolean().optional(),
    })
}

#[test]
fn record_from_object() {
    let server = server_schema()
        .parse(&Value::from(json!({"host": "localhost", "port": 8080})))
        .unwrap();
    assert_eq!(
        server,
        Server {
            host: "localhost".into(),
            port: 8080,
            tags: vec![],
            tls: None,
        }
    );
}

#[test]
fn record_reports_schema_failures_before_conversion() {
    let err = server_schema()
        .parse(&Value::from(json!({"host": "", "port": 1})))
        .unwrap_err();
    assert_eq!(err.kind.code(), "constraint_violation");
    assert_eq!(err.path.to_string(), "host");
}

#[test]
fn nested_tuple_and_array() {
    let schema = typed::array(&typed::tuple((
        string().typed(),
        number().typed().nullable(),
    )));
    let out = schema
        .parse(&Value::from(json!([["a", 1], ["b", null]])))
        .unwrap();
    assert_eq!(out, vec![("a".to_string(), Some(1.0)), ("b".to_string(), None)]);
}

#[test]
fn six_position_tuple() {
    let schema = typed::tuple((
        boolean().typed(),
        number().typed(),
        string().typed(),
        null().typed(),
        undefined().typed(),
        number().typed().optional(),
    ));
    let (a, b, c, (), (), f) = schema
        .parse(&Value::Array(vec![
            Value::Bool(true),
            Value::from(2),
            Value::from("c"),
            Value::Null,
            Value::Undefined,
            Value::Undefined,
        ]))
        .unwrap();
    assert!(a);
    assert_eq!((b, c.as_str(), f), (2.0, "c", None));
}

#[test]
fn typed_union_variant_follows_candidate_order() {
    let schema = typed::union2(&number().typed(), &string().typed());
    assert_eq!(schema.parse(&Value::from(1)).unwrap(), Union2::A(1.0));
    assert_eq!(
        schema.parse(&Value::from("x")).unwrap(),
        Union2::B("x".to_string())
    );
}

#[test]
fn typed_union_variant_is_the_candidate_that_parsed() {
    let schema = typed::union2(&number().min(10.0).typed(), &number().typed());
    assert_eq!(schema.parse(&Value::from(3)).unwrap(), Union2::B(3.0));
    assert_eq!(schema.parse(&Value::from(12)).unwrap(), Union2::A(12.0));

    let strings = typed::union2(&string().length(2).typed(), &string().typed());
    assert_eq!(
        strings.parse(&Value::from("abcd")).unwrap(),
        Union2::B("abcd".to_string())
    );
    assert_eq!(
        strings.parse(&Value::from("ab")).unwrap(),
        Union2::A("ab".to_string())
    );
}

#[test]
fn typed_union_inside_array_tracks_each_element() {
    let schema = typed::array(&typed::union3(
        &number().max(0.0).typed(),
        &number().max(10.0).typed(),
        &number().typed(),
    ));
    let out = schema.parse(&Value::from(vec![-1, 5, 20])).unwrap();
    assert_eq!(out, vec![Union3::A(-1.0), Union3::B(5.0), Union3::C(20.0)]);
}

#[test]
fn typed_union_default_resolves_against_substituted_value() {
    let schema = typed::union2(&number().min(10.0).typed(), &number().typed()).default(3);
    assert_eq!(schema.parse(&Value::Undefined).unwrap(), Union2::B(3.0));
}

#[test]
fn typed_union_commits_to_candidate_despite_conversion_failure() {
    let refuses = Typed::<f64>::new(number(), |_| Err(ParseError::conversion("refused")));
    let schema = typed::union2(&refuses, &number().typed());
    let err = schema.parse(&Value::from(1)).unwrap_err();
    assert_eq!(err.kind.code(), "conversion");
}

fn numbers(value: Value) -> Result<Vec<f64>, ParseError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Number(n) => Ok(n),
                other => Err(ParseError::conversion(format!("{other} is not a number"))),
            })
            .collect(),
        other => Err(ParseError::conversion(format!("{other} is not an array"))),
    }
}

#[test]
fn vec_bounds_apply_to_non_array_schemas() {
    let schema = Typed::new(union![array(number())], numbers).min(3);
    let err = schema.parse(&Value::from(vec![1])).unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::ConstraintViolation {
            subject: Subject::ArrayLength,
            constraint: ConstraintKind::Min,
            limit: 3.0,
            actual: 1.0,
        }
    );
    assert_eq!(
        schema.parse(&Value::from(vec![1, 2, 3])).unwrap(),
        vec![1.0, 2.0, 3.0]
    );

    let exact = Typed::new(union![array(number())], numbers).length(1);
    assert!(exact.parse(&Value::from(vec![1, 2])).is_err());
    assert!(exact.parse(&Value::from(vec![1])).is_ok());
}

#[test]
fn vec_bounds_on_array_schema_refine_the_schema() {
    let schema = typed::array(&number().typed()).min(2).max(4);
    let Schema::Array(node) = schema.schema() else {
        panic!("expected an array schema");
    };
    assert_eq!(node.bounds().get(ConstraintKind::Min), Some(2));
    assert_eq!(node.bounds().get(ConstraintKind::Max), Some(4));
}

#[test]
fn typed_parse_safe() {
    let schema = number().typed().nullish();
    assert_eq!(schema.parse_safe(&Value::Null).data(), Some(&None));
    assert!(!schema.parse_safe(&Value::from(true)).success());
}
