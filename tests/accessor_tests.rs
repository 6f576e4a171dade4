//! Integration tests for indexed access through DataQuery.

use dataquill::document::parser::parse_json;
use dataquill::{AccessError, DataQuery, Value};

fn list_query() -> DataQuery {
    DataQuery::new(parse_json(r#"["a", "b", "c", "d"]"#).unwrap())
}

#[test]
fn test_slice_expression() {
    let query = list_query();
    assert_eq!(
        query.get_or("1:3", Value::Null),
        parse_json(r#"["b", "c"]"#).unwrap()
    );
}

#[test]
fn test_out_of_range_returns_default() {
    let query = DataQuery::new(parse_json(r#"["a", "b", "c"]"#).unwrap());
    let result = query
        .get("5", Value::String("missing".to_string()), false)
        .unwrap();
    assert_eq!(result, Value::String("missing".to_string()));
}

#[test]
fn test_map_default() {
    let query = DataQuery::new(parse_json(r#"{"x": 1}"#).unwrap());
    assert_eq!(
        query.get_or("y", parse_json("42").unwrap()),
        parse_json("42").unwrap()
    );
}

#[test]
fn test_negative_index_and_step() {
    let query = list_query();
    assert_eq!(query.get_or("-2", Value::Null), Value::String("c".to_string()));
    assert_eq!(
        query.get_or("::-1", Value::Null),
        parse_json(r#"["d", "c", "b", "a"]"#).unwrap()
    );
}

#[test]
fn test_on_exception_surfaces_errors() {
    let query = list_query();
    assert!(matches!(
        query.try_get("nonsense"),
        Err(AccessError::InvalidIndex { .. })
    ));
    assert!(matches!(
        query.try_get("10"),
        Err(AccessError::OutOfRange { .. })
    ));
}
