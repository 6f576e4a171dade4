//! Integration tests for select-statement projection.

use dataquill::document::parser::parse_json;
use dataquill::{DataQuery, QueryError, SelectError, Value};

fn devices() -> DataQuery {
    let data = parse_json(
        r#"{
            "devices": [
                {"name": "r1", "addr": "10.0.0.1", "os": "7.10.2", "state": "up"},
                {"name": "r2", "addr": "10.0.0.2", "os": "6.2.9", "state": "down"},
                {"name": "sw1", "addr": "fe80::1", "os": "7.3.1", "state": "up"},
                {"name": "probe", "state": "up"}
            ]
        }"#,
    )
    .unwrap();
    DataQuery::new(data)
}

/// Zero-select returns each match's own value.
#[test]
fn test_zero_select() {
    let query = devices();
    let result = query.find("name", "").unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(result[0], Value::String("r1".to_string()));
}

/// All-select returns each match's whole parent record.
#[test]
fn test_all_select() {
    let query = devices();
    let result = query.find("name=r2", "*").unwrap();
    assert_eq!(
        result,
        vec![parse_json(
            r#"{"name": "r2", "addr": "10.0.0.2", "os": "6.2.9", "state": "down"}"#
        )
        .unwrap()]
    );
}

/// Column-select keeps only records carrying every requested column.
#[test]
fn test_column_select_drops_partial_records() {
    let query = devices();
    let result = query.find("name", "name, addr").unwrap();
    // "probe" has no addr and is dropped entirely
    assert_eq!(result.len(), 3);
    for record in &result {
        assert!(record.get("name").is_some());
        assert!(record.get("addr").is_some());
    }
}

#[test]
fn test_column_select_keeps_statement_order() {
    let query = devices();
    let result = query.find("name=r1", "addr, name").unwrap();
    assert_eq!(
        result,
        vec![parse_json(r#"{"addr": "10.0.0.1", "name": "r1"}"#).unwrap()]
    );
}

/// The WHERE filter runs over the parent record of each match.
#[test]
fn test_where_filter_on_parent_record() {
    let query = devices();
    let result = query.find("name", "name WHERE state eq up").unwrap();
    assert_eq!(result.len(), 3);

    let result = query
        .find("name", "name, addr WHERE state eq up and addr is ipv4_address")
        .unwrap();
    assert_eq!(
        result,
        vec![parse_json(r#"{"name": "r1", "addr": "10.0.0.1"}"#).unwrap()]
    );
}

#[test]
fn test_where_version_comparison() {
    let query = devices();
    let result = query
        .find("name", "name WHERE os semantic_version_ge 7.0.0")
        .unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn test_where_filter_with_zero_select() {
    let query = devices();
    let result = query.find("addr", "WHERE state eq down").unwrap();
    assert_eq!(result, vec![Value::String("10.0.0.2".to_string())]);
}

/// A malformed select statement fails fast.
#[test]
fn test_malformed_select_fails() {
    let query = devices();
    let err = query.find("name", "name WHERE state resembles up").unwrap_err();
    assert!(matches!(
        err,
        QueryError::Select(SelectError::UnknownOperator { .. })
    ));
}

/// Filtering away every match leaves an empty result, not an error.
#[test]
fn test_filter_removes_all_matches() {
    let query = devices();
    let result = query.find("name", "* WHERE state eq degraded").unwrap();
    assert!(result.is_empty());
}
