//! Decoding of JSON and YAML text into [`Value`] trees.
//!
//! The heavy lifting is delegated to `serde_json` and `serde_yaml`; this
//! module converts their value types into the crate's own representation,
//! keeping map insertion order intact and folding YAML tags into
//! [`Value::Tagged`].

use super::node::{Number, Value};
use anyhow::{Context, Result};

/// Parses a JSON document into a [`Value`].
///
/// # Example
///
/// ```
/// use dataquill::document::parser::parse_json;
///
/// let record = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert!(record.is_object());
/// ```
pub fn parse_json(text: &str) -> Result<Value> {
    let decoded: serde_json::Value = serde_json::from_str(text).context("Failed to parse JSON")?;
    Ok(from_json(decoded))
}

/// Parses a YAML document into a [`Value`].
pub fn parse_yaml(text: &str) -> Result<Value> {
    let decoded: serde_yaml::Value = serde_yaml::from_str(text).context("Failed to parse YAML")?;
    Ok(from_yaml(decoded))
}

/// Converts a decoded `serde_json` value.
pub fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::Integer(i))
            } else {
                Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

/// Converts a decoded `serde_yaml` value.
pub fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Boolean(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::Integer(i))
            } else {
                Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (yaml_key(&key), from_yaml(value)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => Value::Tagged {
            tag: tagged.tag.to_string(),
            value: Box::new(from_yaml(tagged.value)),
        },
    }
}

/// Renders a YAML mapping key as a string. YAML permits non-string keys;
/// the lookup language matches keys textually, so scalars are stringified.
fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeKind;

    #[test]
    fn test_parse_json_object() {
        let record = parse_json(r#"{"b": 1, "a": [true, null, 1.5]}"#).unwrap();
        let keys: Vec<&str> = match &record {
            Value::Object(entries) => entries.keys().map(String::as_str).collect(),
            _ => unreachable!(),
        };
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(
            record.get("a"),
            Some(&Value::Array(vec![
                Value::Boolean(true),
                Value::Null,
                Value::Number(Number::Float(1.5)),
            ]))
        );
    }

    #[test]
    fn test_parse_json_rejects_invalid() {
        assert!(parse_json("{not json").is_err());
    }

    #[test]
    fn test_parse_yaml_mapping() {
        let record = parse_yaml("name: box\nports:\n  - 80\n  - 443\n").unwrap();
        assert_eq!(record.get("name"), Some(&Value::String("box".to_string())));
        assert_eq!(
            record.get("ports"),
            Some(&Value::Array(vec![
                Value::Number(Number::Integer(80)),
                Value::Number(Number::Integer(443)),
            ]))
        );
    }

    #[test]
    fn test_parse_yaml_tagged_value_is_opaque() {
        let record = parse_yaml("payload: !blob abc\n").unwrap();
        let payload = record.get("payload").unwrap();
        assert_eq!(payload.kind(), NodeKind::Opaque);
        match payload {
            Value::Tagged { tag, value } => {
                assert!(tag.contains("blob"));
                assert_eq!(**value, Value::String("abc".to_string()));
            }
            other => panic!("expected tagged value, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_non_string_keys_stringified() {
        let record = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(record.get("1"), Some(&Value::String("one".to_string())));
        assert!(record.get("true").is_some());
    }
}
