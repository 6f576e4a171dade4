//! Decoded document values.
//!
//! Every document handled by dataquill is represented by the [`Value`] enum:
//! maps with insertion-ordered keys, sequences, scalars, and YAML-tagged
//! values. The representation is deliberately independent of the decoding
//! crate that produced it; see [`super::parser`] for the conversions.
//!
//! # Example
//!
//! ```
//! use dataquill::document::node::{NodeKind, Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), Value::String("dataquill".to_string()));
//! fields.insert("version".to_string(), Value::Number(Number::Integer(1)));
//! let record = Value::Object(fields);
//!
//! assert!(record.is_object());
//! assert_eq!(record.kind(), NodeKind::Map);
//! assert_eq!(record.get("name").and_then(Value::as_str), Some("dataquill"));
//! ```

use indexmap::IndexMap;

/// A number decoded from a document (integer or float).
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

/// Structural classification of a value.
///
/// The finder and projector switch over this tag exhaustively; `Opaque`
/// covers anything that is neither a map, a sequence, nor a primitive
/// scalar (for decoded YAML that means tagged values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    Sequence,
    Scalar,
    Opaque,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Map => "map",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Opaque => "opaque",
        }
    }
}

/// A decoded document value.
///
/// Objects preserve key insertion order end to end; sequences preserve
/// positional order. `Tagged` carries a YAML tag together with the value it
/// annotates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A map of key-value pairs, insertion order preserved
    Object(IndexMap<String, Value>),
    /// An ordered sequence of values
    Array(Vec<Value>),
    /// A string scalar
    String(String),
    /// A numeric scalar
    Number(Number),
    /// A boolean scalar
    Boolean(bool),
    /// A null scalar
    Null,
    /// A YAML-tagged value, e.g. `!fixture {...}`
    Tagged { tag: String, value: Box<Value> },
}

impl Value {
    /// Returns the structural kind of this value.
    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Object(_) => NodeKind::Map,
            Value::Array(_) => NodeKind::Sequence,
            Value::String(_) | Value::Number(_) | Value::Boolean(_) | Value::Null => {
                NodeKind::Scalar
            }
            Value::Tagged { .. } => NodeKind::Opaque,
        }
    }

    /// Returns a short name for the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "map",
            Value::Array(_) => "sequence",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Tagged { .. } => "tagged value",
        }
    }

    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    /// Returns the string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks a key up on an object value; `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Object(entries) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::String(text) => serializer.serialize_str(text),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            // The tag is a decoding artifact; serialization keeps the payload.
            Value::Tagged { value, .. } => value.serialize(serializer),
        }
    }
}
