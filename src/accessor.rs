//! Indexed access with default-on-miss semantics.
//!
//! [`get`] dereferences a map or sequence by a flexible index expression: a
//! map key, an optionally-signed integer position, or a `start:stop[:step]`
//! slice. Failures are converted to a caller-supplied default unless
//! exception propagation is requested.
//!
//! # Example
//!
//! ```
//! use dataquill::accessor::get_or;
//! use dataquill::document::parser::parse_json;
//! use dataquill::Value;
//!
//! let items = parse_json(r#"["a", "b", "c", "d"]"#).unwrap();
//! assert_eq!(get_or(&items, "1:3", Value::Null), parse_json(r#"["b", "c"]"#).unwrap());
//! assert_eq!(get_or(&items, "-1", Value::Null), Value::String("d".to_string()));
//! assert_eq!(get_or(&items, "9", Value::Null), Value::Null);
//! ```

use crate::document::node::Value;
use std::fmt;

/// Errors raised while resolving an index expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The container is a scalar or opaque value.
    NotIndexable { found: &'static str },
    /// A positional index fell outside the sequence.
    OutOfRange { index: isize, len: usize },
    /// The index expression is not a key, position, or slice.
    InvalidIndex { index: String },
    /// A slice step of zero.
    ZeroStep,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::NotIndexable { found } => {
                write!(f, "Cannot index into a {}", found)
            }
            AccessError::OutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            AccessError::InvalidIndex { index } => {
                write!(f, "Invalid index expression '{}'", index)
            }
            AccessError::ZeroStep => write!(f, "Slice step cannot be zero"),
        }
    }
}

impl std::error::Error for AccessError {}

/// Resolves `index` against `container`.
///
/// - Maps are accessed by the raw key string; an absent key yields the
///   default, never an error.
/// - Sequences accept an integer position (negatives are end-relative) or a
///   `start:stop[:step]` slice, returning the selected sub-sequence.
///
/// With `on_exception` false every failure yields the default; with it set,
/// the original [`AccessError`] is returned instead.
pub fn get(
    container: &Value,
    index: &str,
    default: Value,
    on_exception: bool,
) -> Result<Value, AccessError> {
    match resolve(container, index) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(err) if on_exception => Err(err),
        Err(_) => Ok(default),
    }
}

/// [`get`] with failures always converted to the default.
pub fn get_or(container: &Value, index: &str, default: Value) -> Value {
    match resolve(container, index) {
        Ok(Some(value)) => value,
        _ => default,
    }
}

/// [`get`] with failures surfaced and a null default for absent map keys.
pub fn try_get(container: &Value, index: &str) -> Result<Value, AccessError> {
    get(container, index, Value::Null, true)
}

/// `Ok(None)` means "absent, use the default" (a missing map key).
fn resolve(container: &Value, index: &str) -> Result<Option<Value>, AccessError> {
    match container {
        Value::Object(entries) => Ok(entries.get(index).cloned()),
        Value::Array(items) => resolve_sequence(items, index),
        other => Err(AccessError::NotIndexable {
            found: other.type_name(),
        }),
    }
}

fn resolve_sequence(items: &[Value], index: &str) -> Result<Option<Value>, AccessError> {
    let trimmed = index.trim();

    if is_integer(trimmed) {
        let position: isize = trimmed.parse().map_err(|_| AccessError::InvalidIndex {
            index: index.to_string(),
        })?;
        return position_get(items, position).map(Some);
    }

    let colons = trimmed.matches(':').count();
    if colons == 1 || colons == 2 {
        let mut bounds = Vec::with_capacity(3);
        for part in trimmed.split(':') {
            let part = part.trim();
            if part.is_empty() {
                bounds.push(None);
            } else if is_integer(part) {
                let bound = part.parse::<isize>().map_err(|_| AccessError::InvalidIndex {
                    index: index.to_string(),
                })?;
                bounds.push(Some(bound));
            } else {
                return Err(AccessError::InvalidIndex {
                    index: index.to_string(),
                });
            }
        }
        let step = if bounds.len() == 3 { bounds[2] } else { None };
        let selected = slice_select(items, bounds[0], bounds[1], step)?;
        return Ok(Some(Value::Array(selected)));
    }

    Err(AccessError::InvalidIndex {
        index: index.to_string(),
    })
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn position_get(items: &[Value], position: isize) -> Result<Value, AccessError> {
    let len = items.len() as isize;
    let normalized = if position < 0 { len + position } else { position };
    if normalized < 0 || normalized >= len {
        return Err(AccessError::OutOfRange {
            index: position,
            len: items.len(),
        });
    }
    Ok(items[normalized as usize].clone())
}

/// Half-open slice selection with end-relative negatives, clamping, and an
/// optional (possibly negative) step.
fn slice_select(
    items: &[Value],
    start: Option<isize>,
    stop: Option<isize>,
    step: Option<isize>,
) -> Result<Vec<Value>, AccessError> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(AccessError::ZeroStep);
    }
    let len = items.len() as isize;

    let clamp = |bound: isize| -> isize {
        let normalized = if bound < 0 { bound + len } else { bound };
        if step > 0 {
            normalized.clamp(0, len)
        } else {
            normalized.clamp(-1, len - 1)
        }
    };
    let (default_start, default_stop) = if step > 0 { (0, len) } else { (len - 1, -1) };
    let start = start.map(clamp).unwrap_or(default_start);
    let stop = stop.map(clamp).unwrap_or(default_stop);

    let mut selected = Vec::new();
    let mut cursor = start;
    if step > 0 {
        while cursor < stop {
            selected.push(items[cursor as usize].clone());
            cursor += step;
        }
    } else {
        while cursor > stop {
            selected.push(items[cursor as usize].clone());
            cursor += step;
        }
    }
    Ok(selected)
}
