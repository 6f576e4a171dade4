//! Operator comparisons: numeric ordering, string equality, containment,
//! and membership.

use super::ValidationError;
use crate::document::node::Value;
use std::cmp::Ordering;

/// A comparison operator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "lt" => Some(CompareOp::Lt),
            "le" => Some(CompareOp::Le),
            "gt" => Some(CompareOp::Gt),
            "ge" => Some(CompareOp::Ge),
            "eq" => Some(CompareOp::Eq),
            "ne" => Some(CompareOp::Ne),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    /// Whether an observed ordering satisfies this operator.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
        }
    }
}

/// Numeric comparison. Numbers compare directly; numeric strings and
/// booleans are coerced.
pub fn compare_number(value: &Value, op: CompareOp, other: f64) -> Result<bool, ValidationError> {
    let number = numeric_value(value)?;
    let ordering = number
        .partial_cmp(&other)
        .ok_or(ValidationError::UnparsableOperand {
            operand: number.to_string(),
            expected: "an orderable number",
        })?;
    Ok(op.holds(ordering))
}

fn numeric_value(value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => Ok(n.as_f64()),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| ValidationError::UnparsableOperand {
                operand: s.clone(),
                expected: "a number",
            }),
        other => Err(ValidationError::UnsupportedValue {
            expected: "a number",
            found: other.type_name(),
        }),
    }
}

/// String equality/inequality. Only `eq` and `ne` apply; a non-string value
/// is simply unequal to the operand.
pub fn compare(value: &Value, op: CompareOp, other: &str) -> Result<bool, ValidationError> {
    if !op.is_equality() {
        return Err(ValidationError::UnsupportedOperator {
            operator: op.as_str(),
            allowed: "eq, ne",
        });
    }
    let equal = value.as_str() == Some(other);
    Ok(match op {
        CompareOp::Eq => equal,
        _ => !equal,
    })
}

/// Containment: substring for strings, string-element membership for
/// sequences.
pub fn contain(value: &Value, other: &str) -> Result<bool, ValidationError> {
    match value {
        Value::String(text) => Ok(text.contains(other)),
        Value::Array(items) => Ok(items.iter().any(|item| item.as_str() == Some(other))),
        found => Err(ValidationError::UnsupportedValue {
            expected: "a string or sequence",
            found: found.type_name(),
        }),
    }
}

/// Membership: the string value must appear in the operand. An operand with
/// commas is treated as a list of candidates, otherwise as a plain string.
pub fn belong(value: &Value, other: &str) -> Result<bool, ValidationError> {
    let text = match value {
        Value::String(s) => s,
        found => {
            return Err(ValidationError::UnsupportedValue {
                expected: "a string",
                found: found.type_name(),
            })
        }
    };
    if other.contains(',') {
        Ok(other.split(',').any(|candidate| candidate.trim() == text))
    } else {
        Ok(other.contains(text.as_str()))
    }
}
