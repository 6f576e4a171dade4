//! Version-string comparisons.

use super::ops::CompareOp;
use super::ValidationError;
use crate::document::node::Value;
use std::cmp::Ordering;

/// Compares a dotted version value against an operand. Missing components
/// count as zero; components compare numerically when both sides are
/// numeric, lexically otherwise (so `1.10 > 1.9` but `1.0a < 1.0b`).
pub fn compare_version(value: &Value, op: CompareOp, other: &str) -> Result<bool, ValidationError> {
    let left = require_str(value)?;
    Ok(op.holds(dotted_cmp(left, other)))
}

/// Strict `major.minor.patch` comparison; each component must be an
/// unsigned integer.
pub fn compare_semantic_version(
    value: &Value,
    op: CompareOp,
    other: &str,
) -> Result<bool, ValidationError> {
    let left = semantic_components(require_str(value)?)?;
    let right = semantic_components(other)?;
    Ok(op.holds(left.cmp(&right)))
}

fn require_str(value: &Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or(ValidationError::UnsupportedValue {
        expected: "a version string",
        found: value.type_name(),
    })
}

fn dotted_cmp(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.trim().split('.').collect();
    let right: Vec<&str> = b.trim().split('.').collect();
    let width = left.len().max(right.len());

    for position in 0..width {
        let lc = left.get(position).copied().unwrap_or("0");
        let rc = right.get(position).copied().unwrap_or("0");
        let ordering = match (lc.parse::<u64>(), rc.parse::<u64>()) {
            (Ok(ln), Ok(rn)) => ln.cmp(&rn),
            _ => lc.cmp(rc),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn semantic_components(text: &str) -> Result<(u64, u64, u64), ValidationError> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(ValidationError::UnparsableOperand {
            operand: text.to_string(),
            expected: "a MAJOR.MINOR.PATCH version",
        });
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| ValidationError::UnparsableOperand {
                operand: text.to_string(),
                expected: "a MAJOR.MINOR.PATCH version",
            })?;
    }
    Ok((numbers[0], numbers[1], numbers[2]))
}
