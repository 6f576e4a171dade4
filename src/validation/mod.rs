//! Value predicates and comparisons.
//!
//! This module backs both the bare predicate calls of the lookup language
//! (`is_empty()`, `gt(5)`, ...) and the WHERE conditions of select
//! statements. Checks report [`ValidationError`] when an input cannot be
//! checked at all; callers honoring the default no-raise convention map
//! those errors to a non-match.

pub mod custom;
pub mod datetime;
pub mod ops;
pub mod version;

pub use custom::CustomCheck;
pub use ops::CompareOp;

use std::fmt;

/// Errors raised by checks that cannot evaluate their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value's type cannot be subjected to this check.
    UnsupportedValue {
        expected: &'static str,
        found: &'static str,
    },
    /// An operand (or the value itself) did not parse into the needed form.
    UnparsableOperand {
        operand: String,
        expected: &'static str,
    },
    /// The operator is not valid for this comparison.
    UnsupportedOperator {
        operator: &'static str,
        allowed: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedValue { expected, found } => {
                write!(f, "Expected {} but found {}", expected, found)
            }
            ValidationError::UnparsableOperand { operand, expected } => {
                write!(f, "Cannot interpret '{}' as {}", operand, expected)
            }
            ValidationError::UnsupportedOperator { operator, allowed } => {
                write!(f, "Operator '{}' not supported here (allowed: {})", operator, allowed)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
