//! Error types for lookup compilation.

use std::fmt;

/// Errors that can occur while compiling a lookup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A wildcard pattern did not translate into a valid regular expression.
    WildcardConversion {
        wildcard: String,
        attempted: String,
        message: String,
    },
    /// A composed or user-supplied pattern failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// A lookup side produced no usable pattern at all.
    EmptyPattern { text: String },
    /// The left side of a lookup resolved to a value predicate; only key
    /// patterns are allowed there.
    LeftSidePredicate { text: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::WildcardConversion {
                wildcard,
                attempted,
                message,
            } => write!(
                f,
                "Failed to convert wildcard '{}' to regex '{}': {}",
                wildcard, attempted, message
            ),
            LookupError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            LookupError::EmptyPattern { text } => {
                write!(f, "Failed to parse this lookup: '{}'", text)
            }
            LookupError::LeftSidePredicate { text } => write!(
                f,
                "The left side of a lookup must be a key pattern, not a predicate call: '{}'",
                text
            ),
        }
    }
}

impl std::error::Error for LookupError {}
