//! Datetime comparisons over a fixed set of accepted layouts.

use super::ops::CompareOp;
use super::ValidationError;
use crate::document::node::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Compares a datetime value against an operand. Both sides must parse as
/// RFC 3339 or one of the accepted local layouts; date-only inputs count as
/// midnight.
pub fn compare_datetime(value: &Value, op: CompareOp, other: &str) -> Result<bool, ValidationError> {
    let text = value.as_str().ok_or(ValidationError::UnsupportedValue {
        expected: "a datetime string",
        found: value.type_name(),
    })?;
    let left = parse_datetime(text)?;
    let right = parse_datetime(other)?;
    Ok(op.holds(left.cmp(&right)))
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(parsed.and_time(NaiveTime::MIN));
        }
    }
    Err(ValidationError::UnparsableOperand {
        operand: trimmed.to_string(),
        expected: "a datetime",
    })
}
