//! Select-statement parsing and filter predicates.
//!
//! A select statement controls how found matches are projected:
//!
//! ```text
//! [SELECT] [COLUMNS] [WHERE CONDITION ((and|or) CONDITION)*]
//! ```
//!
//! - no columns: a "zero-select" — each match's own value is returned
//! - `*` or `all`: an "all-select" — each match's parent record is returned
//! - a comma-separated column list: a new record per match holding exactly
//!   those columns of the parent record
//!
//! Each `CONDITION` is `KEY OP [OPERAND]`, where OP is one of `is`,
//! `is_not`, `match`, `not_match`, `lt le gt ge eq ne`, the `version_*` /
//! `semantic_version_*` / `datetime_*` comparison families, `contain`,
//! `not_contain`, `belong`, or `not_belong`.
//!
//! # Examples
//!
//! ```
//! use dataquill::select::SelectStatement;
//!
//! let statement = SelectStatement::parse("name, addr WHERE addr is ipv4_address").unwrap();
//! assert_eq!(statement.columns(), ["name", "addr"]);
//! assert!(statement.filter().is_some());
//!
//! assert!(SelectStatement::parse("").unwrap().is_zero_select());
//! assert!(SelectStatement::parse("SELECT *").unwrap().is_all_select());
//! ```

use crate::document::node::Value;
use crate::validation::custom::CustomCheck;
use crate::validation::ops::{self, CompareOp};
use crate::validation::{datetime, version};
use regex::Regex;
use std::fmt;

static NULL: Value = Value::Null;

/// Errors from parsing a select statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    UnknownOperator { operator: String },
    UnknownKeyword { keyword: String },
    MissingOperand { condition: String },
    InvalidOperand { operator: String, operand: String },
    InvalidRegex { pattern: String, message: String },
    IncompleteCondition { clause: String },
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::UnknownOperator { operator } => {
                write!(f, "Unknown condition operator '{}'", operator)
            }
            SelectError::UnknownKeyword { keyword } => {
                write!(f, "Unknown check keyword '{}'", keyword)
            }
            SelectError::MissingOperand { condition } => {
                write!(f, "Condition '{}' is missing an operand", condition)
            }
            SelectError::InvalidOperand { operator, operand } => {
                write!(f, "Operand '{}' is not valid for '{}'", operand, operator)
            }
            SelectError::InvalidRegex { pattern, message } => {
                write!(f, "Invalid regex '{}': {}", pattern, message)
            }
            SelectError::IncompleteCondition { clause } => {
                write!(f, "Incomplete WHERE clause near '{}'", clause)
            }
        }
    }
}

impl std::error::Error for SelectError {}

/// One WHERE condition, bound to a record key.
#[derive(Debug, Clone)]
pub enum Condition {
    Is {
        key: String,
        check: CustomCheck,
        valid: bool,
    },
    Match {
        key: String,
        pattern: Regex,
        valid: bool,
    },
    CompareNumber {
        key: String,
        op: CompareOp,
        other: f64,
    },
    Compare {
        key: String,
        op: CompareOp,
        other: String,
    },
    CompareVersion {
        key: String,
        op: CompareOp,
        other: String,
        semantic: bool,
    },
    CompareDatetime {
        key: String,
        op: CompareOp,
        other: String,
    },
    Contain {
        key: String,
        other: String,
        valid: bool,
    },
    Belong {
        key: String,
        other: String,
        valid: bool,
    },
}

impl Condition {
    fn key(&self) -> &str {
        match self {
            Condition::Is { key, .. }
            | Condition::Match { key, .. }
            | Condition::CompareNumber { key, .. }
            | Condition::Compare { key, .. }
            | Condition::CompareVersion { key, .. }
            | Condition::CompareDatetime { key, .. }
            | Condition::Contain { key, .. }
            | Condition::Belong { key, .. } => key,
        }
    }

    /// Evaluates the condition against a parent record. A missing key
    /// evaluates as null; a non-map record never satisfies a condition.
    fn eval(&self, record: &Value) -> bool {
        let value = match record {
            Value::Object(entries) => entries.get(self.key()).unwrap_or(&NULL),
            other => {
                log::warn!(
                    "select filter applied to a non-map record ({})",
                    other.type_name()
                );
                return false;
            }
        };

        match self {
            Condition::Is { check, valid, .. } => {
                check.check(value).map(|b| b == *valid).unwrap_or(false)
            }
            Condition::Match { pattern, valid, .. } => match value.as_str() {
                Some(text) => pattern.is_match(text) == *valid,
                None => false,
            },
            Condition::CompareNumber { op, other, .. } => {
                ops::compare_number(value, *op, *other).unwrap_or(false)
            }
            Condition::Compare { op, other, .. } => {
                ops::compare(value, *op, other).unwrap_or(false)
            }
            Condition::CompareVersion {
                op,
                other,
                semantic,
                ..
            } => {
                if *semantic {
                    version::compare_semantic_version(value, *op, other).unwrap_or(false)
                } else {
                    version::compare_version(value, *op, other).unwrap_or(false)
                }
            }
            Condition::CompareDatetime { op, other, .. } => {
                datetime::compare_datetime(value, *op, other).unwrap_or(false)
            }
            Condition::Contain { other, valid, .. } => {
                ops::contain(value, other).map(|b| b == *valid).unwrap_or(false)
            }
            Condition::Belong { other, valid, .. } => {
                ops::belong(value, other).map(|b| b == *valid).unwrap_or(false)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    And,
    Or,
}

/// A chain of conditions combined left-associatively with and/or.
#[derive(Debug, Clone)]
pub struct Filter {
    first: Condition,
    rest: Vec<(Connector, Condition)>,
}

impl Filter {
    pub fn eval(&self, record: &Value) -> bool {
        let mut outcome = self.first.eval(record);
        for (connector, condition) in &self.rest {
            outcome = match connector {
                Connector::And => outcome && condition.eval(record),
                Connector::Or => outcome || condition.eval(record),
            };
        }
        outcome
    }
}

/// A parsed select statement: projection form plus an optional filter.
#[derive(Debug, Clone)]
pub struct SelectStatement {
    columns: Vec<String>,
    all: bool,
    filter: Option<Filter>,
}

impl SelectStatement {
    /// Parses a select statement. The empty string is a valid zero-select.
    pub fn parse(statement: &str) -> Result<Self, SelectError> {
        let tokens: Vec<&str> = statement.split_whitespace().collect();
        let where_at = tokens
            .iter()
            .position(|token| token.eq_ignore_ascii_case("where"));

        let mut column_tokens: &[&str] = match where_at {
            Some(at) => &tokens[..at],
            None => &tokens,
        };
        if column_tokens
            .first()
            .is_some_and(|token| token.eq_ignore_ascii_case("select"))
        {
            column_tokens = &column_tokens[1..];
        }

        let columns_text = column_tokens.join(" ");
        let (all, columns) = classify_columns(&columns_text);

        let filter = match where_at {
            Some(at) => Some(parse_conditions(&tokens[at + 1..])?),
            None => None,
        };

        Ok(SelectStatement {
            columns,
            all,
            filter,
        })
    }

    /// No columns were requested; project each match's own value.
    pub fn is_zero_select(&self) -> bool {
        !self.all && self.columns.is_empty()
    }

    /// `*`/`all` was requested; project each match's whole parent record.
    pub fn is_all_select(&self) -> bool {
        self.all
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }
}

fn classify_columns(text: &str) -> (bool, Vec<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (false, Vec::new());
    }
    if trimmed == "*" || trimmed.eq_ignore_ascii_case("all") {
        return (true, Vec::new());
    }
    let columns = if trimmed.contains(',') {
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        trimmed.split_whitespace().map(str::to_string).collect()
    };
    (false, columns)
}

fn parse_conditions(tokens: &[&str]) -> Result<Filter, SelectError> {
    let mut cursor = 0;
    let (first, consumed) = parse_condition(&tokens[cursor..])?;
    cursor += consumed;

    let mut rest = Vec::new();
    while cursor < tokens.len() {
        let connector = if tokens[cursor].eq_ignore_ascii_case("and") {
            Connector::And
        } else if tokens[cursor].eq_ignore_ascii_case("or") {
            Connector::Or
        } else {
            return Err(SelectError::IncompleteCondition {
                clause: tokens[cursor..].join(" "),
            });
        };
        cursor += 1;
        let (condition, consumed) = parse_condition(&tokens[cursor..])?;
        cursor += consumed;
        rest.push((connector, condition));
    }

    Ok(Filter { first, rest })
}

/// Parses one `KEY OP OPERAND` triple; the operand runs to the next
/// `and`/`or` connector. Returns the condition and the tokens consumed.
fn parse_condition(tokens: &[&str]) -> Result<(Condition, usize), SelectError> {
    if tokens.len() < 2 {
        return Err(SelectError::IncompleteCondition {
            clause: tokens.join(" "),
        });
    }
    let key = tokens[0].to_string();
    let operator = tokens[1];

    let mut end = 2;
    while end < tokens.len()
        && !tokens[end].eq_ignore_ascii_case("and")
        && !tokens[end].eq_ignore_ascii_case("or")
    {
        end += 1;
    }
    let operand = tokens[2..end].join(" ");
    if operand.is_empty() {
        return Err(SelectError::MissingOperand {
            condition: format!("{} {}", key, operator),
        });
    }

    let condition = build_condition(key, operator, operand)?;
    Ok((condition, end))
}

fn build_condition(key: String, operator: &str, operand: String) -> Result<Condition, SelectError> {
    let lowered = operator.to_ascii_lowercase();
    match lowered.as_str() {
        "is" | "is_not" | "isnot" => {
            let valid = lowered == "is";
            let keyword = operand.to_ascii_lowercase();
            let base = keyword.strip_prefix("is_").unwrap_or(&keyword);
            let check =
                CustomCheck::from_keyword(base).ok_or(SelectError::UnknownKeyword {
                    keyword: operand.clone(),
                })?;
            Ok(Condition::Is { key, check, valid })
        }
        "match" | "not_match" | "notmatch" => {
            let valid = lowered == "match";
            let pattern = Regex::new(&operand).map_err(|err| SelectError::InvalidRegex {
                pattern: operand.clone(),
                message: err.to_string(),
            })?;
            Ok(Condition::Match {
                key,
                pattern,
                valid,
            })
        }
        "contain" | "not_contain" | "notcontain" => Ok(Condition::Contain {
            key,
            other: operand,
            valid: lowered == "contain",
        }),
        "belong" | "not_belong" | "notbelong" => Ok(Condition::Belong {
            key,
            other: operand,
            valid: lowered == "belong",
        }),
        _ => {
            if let Some(op) = CompareOp::from_keyword(&lowered) {
                return match operand.parse::<f64>() {
                    Ok(other) => Ok(Condition::CompareNumber { key, op, other }),
                    Err(_) if op.is_equality() => Ok(Condition::Compare {
                        key,
                        op,
                        other: operand,
                    }),
                    Err(_) => Err(SelectError::InvalidOperand {
                        operator: lowered,
                        operand,
                    }),
                };
            }
            if let Some(suffix) = lowered.strip_prefix("semantic_version_") {
                let op = CompareOp::from_keyword(suffix).ok_or(SelectError::UnknownOperator {
                    operator: operator.to_string(),
                })?;
                return Ok(Condition::CompareVersion {
                    key,
                    op,
                    other: operand,
                    semantic: true,
                });
            }
            if let Some(suffix) = lowered.strip_prefix("version_") {
                let op = CompareOp::from_keyword(suffix).ok_or(SelectError::UnknownOperator {
                    operator: operator.to_string(),
                })?;
                return Ok(Condition::CompareVersion {
                    key,
                    op,
                    other: operand,
                    semantic: false,
                });
            }
            if let Some(suffix) = lowered.strip_prefix("datetime_") {
                let op = CompareOp::from_keyword(suffix).ok_or(SelectError::UnknownOperator {
                    operator: operator.to_string(),
                })?;
                return Ok(Condition::CompareDatetime {
                    key,
                    op,
                    other: operand,
                });
            }
            Err(SelectError::UnknownOperator {
                operator: operator.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    #[test]
    fn test_zero_select_forms() {
        assert!(SelectStatement::parse("").unwrap().is_zero_select());
        assert!(SelectStatement::parse("   ").unwrap().is_zero_select());
        assert!(SelectStatement::parse("SELECT").unwrap().is_zero_select());
    }

    #[test]
    fn test_all_select_forms() {
        assert!(SelectStatement::parse("*").unwrap().is_all_select());
        assert!(SelectStatement::parse("ALL").unwrap().is_all_select());
        assert!(SelectStatement::parse("select *").unwrap().is_all_select());
    }

    #[test]
    fn test_column_select() {
        let statement = SelectStatement::parse("select name, addr").unwrap();
        assert!(!statement.is_zero_select());
        assert!(!statement.is_all_select());
        assert_eq!(statement.columns(), ["name", "addr"]);
    }

    #[test]
    fn test_columns_without_commas() {
        let statement = SelectStatement::parse("name addr").unwrap();
        assert_eq!(statement.columns(), ["name", "addr"]);
    }

    #[test]
    fn test_where_is_condition() {
        let statement = SelectStatement::parse("* where addr is ipv4_address").unwrap();
        let filter = statement.filter().unwrap();
        let hit = parse_json(r#"{"addr": "10.0.0.1"}"#).unwrap();
        let miss = parse_json(r#"{"addr": "fe80::1"}"#).unwrap();
        assert!(filter.eval(&hit));
        assert!(!filter.eval(&miss));
    }

    #[test]
    fn test_where_numeric_condition() {
        let statement = SelectStatement::parse("where mtu ge 1500").unwrap();
        let filter = statement.filter().unwrap();
        assert!(filter.eval(&parse_json(r#"{"mtu": 9000}"#).unwrap()));
        assert!(!filter.eval(&parse_json(r#"{"mtu": 1400}"#).unwrap()));
        // the whole statement is the WHERE clause: still a zero-select
        assert!(statement.is_zero_select());
    }

    #[test]
    fn test_where_match_condition_with_and() {
        let statement =
            SelectStatement::parse("where name match ^eth[0-9]+$ and state eq up").unwrap();
        let filter = statement.filter().unwrap();
        assert!(filter.eval(&parse_json(r#"{"name": "eth0", "state": "up"}"#).unwrap()));
        assert!(!filter.eval(&parse_json(r#"{"name": "eth0", "state": "down"}"#).unwrap()));
        assert!(!filter.eval(&parse_json(r#"{"name": "lo", "state": "up"}"#).unwrap()));
    }

    #[test]
    fn test_where_or_condition() {
        let statement = SelectStatement::parse("where state eq up or state eq testing").unwrap();
        let filter = statement.filter().unwrap();
        assert!(filter.eval(&parse_json(r#"{"state": "testing"}"#).unwrap()));
        assert!(!filter.eval(&parse_json(r#"{"state": "down"}"#).unwrap()));
    }

    #[test]
    fn test_where_version_and_datetime_conditions() {
        let statement = SelectStatement::parse("where os version_ge 7.2").unwrap();
        assert!(statement
            .filter()
            .unwrap()
            .eval(&parse_json(r#"{"os": "7.10.1"}"#).unwrap()));

        let statement =
            SelectStatement::parse("where built semantic_version_gt 1.2.3").unwrap();
        assert!(statement
            .filter()
            .unwrap()
            .eval(&parse_json(r#"{"built": "1.3.0"}"#).unwrap()));

        let statement =
            SelectStatement::parse("where seen datetime_lt 2024-06-01 12:00:00").unwrap();
        assert!(statement
            .filter()
            .unwrap()
            .eval(&parse_json(r#"{"seen": "2024-06-01 10:30:00"}"#).unwrap()));
    }

    #[test]
    fn test_missing_key_evaluates_as_null() {
        let statement = SelectStatement::parse("where ghost is empty").unwrap();
        assert!(statement
            .filter()
            .unwrap()
            .eval(&parse_json(r#"{"other": 1}"#).unwrap()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            SelectStatement::parse("where a frobnicate b").unwrap_err(),
            SelectError::UnknownOperator { .. }
        ));
        assert!(matches!(
            SelectStatement::parse("where a is wizard").unwrap_err(),
            SelectError::UnknownKeyword { .. }
        ));
        assert!(matches!(
            SelectStatement::parse("where a eq").unwrap_err(),
            SelectError::MissingOperand { .. }
        ));
        assert!(matches!(
            SelectStatement::parse("where a eq 1 and").unwrap_err(),
            SelectError::IncompleteCondition { .. }
        ));
        assert!(matches!(
            SelectStatement::parse("where a lt up").unwrap_err(),
            SelectError::InvalidOperand { .. }
        ));
    }
}
