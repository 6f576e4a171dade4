//! Lookup-string compilation.
//!
//! A lookup splits on its first `=` into a left (key) expression and an
//! optional right (value) expression. Each side compiles, through the same
//! sub-parser, into either a single anchored regular expression or a value
//! predicate; the compiled [`Lookup`] is immutable and reused across a whole
//! traversal.

use super::error::LookupError;
use super::wildcard::wildcard_to_regex;
use crate::document::node::Value;
use crate::validation::custom::CustomCheck;
use crate::validation::ops::{self, CompareOp};
use once_cell::sync::Lazy;
use regex::Regex;

/// Embedded directive: `_[i]text|wildcard|regex(PATTERN)`. The payload is
/// matched greedily, as the original syntax requires.
static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(?P<options>i?)(?P<method>text|wildcard|regex)\((?P<pattern>.+)\)")
        .expect("directive pattern is valid")
});

/// Bare unary predicate call, e.g. `is_not_empty()`.
static CUSTOM_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<name>is_empty|is_not_empty|is_mac_address|is_not_mac_address|is_ip_address|is_not_ip_address|is_ipv4_address|is_not_ipv4_address|is_ipv6_address|is_not_ipv6_address|is_true|is_not_true|is_false|is_not_false)\(\)$",
    )
    .expect("custom call pattern is valid")
});

/// Numeric comparison call, e.g. `ge(3.5)`. The operand grammar accepts
/// unsigned decimals only.
static NUMBER_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<op>lt|le|gt|ge|eq|ne)\((?P<other>([0-9]+)?\.?[0-9]+)\)$")
        .expect("number call pattern is valid")
});

/// Equality call with a non-numeric operand, e.g. `ne(down)`.
static EQUALITY_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<op>eq|ne)\((?P<other>.*[^0-9].*)\)$")
        .expect("equality call pattern is valid")
});

/// A compiled value predicate from a bare call on the right side.
#[derive(Debug, Clone)]
pub enum ValuePredicate {
    /// Unary check; `valid` is false for the `is_not_*` forms.
    Custom { check: CustomCheck, valid: bool },
    /// Numeric comparison against a constant.
    CompareNumber { op: CompareOp, other: f64 },
    /// Plain equality/inequality against a string constant.
    Compare { op: CompareOp, other: String },
}

impl ValuePredicate {
    /// Applies the predicate to a raw value. Inputs the underlying check
    /// cannot handle count as non-matching.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValuePredicate::Custom { check, valid } => match check.check(value) {
                Ok(outcome) => outcome == *valid,
                Err(_) => false,
            },
            ValuePredicate::CompareNumber { op, other } => {
                ops::compare_number(value, *op, *other).unwrap_or(false)
            }
            ValuePredicate::Compare { op, other } => {
                ops::compare(value, *op, other).unwrap_or(false)
            }
        }
    }
}

/// The compiled right side of a lookup.
#[derive(Debug, Clone)]
pub enum RightHand {
    /// Anchored pattern over stringified values; non-strings never match.
    Pattern(Regex),
    /// Predicate over the raw value.
    Predicate(ValuePredicate),
}

/// One side of a lookup after sub-parsing, before regex compilation.
enum Side {
    Pattern(String),
    Predicate(ValuePredicate),
}

/// A compiled lookup: a key pattern plus an optional value specification.
#[derive(Debug, Clone)]
pub struct Lookup {
    left: Regex,
    right: Option<RightHand>,
}

impl Lookup {
    /// Compiles a lookup string. Only the first `=` separates the key side
    /// from the value side; a lookup without `=` matches any value.
    pub fn compile(lookup: &str) -> Result<Self, LookupError> {
        let (left_text, right_text) = match lookup.split_once('=') {
            Some((left, right)) => (left, Some(right)),
            None => (lookup, None),
        };

        let left = match parse_side(left_text)? {
            Side::Pattern(pattern) => compile_pattern(&pattern)?,
            Side::Predicate(_) => {
                return Err(LookupError::LeftSidePredicate {
                    text: left_text.to_string(),
                })
            }
        };

        let right = match right_text {
            None => None,
            Some(text) => Some(match parse_side(text)? {
                Side::Pattern(pattern) => RightHand::Pattern(compile_pattern(&pattern)?),
                Side::Predicate(predicate) => RightHand::Predicate(predicate),
            }),
        };

        log::debug!(
            "compiled lookup '{}' (left pattern '{}', right {})",
            lookup,
            left.as_str(),
            if right.is_some() { "present" } else { "absent" },
        );
        Ok(Lookup { left, right })
    }

    /// Whether the lookup carries a value specification.
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Tests a key label against the left pattern. The search is unanchored;
    /// anchoring comes from the compiled pattern itself.
    pub fn is_left_matched(&self, label: &str) -> bool {
        self.left.is_match(label)
    }

    /// Tests a raw value against the right specification. Absent right means
    /// any value matches; a pattern right requires a string value.
    pub fn is_right_matched(&self, value: &Value) -> bool {
        match &self.right {
            None => true,
            Some(RightHand::Predicate(predicate)) => predicate.matches(value),
            Some(RightHand::Pattern(pattern)) => match value {
                Value::String(text) => pattern.is_match(text),
                _ => false,
            },
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, LookupError> {
    Regex::new(pattern).map_err(|err| LookupError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

/// Parses one side of a lookup into a pattern or a predicate.
fn parse_side(text: &str) -> Result<Side, LookupError> {
    if !DIRECTIVE_RE.is_match(text) {
        return Ok(parse_plain(text));
    }

    let mut fragments: Vec<String> = Vec::new();
    let mut ignorecase = false;
    let mut cursor = 0;
    for found in DIRECTIVE_RE.captures_iter(text) {
        let whole = found.get(0).unwrap();
        fragments.push(regex::escape(&text[cursor..whole.start()]));

        let options = found.name("options").map(|m| m.as_str()).unwrap_or("");
        ignorecase |= options == "i";

        let payload = &found["pattern"];
        let fragment = match &found["method"] {
            "text" => regex::escape(payload),
            "wildcard" => wildcard_to_regex(payload, false)?,
            _ => payload.to_string(),
        };
        fragments.push(fragment);
        cursor = whole.end();
    }
    fragments.push(regex::escape(&text[cursor..]));

    let pattern = fragments.concat();
    if pattern.is_empty() {
        return Err(LookupError::EmptyPattern {
            text: text.to_string(),
        });
    }

    // Anchor both ends unless the composed edges already carry anchors.
    let head = if pattern.starts_with('^') { "" } else { "^" };
    let tail = if pattern.ends_with('$') { "" } else { "$" };
    let flag = if ignorecase { "(?i)" } else { "" };
    Ok(Side::Pattern(format!("{}{}{}{}", flag, head, pattern, tail)))
}

/// Parses a directive-free side: a bare predicate call, or a verbatim
/// literal otherwise.
fn parse_plain(text: &str) -> Side {
    if let Some(found) = CUSTOM_CALL_RE.captures(text) {
        let name = found["name"].to_ascii_lowercase();
        let valid = !name.contains("not_");
        let base = name.strip_prefix("is_").unwrap_or(&name);
        let base = base.strip_prefix("not_").unwrap_or(base);
        if let Some(check) = CustomCheck::from_keyword(base) {
            return Side::Predicate(ValuePredicate::Custom { check, valid });
        }
    }

    if let Some(found) = NUMBER_CALL_RE.captures(text) {
        let op = CompareOp::from_keyword(&found["op"]);
        let other = found["other"].parse::<f64>().ok();
        if let (Some(op), Some(other)) = (op, other) {
            return Side::Predicate(ValuePredicate::CompareNumber { op, other });
        }
    }

    if let Some(found) = EQUALITY_CALL_RE.captures(text) {
        if let Some(op) = CompareOp::from_keyword(&found["op"]) {
            return Side::Predicate(ValuePredicate::Compare {
                op,
                other: found["other"].to_string(),
            });
        }
    }

    Side::Pattern(format!("^{}$", regex::escape(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Number;

    #[test]
    fn test_plain_literal_is_anchored() {
        let lookup = Lookup::compile("name").unwrap();
        assert!(lookup.is_left_matched("name"));
        assert!(!lookup.is_left_matched("hostname"));
        assert!(!lookup.is_left_matched("names"));
        assert!(!lookup.has_right());
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let lookup = Lookup::compile("key=a=b").unwrap();
        assert!(lookup.is_left_matched("key"));
        assert!(lookup.is_right_matched(&Value::String("a=b".to_string())));
        assert!(!lookup.is_right_matched(&Value::String("a".to_string())));
    }

    #[test]
    fn test_case_insensitive_text_directive() {
        let lookup = Lookup::compile("_itext(ABC)").unwrap();
        assert!(lookup.is_left_matched("abc"));
        assert!(lookup.is_left_matched("ABC"));
        assert!(lookup.is_left_matched("AbC"));
        assert!(!lookup.is_left_matched("ab"));
    }

    #[test]
    fn test_wildcard_directive() {
        let lookup = Lookup::compile("_wildcard(a?c*)").unwrap();
        assert!(lookup.is_left_matched("abc"));
        assert!(lookup.is_left_matched("abcxyz"));
        assert!(!lookup.is_left_matched("ac"));
    }

    #[test]
    fn test_regex_directive_passthrough() {
        let lookup = Lookup::compile("_regex(eth[0-9]+)").unwrap();
        assert!(lookup.is_left_matched("eth12"));
        assert!(!lookup.is_left_matched("eth"));
    }

    #[test]
    fn test_directives_with_literal_text_between() {
        let lookup = Lookup::compile("intf _regex([0-9]) label").unwrap();
        assert!(lookup.is_left_matched("intf 3 label"));
        assert!(!lookup.is_left_matched("intf x label"));
    }

    #[test]
    fn test_text_directive_escapes_metacharacters() {
        let lookup = Lookup::compile("_text(a.b)").unwrap();
        assert!(lookup.is_left_matched("a.b"));
        assert!(!lookup.is_left_matched("axb"));
    }

    #[test]
    fn test_caller_anchors_not_doubled() {
        let lookup = Lookup::compile("_regex(^eth$)").unwrap();
        assert!(lookup.is_left_matched("eth"));
        assert!(!lookup.is_left_matched("eth0"));
    }

    #[test]
    fn test_right_pattern_requires_string_value() {
        let lookup = Lookup::compile("count=5").unwrap();
        assert!(lookup.is_right_matched(&Value::String("5".to_string())));
        assert!(!lookup.is_right_matched(&Value::Number(Number::Integer(5))));
    }

    #[test]
    fn test_right_custom_predicate() {
        let lookup = Lookup::compile("status=is_not_empty()").unwrap();
        assert!(lookup.is_right_matched(&Value::String("up".to_string())));
        assert!(!lookup.is_right_matched(&Value::String(String::new())));
        assert!(!lookup.is_right_matched(&Value::Null));
    }

    #[test]
    fn test_right_numeric_comparison() {
        let lookup = Lookup::compile("mtu=ge(1500)").unwrap();
        assert!(lookup.is_right_matched(&Value::Number(Number::Integer(9000))));
        assert!(lookup.is_right_matched(&Value::Number(Number::Integer(1500))));
        assert!(!lookup.is_right_matched(&Value::Number(Number::Integer(1400))));
        // numeric strings are coerced
        assert!(lookup.is_right_matched(&Value::String("1600".to_string())));
    }

    #[test]
    fn test_right_string_equality_call() {
        let lookup = Lookup::compile("state=ne(down)").unwrap();
        assert!(lookup.is_right_matched(&Value::String("up".to_string())));
        assert!(!lookup.is_right_matched(&Value::String("down".to_string())));
    }

    #[test]
    fn test_left_predicate_call_rejected() {
        let err = Lookup::compile("gt(5)=x").unwrap_err();
        assert!(matches!(err, LookupError::LeftSidePredicate { .. }));
    }

    #[test]
    fn test_invalid_regex_directive_fails() {
        let err = Lookup::compile("_regex(() ").unwrap_err();
        assert!(matches!(err, LookupError::InvalidPattern { .. }));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let first = Lookup::compile("_iwildcard(eth*)=is_not_empty()").unwrap();
        let second = Lookup::compile("_iwildcard(eth*)=is_not_empty()").unwrap();
        for label in ["eth0", "ETH9", "lo", ""] {
            assert_eq!(first.is_left_matched(label), second.is_left_matched(label));
        }
        for value in [
            Value::String("x".to_string()),
            Value::String(String::new()),
            Value::Null,
        ] {
            assert_eq!(first.is_right_matched(&value), second.is_right_matched(&value));
        }
    }

    #[test]
    fn test_compiled_lookup_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lookup>();
    }

    #[test]
    fn test_empty_side_matches_only_empty_label() {
        let lookup = Lookup::compile("").unwrap();
        assert!(lookup.is_left_matched(""));
        assert!(!lookup.is_left_matched("a"));
    }
}
