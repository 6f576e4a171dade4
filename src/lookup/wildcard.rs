//! Wildcard-to-regex translation.
//!
//! Wildcard support:
//! - `?` matches exactly one character
//! - `*` matches zero or more characters
//! - `[...]` is a character class, passed through verbatim
//! - `[!...]` is a negated character class

use super::error::LookupError;
use regex::Regex;

/// Converts a wildcard pattern into a regular-expression string.
///
/// With `anchored` set, the result is wrapped in `^`/`$`.
///
/// # Example
///
/// ```
/// use dataquill::lookup::wildcard_to_regex;
///
/// assert_eq!(wildcard_to_regex("a?c*", false).unwrap(), "a.c.*");
/// assert_eq!(wildcard_to_regex("eth[!0-3]", true).unwrap(), "^eth[^0-3]$");
/// ```
pub fn wildcard_to_regex(pattern: &str, anchored: bool) -> Result<String, LookupError> {
    // Literal `.` and `+` are escaped before the wildcard expansion so the
    // `.`/`.*` produced below are never escaped themselves.
    let mut converted = pattern.replace('.', r"\.");
    converted = converted.replace('+', r"\+");
    converted = converted.replace('?', ".");
    converted = converted.replace('*', ".*");
    converted = converted.replace("[!", "[^");
    if anchored {
        converted = format!("^{}$", converted);
    }

    if let Err(err) = Regex::new(&converted) {
        return Err(LookupError::WildcardConversion {
            wildcard: pattern.to_string(),
            attempted: converted,
            message: err.to_string(),
        });
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str) -> Regex {
        Regex::new(&wildcard_to_regex(pattern, true).unwrap()).unwrap()
    }

    #[test]
    fn test_question_mark_requires_one_character() {
        let re = matcher("a?c*");
        assert!(re.is_match("abc"));
        assert!(re.is_match("abcxyz"));
        assert!(!re.is_match("ac"));
    }

    #[test]
    fn test_star_matches_zero_or_more() {
        let re = matcher("eth*");
        assert!(re.is_match("eth"));
        assert!(re.is_match("eth0/1"));
        assert!(!re.is_match("Eth0"));
    }

    #[test]
    fn test_literal_dot_and_plus_escaped() {
        let re = matcher("10.0.+.?");
        assert!(re.is_match("10.0.+.1"));
        assert!(!re.is_match("10x0x+x1"));
    }

    #[test]
    fn test_negated_character_class() {
        let re = matcher("eth[!0-3]");
        assert!(re.is_match("eth4"));
        assert!(!re.is_match("eth2"));
    }

    #[test]
    fn test_character_class_passthrough() {
        let re = matcher("eth[0-3]");
        assert!(re.is_match("eth2"));
        assert!(!re.is_match("eth9"));
    }

    #[test]
    fn test_unanchored_result() {
        assert_eq!(wildcard_to_regex("a*b", false).unwrap(), "a.*b");
    }

    #[test]
    fn test_unbalanced_bracket_fails() {
        let err = wildcard_to_regex("abc[0-", false).unwrap_err();
        assert!(matches!(err, LookupError::WildcardConversion { .. }));
    }
}
