//! Unary value checks: emptiness, address formats, booleans.

use super::ValidationError;
use crate::document::node::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Six colon- or dash-separated hex octets, or three dotted hex quads.
static MAC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4}$",
    )
    .expect("MAC pattern is valid")
});

/// A named unary check, as referenced by `is_*()` lookup calls and
/// `is`/`is_not` select conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomCheck {
    Empty,
    MacAddress,
    IpAddress,
    Ipv4Address,
    Ipv6Address,
    True,
    False,
}

impl CustomCheck {
    /// Resolves a keyword (without `is_`/`not_` prefixes) to a check.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "empty" => Some(CustomCheck::Empty),
            "mac_address" => Some(CustomCheck::MacAddress),
            "ip_address" => Some(CustomCheck::IpAddress),
            "ipv4_address" => Some(CustomCheck::Ipv4Address),
            "ipv6_address" => Some(CustomCheck::Ipv6Address),
            "true" => Some(CustomCheck::True),
            "false" => Some(CustomCheck::False),
            _ => None,
        }
    }

    /// Evaluates the bare property on a value. Address checks demand a
    /// string, boolean checks a boolean; anything else is not checkable.
    pub fn check(&self, value: &Value) -> Result<bool, ValidationError> {
        match self {
            CustomCheck::Empty => Ok(is_empty(value)),
            CustomCheck::MacAddress => {
                require_str(value, "a MAC address string").map(|s| MAC_RE.is_match(s))
            }
            CustomCheck::IpAddress => {
                require_str(value, "an IP address string").map(|s| s.parse::<IpAddr>().is_ok())
            }
            CustomCheck::Ipv4Address => {
                require_str(value, "an IPv4 address string").map(|s| s.parse::<Ipv4Addr>().is_ok())
            }
            CustomCheck::Ipv6Address => {
                require_str(value, "an IPv6 address string").map(|s| s.parse::<Ipv6Addr>().is_ok())
            }
            CustomCheck::True => require_bool(value),
            CustomCheck::False => require_bool(value).map(|b| !b),
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}

fn require_str<'v>(value: &'v Value, expected: &'static str) -> Result<&'v str, ValidationError> {
    value.as_str().ok_or(ValidationError::UnsupportedValue {
        expected,
        found: value.type_name(),
    })
}

fn require_bool(value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        other => Err(ValidationError::UnsupportedValue {
            expected: "a boolean",
            found: other.type_name(),
        }),
    }
}
