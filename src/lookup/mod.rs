//! Lookup-pattern compilation for structural search.
//!
//! A lookup string selects positions in a document by key and, optionally,
//! by value: `LEFT[=RIGHT]`. The left side matches key labels, the right
//! side matches or tests values; only the first `=` separates them.
//!
//! # Supported Syntax
//!
//! Each side is literal text, optionally interspersed with directives:
//!
//! - `_text(PATTERN)` - literal text, matched verbatim
//! - `_wildcard(PATTERN)` - `?`, `*`, `[...]`, `[!...]` wildcards
//! - `_regex(PATTERN)` - a raw regular expression fragment
//! - a leading `i` flag (`_itext(...)`, `_iwildcard(...)`, `_iregex(...)`)
//!   makes the whole side case-insensitive
//!
//! A right side with no directives may instead be a bare predicate call:
//!
//! - `is_empty()`, `is_not_empty()`, `is_mac_address()`, `is_ip_address()`,
//!   `is_ipv4_address()`, `is_ipv6_address()`, `is_true()`, `is_false()`
//!   and their `is_not_*` negations
//! - `lt(N)`, `le(N)`, `gt(N)`, `ge(N)`, `eq(N)`, `ne(N)` for numbers;
//!   `eq(TEXT)`, `ne(TEXT)` for anything else
//!
//! # Examples
//!
//! ```
//! use dataquill::lookup::Lookup;
//!
//! // any key ending in "addr" whose value starts with 10.
//! let lookup = Lookup::compile("_wildcard(*addr)=_regex(^10\\..*)").unwrap();
//! assert!(lookup.is_left_matched("ipv4_addr"));
//!
//! // any "status" key with a non-empty value
//! Lookup::compile("status=is_not_empty()").unwrap();
//! ```

pub mod compiler;
pub mod error;
pub mod wildcard;

pub use compiler::{Lookup, RightHand, ValuePredicate};
pub use error::LookupError;
pub use wildcard::wildcard_to_regex;
