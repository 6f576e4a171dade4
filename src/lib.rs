//! dataquill — structural lookup over nested JSON/YAML data.
//!
//! dataquill wraps a decoded document (maps, sequences, scalars) and lets
//! you search it with a compact lookup language: the left of a single `=`
//! matches key labels by literal text, wildcard, or regex; the right matches
//! or tests values; a select statement projects the matches into raw
//! values, whole parent records, or a chosen subset of columns.
//!
//! # Example
//!
//! ```
//! use dataquill::file::loader::from_json_str;
//!
//! let query = from_json_str(
//!     r#"{"interfaces": [
//!         {"name": "eth0", "state": "up", "mtu": 1500},
//!         {"name": "eth1", "state": "down", "mtu": 9000}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! // every "name" under an interface record whose state is up
//! let names = query.find("name", "name WHERE state eq up").unwrap();
//! assert_eq!(names.len(), 1);
//! ```

pub mod accessor;
pub mod document;
pub mod file;
pub mod lookup;
pub mod query;
pub mod select;
pub mod validation;

pub use accessor::AccessError;
pub use document::node::{NodeKind, Number, Value};
pub use lookup::{Lookup, LookupError};
pub use query::{DataQuery, QueryError};
pub use select::{SelectError, SelectStatement};
