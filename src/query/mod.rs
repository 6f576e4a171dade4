//! Query execution: the [`DataQuery`] facade over finding, projection, and
//! indexed access.
//!
//! A query call is pure and synchronous: it builds a fresh tree over the
//! wrapped data, compiles the lookup once, walks the tree collecting
//! matches, and projects them through the select statement. Nothing is
//! cached across calls.
//!
//! # Example
//!
//! ```
//! use dataquill::document::parser::parse_json;
//! use dataquill::query::DataQuery;
//! use dataquill::Value;
//!
//! let data = parse_json(r#"{"hosts": [{"name": "a"}, {"name": "b"}]}"#).unwrap();
//! let query = DataQuery::new(data);
//!
//! let names = query.find("name", "").unwrap();
//! assert_eq!(
//!     names,
//!     vec![
//!         Value::String("a".to_string()),
//!         Value::String("b".to_string()),
//!     ]
//! );
//! ```

pub mod finder;
pub mod project;

use crate::accessor::{self, AccessError};
use crate::document::node::Value;
use crate::document::tree::DataTree;
use crate::lookup::{Lookup, LookupError};
use crate::select::{SelectError, SelectStatement};
use std::fmt;

/// Errors surfaced by [`DataQuery::find`].
#[derive(Debug)]
pub enum QueryError {
    Lookup(LookupError),
    Select(SelectError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Lookup(err) => write!(f, "{}", err),
            QueryError::Select(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Lookup(err) => Some(err),
            QueryError::Select(err) => Some(err),
        }
    }
}

impl From<LookupError> for QueryError {
    fn from(err: LookupError) -> Self {
        QueryError::Lookup(err)
    }
}

impl From<SelectError> for QueryError {
    fn from(err: SelectError) -> Self {
        QueryError::Select(err)
    }
}

/// Wraps a decoded document for querying.
pub struct DataQuery {
    data: Value,
}

impl DataQuery {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn is_object(&self) -> bool {
        self.data.is_object()
    }

    pub fn is_array(&self) -> bool {
        self.data.is_array()
    }

    /// Number of top-level entries; zero for scalar data.
    pub fn len(&self) -> usize {
        match &self.data {
            Value::Object(entries) => entries.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recursively searches the wrapped data for positions matching
    /// `lookup`, projected through `select`. Malformed lookup or select
    /// strings fail fast; a valid query over non-matching data returns an
    /// empty vector.
    pub fn find(&self, lookup: &str, select: &str) -> Result<Vec<Value>, QueryError> {
        let compiled = Lookup::compile(lookup)?;
        let statement = SelectStatement::parse(select)?;
        let tree = DataTree::build(&self.data);
        let matches = finder::find(&tree, &compiled);
        Ok(project::project(&tree, &matches, &statement))
    }

    /// Resolves an index expression against the wrapped data; see
    /// [`crate::accessor::get`].
    pub fn get(
        &self,
        index: &str,
        default: Value,
        on_exception: bool,
    ) -> Result<Value, AccessError> {
        accessor::get(&self.data, index, default, on_exception)
    }

    /// Like [`DataQuery::get`] with failures converted to the default.
    pub fn get_or(&self, index: &str, default: Value) -> Value {
        accessor::get_or(&self.data, index, default)
    }

    /// Like [`DataQuery::get`] with failures surfaced; absent map keys
    /// still resolve to null rather than an error.
    pub fn try_get(&self, index: &str) -> Result<Value, AccessError> {
        accessor::try_get(&self.data, index)
    }
}
