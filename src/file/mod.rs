//! File I/O for query documents.
//!
//! This module loads JSON or YAML documents from disk or from strings into
//! ready-to-query [`crate::query::DataQuery`] values, with transparent
//! decompression for gzipped files.

pub mod loader;
