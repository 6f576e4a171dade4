//! Document representation for nested JSON/YAML data.
//!
//! This module provides the crate's own decoded-document model: the [`node::Value`]
//! enum (maps, sequences, scalars, tagged values), conversion from `serde_json` and
//! `serde_yaml` values, and the [`tree::DataTree`] arena that wraps a `Value` with
//! parent links and kind classification for traversal.

pub mod node;
pub mod parser;
pub mod tree;
