//! JSON/YAML document loading.
//!
//! Loaders read a document from disk or memory, decode it, and wrap it in a
//! [`DataQuery`]. Files ending in `.gz` are decompressed on the fly.
//!
//! # Examples
//!
//! ```no_run
//! use dataquill::file::loader::from_yaml_file;
//!
//! let query = from_yaml_file("inventory.yaml").unwrap();
//! let addrs = query.find("addr", "").unwrap();
//! ```

use crate::document::parser::{parse_json, parse_yaml};
use crate::query::DataQuery;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads and parses a JSON file from the filesystem.
///
/// # Errors
///
/// Returns an error if the file cannot be read (or decompressed) or its
/// contents are not valid JSON.
pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<DataQuery> {
    let content = read_document(path.as_ref())?;
    let data = parse_json(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.as_ref().display()))?;
    Ok(DataQuery::new(data))
}

/// Loads and parses a YAML file from the filesystem.
///
/// # Errors
///
/// Returns an error if the file cannot be read (or decompressed) or its
/// contents are not valid YAML.
pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<DataQuery> {
    let content = read_document(path.as_ref())?;
    let data = parse_yaml(&content)
        .with_context(|| format!("Failed to parse YAML from {}", path.as_ref().display()))?;
    Ok(DataQuery::new(data))
}

/// Parses a JSON string into a [`DataQuery`].
pub fn from_json_str(text: &str) -> Result<DataQuery> {
    Ok(DataQuery::new(parse_json(text)?))
}

/// Parses a YAML string into a [`DataQuery`].
pub fn from_yaml_str(text: &str) -> Result<DataQuery> {
    Ok(DataQuery::new(parse_yaml(text)?))
}

/// Reads a document, decompressing when the path carries a `.gz` extension.
fn read_document(path: &Path) -> Result<String> {
    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file =
        fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to decompress {}", path.display()))?;
    Ok(content)
}
