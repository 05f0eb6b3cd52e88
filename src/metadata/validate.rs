//! Required-field path validation
//!
//! A required field is addressed by a slash-delimited path into a metadata
//! block (`author/name`). The generic value form of the block is flattened
//! into concrete leaf paths, numeric index segments of repeated elements
//! are stripped, and a required path passes when at least one matching
//! leaf holds a non-null value.

use serde_json::Value;

use crate::metadata::export::{object_value, Nulls};
use crate::metadata::object::MetadataObject;

/// Flattens a value tree into `(path, leaf)` pairs.
///
/// Object keys and array indices become path segments; only leaves (nulls
/// and scalars) are reported.
pub fn flatten(value: &Value) -> Vec<(String, &Value)> {
    let mut paths = Vec::new();
    collect_paths(value, String::new(), &mut paths);
    paths
}

fn collect_paths<'a>(value: &'a Value, prefix: String, out: &mut Vec<(String, &'a Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect_paths(child, join(&prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_paths(child, join(&prefix, &index.to_string()), out);
            }
        }
        leaf => out.push((prefix, leaf)),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}/{segment}")
    }
}

/// Removes all-digit segments from a path, so that indexed elements of
/// repeated fields compare equal to their schema path
/// (`author/0/name` → `author/name`).
pub fn strip_indices(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.chars().all(|c| c.is_ascii_digit()) || segment.is_empty())
        .collect::<Vec<&str>>()
        .join("/")
}

/// Checks a single required path against a metadata object.
///
/// Passes when at least one concretization of the path exists whose value
/// is non-null; fails when the path is absent or every concretization is
/// null.
pub fn required_field_present(object: &dyn MetadataObject, path: &str) -> bool {
    let value = object_value(object, Nulls::Keep);

    flatten(&value)
        .iter()
        .any(|(leaf_path, leaf)| strip_indices(leaf_path) == path && !leaf.is_null())
}
