//! Generic format exporters for metadata objects
//!
//! These functions render a metadata object into representations that are
//! independent of the Dataverse wire format: a plain JSON value tree, JSON
//! and YAML documents, and an XML document with PascalCase tag names. The
//! inverse direction (hydrating typed objects from the generic JSON/YAML
//! form) lives here too.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::metadata::object::MetadataObject;
use crate::metadata::value::FieldValue;

/// Controls whether unset attributes appear as explicit nulls.
///
/// Exporters elide them; the required-field validator keeps them so that
/// "present but null" is distinguishable from "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nulls {
    Exclude,
    Keep,
}

/// Builds the generic value form of a metadata object.
///
/// Keys are the snake_case attribute idents in declaration order. Empty
/// lists and empty compounds are elided in both modes; unset scalar and
/// compound attributes are elided or kept as nulls depending on `nulls`.
pub(crate) fn object_value(object: &dyn MetadataObject, nulls: Nulls) -> Value {
    let mut map = Map::new();

    for (index, descriptor) in object.descriptors().iter().enumerate() {
        match object.field(index) {
            FieldValue::Absent => {
                if nulls == Nulls::Keep {
                    map.insert(descriptor.ident.to_string(), Value::Null);
                }
            }
            FieldValue::Scalar(scalar) => {
                map.insert(descriptor.ident.to_string(), scalar.generic_value());
            }
            FieldValue::ScalarList(scalars) => {
                if !scalars.is_empty() {
                    let values = scalars.iter().map(|s| s.generic_value()).collect();
                    map.insert(descriptor.ident.to_string(), Value::Array(values));
                }
            }
            FieldValue::Compound(compound) => {
                let value = object_value(compound, nulls);
                let empty = match nulls {
                    Nulls::Exclude => is_empty_object(&value),
                    Nulls::Keep => is_empty_object(&object_value(compound, Nulls::Exclude)),
                };
                if !empty {
                    map.insert(descriptor.ident.to_string(), value);
                }
            }
            FieldValue::CompoundList(compounds) => {
                if !compounds.is_empty() {
                    let values = compounds.iter().map(|c| object_value(*c, nulls)).collect();
                    map.insert(descriptor.ident.to_string(), Value::Array(values));
                }
            }
        }
    }

    Value::Object(map)
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().map_or(false, |map| map.is_empty())
}

/// Returns the generic dict form with null and empty attributes removed.
pub fn to_value(object: &dyn MetadataObject) -> Value {
    object_value(object, Nulls::Exclude)
}

/// Returns a JSON document of the generic form, indented by two spaces.
///
/// Any top-level key that still holds an empty list after encoding is
/// removed again before printing.
pub fn to_json(object: &dyn MetadataObject) -> String {
    let value = drop_empty_top_level_lists(to_value(object));
    serde_json::to_string_pretty(&value).expect("metadata value is always serializable")
}

pub(crate) fn drop_empty_top_level_lists(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !matches!(v, Value::Array(items) if items.is_empty()))
                .collect(),
        ),
        other => other,
    }
}

/// Returns a YAML document of the generic form in block style.
pub fn to_yaml(object: &dyn MetadataObject) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&to_value(object))
}

/// Returns an XML document of the generic form.
///
/// Every key at every nesting depth is transposed from snake_case to
/// PascalCase; the root tag is the object's type name.
pub fn to_xml(object: &dyn MetadataObject) -> String {
    let value = keys_to_camel(&to_value(object));
    unparse_xml(object.type_name(), &value)
}

/// Transposes a snake_case word to PascalCase.
///
/// Each `_`-separated segment is capitalized (rest lowercased) and the
/// segments are joined without a separator. An empty segment, as produced
/// by consecutive underscores, yields a literal underscore:
/// `a__b` becomes `A_B`.
pub fn snake_to_camel(word: &str) -> String {
    word.split('_')
        .map(|segment| match segment.chars().next() {
            None => "_".to_string(),
            Some(first) => {
                first.to_uppercase().collect::<String>() + &segment[first.len_utf8()..].to_lowercase()
            }
        })
        .collect()
}

/// Recursively transposes every object key to PascalCase, descending into
/// arrays as well.
pub(crate) fn keys_to_camel(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| (snake_to_camel(key), keys_to_camel(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(keys_to_camel).collect()),
        other => other.clone(),
    }
}

/// Renders a JSON value tree as a pretty-printed XML document.
///
/// List values repeat their parent tag, scalars become text content, and
/// nulls render as empty elements. Indentation is four spaces per level.
pub(crate) fn unparse_xml(root: &str, value: &Value) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(root, value, 0, &mut out);
    out
}

fn write_element(name: &str, value: &Value, depth: usize, out: &mut String) {
    let indent = "    ".repeat(depth);

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(name, item, depth, out);
            }
        }
        Value::Object(map) if !map.is_empty() => {
            out.push_str(&format!("{indent}<{name}>\n"));
            for (key, child) in map {
                write_element(key, child, depth + 1, out);
            }
            out.push_str(&format!("{indent}</{name}>\n"));
        }
        Value::Object(_) | Value::Null => {
            out.push_str(&format!("{indent}<{name}></{name}>\n"));
        }
        Value::String(text) => {
            out.push_str(&format!("{indent}<{name}>{}</{name}>\n", escape_xml(text)));
        }
        scalar => {
            out.push_str(&format!("{indent}<{name}>{scalar}</{name}>\n"));
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Hydrates a typed object from the generic JSON form.
pub fn from_json_str<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(content)
}

/// Hydrates a typed object from the generic YAML form.
pub fn from_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Hydrates a typed object from a JSON file.
pub fn from_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Hydrates a typed object from a YAML file.
pub fn from_yaml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
