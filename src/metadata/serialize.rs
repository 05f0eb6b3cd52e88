//! The Dataverse wire serialization engine
//!
//! Converts metadata objects into the field-wrapped JSON shape expected by
//! the native API: every populated attribute becomes a
//! `{ multiple, typeClass, typeName, value }` wrapper, and objects carrying
//! a block name are additionally wrapped as
//! `{ blockName: { "fields": [...] } }`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::metadata::descriptor::TypeClass;
use crate::metadata::export::{self, Nulls};
use crate::metadata::object::{MetadataBlock, MetadataObject, ObjectSchema, SchemaField};
use crate::metadata::value::FieldValue;

/// Checks whether a field value counts as empty and is elided from the
/// wire format.
///
/// Empty means: the attribute is unset, the list has no elements, or the
/// nested compound's null-excluded generic form is an empty object.
pub fn is_empty(value: &FieldValue) -> bool {
    match value {
        FieldValue::Absent => true,
        FieldValue::ScalarList(scalars) => scalars.is_empty(),
        FieldValue::CompoundList(compounds) => compounds.is_empty(),
        FieldValue::Compound(compound) => match export::object_value(*compound, Nulls::Exclude) {
            Value::Object(map) => map.is_empty(),
            _ => false,
        },
        FieldValue::Scalar(_) => false,
    }
}

/// Builds the bare field mapping of a metadata object, keyed by wire name.
///
/// This is the recursion step of the engine: nested compounds use the
/// resulting mapping directly as their wrapper's `value`, without any
/// block-level wrapping.
pub fn field_mapping(object: &dyn MetadataObject) -> Map<String, Value> {
    let mut mapping = Map::new();

    for (index, descriptor) in object.descriptors().iter().enumerate() {
        let value = object.field(index);

        if is_empty(&value) {
            continue;
        }

        let mut wrapper = Map::new();
        wrapper.insert("multiple".to_string(), Value::Bool(descriptor.multiple));
        wrapper.insert(
            "typeClass".to_string(),
            Value::String(descriptor.type_class.as_str().to_string()),
        );
        wrapper.insert(
            "typeName".to_string(),
            Value::String(descriptor.type_name.to_string()),
        );
        wrapper.insert("value".to_string(), normalize(&value));

        mapping.insert(descriptor.type_name.to_string(), Value::Object(wrapper));
    }

    mapping
}

/// Normalizes a field value for the `value` slot of its wrapper.
fn normalize(value: &FieldValue) -> Value {
    match value {
        FieldValue::Scalar(scalar) => scalar.wire_value(),
        FieldValue::ScalarList(scalars) => {
            Value::Array(scalars.iter().map(|s| s.generic_value()).collect())
        }
        FieldValue::Compound(compound) => Value::Object(field_mapping(*compound)),
        FieldValue::CompoundList(compounds) => Value::Array(
            compounds
                .iter()
                .map(|c| Value::Object(field_mapping(*c)))
                .collect(),
        ),
        FieldValue::Absent => Value::Null,
    }
}

/// Builds the wire value of a metadata block.
///
/// The block wrapper `{ blockName: { "fields": [...] } }` is only applied
/// when at least one field was produced; an all-empty block renders as an
/// empty object.
pub fn block_value(block: &dyn MetadataBlock) -> Value {
    let mapping = field_mapping(block);

    if mapping.is_empty() {
        return Value::Object(Map::new());
    }

    let fields: Vec<Value> = mapping.into_iter().map(|(_, wrapper)| wrapper).collect();

    let mut inner = Map::new();
    inner.insert("fields".to_string(), Value::Array(fields));

    let mut outer = Map::new();
    outer.insert(block.block_name().to_string(), Value::Object(inner));

    Value::Object(outer)
}

/// Returns the wire value of a block as a JSON document, indented by two
/// spaces.
pub fn block_json(block: &dyn MetadataBlock) -> String {
    serde_json::to_string_pretty(&block_value(block)).expect("wire value is always serializable")
}

/// Hydrates a typed metadata object from its wire value.
///
/// Accepts both the block-wrapped shape and a bare field mapping. The
/// schema of `T` maps wire names back to attribute idents; wrappers with
/// unknown wire names are skipped.
pub fn from_wire_value<T>(value: &Value) -> Result<T, serde_json::Error>
where
    T: ObjectSchema + DeserializeOwned,
{
    let schema = T::schema();
    let generic = wire_to_generic(&schema.fields, unwrap_block(value));
    serde_json::from_value(generic)
}

fn unwrap_block(value: &Value) -> &Value {
    if let Some(map) = value.as_object() {
        if map.len() == 1 {
            if let Some(fields) = map.values().next().and_then(|inner| inner.get("fields")) {
                return fields;
            }
        }
    }

    value
}

fn wire_to_generic(fields: &[SchemaField], wire: &Value) -> Value {
    let wrappers: Vec<&Value> = match wire {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    let mut generic = Map::new();

    for wrapper in wrappers {
        let Some(type_name) = wrapper.get("typeName").and_then(Value::as_str) else {
            continue;
        };
        let Some(field) = fields.iter().find(|field| field.type_name == type_name) else {
            continue;
        };
        let Some(value) = wrapper.get("value") else {
            continue;
        };

        let revived = match (field.type_class, value) {
            (TypeClass::Compound, Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| wire_to_generic(&field.children, item))
                    .collect(),
            ),
            (TypeClass::Compound, single) => wire_to_generic(&field.children, single),
            (_, Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| revive_scalar(field.dtype, item))
                    .collect(),
            ),
            (_, single) => revive_scalar(field.dtype, single),
        };

        generic.insert(field.ident.to_string(), revived);
    }

    Value::Object(generic)
}

// Numeric and boolean scalars are stringified on the wire; parse them
// back based on the declared field type.
fn revive_scalar(dtype: &str, value: &Value) -> Value {
    match (dtype, value) {
        ("i64", Value::String(text)) => text
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        ("f64", Value::String(text)) => text
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        ("bool", Value::String(text)) => text
            .parse::<bool>()
            .map(Value::Bool)
            .unwrap_or_else(|_| value.clone()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::blocks::citation::{Author, Citation, DatasetContact, Subject};

    use super::*;

    fn populated_citation() -> Citation {
        Citation {
            title: Some("Solar measurements".to_string()),
            author: vec![
                Author {
                    name: Some("Jane Doe".to_string()),
                    affiliation: Some("LUH".to_string()),
                    ..Default::default()
                },
                Author::default(),
            ],
            subject: vec![Subject::Physics],
            date_of_deposit: NaiveDate::from_ymd_opt(2024, 3, 7),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_attributes_are_elided() {
        let value = block_value(&populated_citation());
        let fields = value["citation"]["fields"].as_array().unwrap();

        // Only the populated attributes appear
        let names: Vec<&str> = fields
            .iter()
            .map(|f| f["typeName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["title", "author", "subject", "dateOfDeposit"]);
    }

    #[test]
    fn test_block_wrapping_only_when_fields_exist() {
        let empty = Citation::default();
        assert_eq!(block_value(&empty), serde_json::json!({}));
    }

    #[test]
    fn test_compound_list_serializes_member_mappings() {
        let value = block_value(&populated_citation());
        let fields = value["citation"]["fields"].as_array().unwrap();
        let author = fields
            .iter()
            .find(|f| f["typeName"] == "author")
            .unwrap();

        assert_eq!(author["typeClass"], "compound");
        assert_eq!(author["multiple"], true);

        let entries = author["value"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["authorName"]["value"], "Jane Doe");
        assert_eq!(entries[0]["authorAffiliation"]["value"], "LUH");
        // The all-empty author yields an empty mapping, not a wrapper set
        assert_eq!(entries[1], serde_json::json!({}));
    }

    #[test]
    fn test_vocabulary_list_uses_underlying_values() {
        let value = block_value(&populated_citation());
        let fields = value["citation"]["fields"].as_array().unwrap();
        let subject = fields
            .iter()
            .find(|f| f["typeName"] == "subject")
            .unwrap();

        assert_eq!(subject["typeClass"], "controlledVocabulary");
        assert_eq!(subject["value"], serde_json::json!(["Physics"]));
    }

    #[test]
    fn test_date_serializes_as_iso_day() {
        let value = block_value(&populated_citation());
        let fields = value["citation"]["fields"].as_array().unwrap();
        let deposit = fields
            .iter()
            .find(|f| f["typeName"] == "dateOfDeposit")
            .unwrap();

        assert_eq!(deposit["value"], "2024-03-07");
    }

    #[test]
    fn test_wire_roundtrip_reproduces_populated_fields() {
        let citation = populated_citation();

        let wire = block_value(&citation);
        let hydrated: Citation = from_wire_value(&wire).unwrap();

        assert_eq!(hydrated, citation);
    }

    #[test]
    fn test_from_wire_value_accepts_bare_field_mapping() {
        let citation = populated_citation();

        let mapping = Value::Object(field_mapping(&citation));
        let hydrated: Citation = from_wire_value(&mapping).unwrap();

        assert_eq!(hydrated.title, citation.title);
        assert_eq!(hydrated.author, citation.author);
    }

    #[test]
    fn test_empty_nested_compound_counts_as_empty() {
        let contact = DatasetContact::default();
        assert!(is_empty(&FieldValue::Compound(&contact)));

        let filled = DatasetContact {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        assert!(!is_empty(&FieldValue::Compound(&filled)));
    }
}
