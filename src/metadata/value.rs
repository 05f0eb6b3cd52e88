use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::metadata::object::MetadataObject;

/// A scalar value held by a primitive or controlled-vocabulary field.
///
/// The two renderings differ: the generic form keeps native JSON types,
/// while the Dataverse wire form stringifies everything except mappings
/// (dates as `YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    /// A free-form JSON mapping, passed through unchanged on the wire
    Mapping(Map<String, Value>),
}

impl Scalar {
    /// Renders the scalar for the Dataverse wire format.
    pub fn wire_value(&self) -> Value {
        match self {
            Scalar::Text(s) => Value::String(s.clone()),
            Scalar::Int(i) => Value::String(i.to_string()),
            Scalar::Float(f) => Value::String(f.to_string()),
            Scalar::Bool(b) => Value::String(b.to_string()),
            Scalar::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Scalar::Mapping(m) => Value::Object(m.clone()),
        }
    }

    /// Renders the scalar for the generic dict/JSON/YAML/XML forms.
    pub fn generic_value(&self) -> Value {
        match self {
            Scalar::Text(s) => Value::String(s.clone()),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => Value::from(*f),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Scalar::Mapping(m) => Value::Object(m.clone()),
        }
    }
}

/// Conversion of field storage types into [`Scalar`]s.
///
/// Implemented for the scalar types a primitive field may hold and, via
/// [`controlled_vocabulary!`](crate::controlled_vocabulary), for every
/// generated vocabulary enum (yielding the underlying wire value, not the
/// variant name).
pub trait IntoScalar {
    fn to_scalar(&self) -> Scalar;
}

impl IntoScalar for String {
    fn to_scalar(&self) -> Scalar {
        Scalar::Text(self.clone())
    }
}

impl IntoScalar for i64 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Int(*self)
    }
}

impl IntoScalar for f64 {
    fn to_scalar(&self) -> Scalar {
        Scalar::Float(*self)
    }
}

impl IntoScalar for bool {
    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }
}

impl IntoScalar for NaiveDate {
    fn to_scalar(&self) -> Scalar {
        Scalar::Date(*self)
    }
}

impl IntoScalar for Map<String, Value> {
    fn to_scalar(&self) -> Scalar {
        Scalar::Mapping(self.clone())
    }
}

/// A borrowed view on the runtime value of a single declared field.
///
/// Produced by the macro-generated `MetadataObject::field` accessors and
/// consumed by the serialization engine, the exporters, and the validator.
pub enum FieldValue<'a> {
    /// The attribute is unset (`None`)
    Absent,
    /// A single scalar value
    Scalar(Scalar),
    /// A list of scalar values (possibly empty)
    ScalarList(Vec<Scalar>),
    /// A single nested sub-object
    Compound(&'a dyn MetadataObject),
    /// A list of nested sub-objects (possibly empty)
    CompoundList(Vec<&'a dyn MetadataObject>),
}

impl<'a> FieldValue<'a> {
    /// Builds a field value from an optional scalar attribute.
    pub fn from_option<T: IntoScalar>(value: &Option<T>) -> Self {
        match value {
            Some(v) => FieldValue::Scalar(v.to_scalar()),
            None => FieldValue::Absent,
        }
    }

    /// Builds a field value from a list-valued scalar attribute.
    pub fn from_list<T: IntoScalar>(values: &[T]) -> Self {
        FieldValue::ScalarList(values.iter().map(IntoScalar::to_scalar).collect())
    }
}

/// Marker for enums generated by
/// [`controlled_vocabulary!`](crate::controlled_vocabulary).
///
/// `value` returns the underlying wire value of the variant, which is what
/// ends up in every serialized form.
pub trait ControlledVocabulary {
    fn value(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_wire_value_is_iso_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            Scalar::Date(date).wire_value(),
            Value::String("2024-03-07".to_string())
        );
    }

    #[test]
    fn test_numbers_are_stringified_on_the_wire() {
        assert_eq!(Scalar::Int(42).wire_value(), Value::String("42".into()));
        assert_eq!(
            Scalar::Bool(true).wire_value(),
            Value::String("true".into())
        );
    }

    #[test]
    fn test_numbers_stay_typed_in_generic_form() {
        assert_eq!(Scalar::Int(42).generic_value(), Value::from(42));
        assert_eq!(Scalar::Bool(true).generic_value(), Value::Bool(true));
    }

    #[test]
    fn test_mapping_passes_through_unchanged() {
        let mut map = Map::new();
        map.insert("key".to_string(), Value::from(1));

        let scalar = map.to_scalar();
        assert_eq!(scalar.wire_value(), Value::Object(map.clone()));
        assert_eq!(scalar.generic_value(), Value::Object(map));
    }

    #[test]
    fn test_from_option_absent() {
        let value: Option<String> = None;
        assert!(matches!(
            FieldValue::from_option(&value),
            FieldValue::Absent
        ));
    }
}
