use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The Dataverse type class of a metadata field.
///
/// Every field wrapper on the wire carries one of these three markers.
/// Primitive fields hold scalar values, compound fields hold nested
/// sub-objects, and controlled vocabulary fields are restricted to a
/// fixed set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeClass {
    /// A scalar-valued field (text, number, date, ...)
    #[serde(rename = "primitive")]
    Primitive,
    /// A field whose value is a nested sub-object
    #[serde(rename = "compound")]
    Compound,
    /// A field whose values are restricted to a fixed enumeration
    #[serde(rename = "controlledVocabulary")]
    ControlledVocabulary,
}

impl TypeClass {
    /// Returns the wire representation of the type class
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeClass::Primitive => "primitive",
            TypeClass::Compound => "compound",
            TypeClass::ControlledVocabulary => "controlledVocabulary",
        }
    }
}

impl Display for TypeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static per-field metadata attached to every declared attribute of a
/// metadata type.
///
/// Descriptors are emitted as a compile-time table by the
/// [`metadata_object!`](crate::metadata_object) macro, so an attribute
/// without a descriptor cannot exist — the engine iterates the table and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The snake_case attribute name, used for the generic dict/XML forms
    pub ident: &'static str,
    /// The wire name (`typeName`) used in the Dataverse JSON shape
    pub type_name: &'static str,
    /// The Dataverse type class of the field
    pub type_class: TypeClass,
    /// Whether the field holds a list of values
    pub multiple: bool,
}
