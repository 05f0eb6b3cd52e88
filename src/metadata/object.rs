use std::fmt::Debug;

use colored::Colorize;

use crate::metadata::descriptor::{FieldDescriptor, TypeClass};
use crate::metadata::value::FieldValue;

/// The core trait of the metadata layer.
///
/// Implemented by every type declared through
/// [`metadata_object!`](crate::metadata_object). The engine only ever sees
/// this interface: a static descriptor table plus an index-based accessor
/// that exposes the runtime value of each declared field.
pub trait MetadataObject: Debug {
    /// The Rust type name, used as the XML root tag
    fn type_name(&self) -> &'static str;

    /// The static descriptor table, in declaration order
    fn descriptors(&self) -> &'static [FieldDescriptor];

    /// The runtime value of the field at `index` in the descriptor table
    fn field(&self, index: usize) -> FieldValue<'_>;
}

/// Capability trait for top-level metadata blocks.
///
/// Only types declared with `block = "..."` implement it; nested compounds
/// do not. Carrying a block name is what triggers the
/// `{ blockName: { fields: [...] } }` wrapping during serialization.
pub trait MetadataBlock: MetadataObject {
    /// The wire name of the metadata block (e.g. "citation")
    fn block_name(&self) -> &'static str;

    /// Upcast to the plain object interface
    fn as_object(&self) -> &dyn MetadataObject;
}

/// Static access to a metadata type's schema.
///
/// Implemented by the macro for every declared type; used for the tree
/// rendering and to drive hydration from the wire format.
pub trait ObjectSchema {
    /// Returns the static schema description of this type.
    fn schema() -> SchemaNode;
}

/// A static description of a metadata type's schema, used for the
/// human-readable tree rendering.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// The Rust type name of the object
    pub name: &'static str,
    /// The declared fields, in declaration order
    pub fields: Vec<SchemaField>,
}

/// One field entry within a [`SchemaNode`]
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// The snake_case attribute name
    pub ident: &'static str,
    /// The Rust type the field stores (without the Option/Vec wrapper)
    pub dtype: &'static str,
    /// The wire name of the field
    pub type_name: &'static str,
    /// The Dataverse type class of the field
    pub type_class: TypeClass,
    /// Whether the field holds a list of values
    pub multiple: bool,
    /// Sub-fields for compound fields, empty otherwise
    pub children: Vec<SchemaField>,
}

impl SchemaNode {
    /// Renders the schema as an indented tree.
    ///
    /// The root carries the type name, each line below it one field with
    /// its Rust type, wire name, and type class. Compound fields nest.
    pub fn render(&self) -> String {
        let root = if atty::is(atty::Stream::Stdout) {
            self.name.bold().to_string()
        } else {
            self.name.to_string()
        };

        let mut out = root;
        out.push('\n');
        render_fields(&self.fields, "", &mut out);
        out
    }
}

fn render_fields(fields: &[SchemaField], prefix: &str, out: &mut String) {
    for (position, field) in fields.iter().enumerate() {
        let last = position == fields.len() - 1;
        let connector = if last { "└── " } else { "├── " };
        let multiplicity = if field.multiple { "multiple" } else { "single" };

        out.push_str(&format!(
            "{}{}{}: {} [{}, {}, {}]\n",
            prefix, connector, field.ident, field.dtype, field.type_name, field.type_class, multiplicity,
        ));

        if !field.children.is_empty() {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_fields(&field.children, &child_prefix, out);
        }
    }
}
