/// Declares a metadata type with its static field-descriptor table.
///
/// Each field is written as `ident: Type = kind "wireName"`, where `kind`
/// is one of `primitive`, `primitive_list`, `vocabulary`,
/// `vocabulary_list`, `compound`, or `compound_list`. Single-valued kinds
/// are stored as `Option<Type>`, list kinds as `Vec<Type>`.
///
/// Adding `(block = "name")` after the struct name marks the type as a
/// top-level metadata block and implements
/// [`MetadataBlock`](crate::metadata::object::MetadataBlock) for it;
/// nested compounds omit it.
///
/// ```
/// use easydataverse::metadata_object;
///
/// metadata_object! {
///     /// A project reference.
///     pub struct Project {
///         name: String = primitive "projectName",
///         level: i64 = primitive "projectLevel",
///     }
/// }
/// ```
#[macro_export]
macro_rules! metadata_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident (block = $block:literal) {
            $(
                $(#[$fmeta:meta])*
                $fident:ident : $ftype:ty = $kind:ident $wire:literal
            ),* $(,)?
        }
    ) => {
        $crate::metadata_object!(@define
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fident : $ftype = $kind $wire ),*
            }
        );

        impl $crate::metadata::object::MetadataBlock for $name {
            fn block_name(&self) -> &'static str {
                $block
            }

            fn as_object(&self) -> &dyn $crate::metadata::object::MetadataObject {
                self
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fident:ident : $ftype:ty = $kind:ident $wire:literal
            ),* $(,)?
        }
    ) => {
        $crate::metadata_object!(@define
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fident : $ftype = $kind $wire ),*
            }
        );
    };

    (@define
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fident:ident : $ftype:ty = $kind:ident $wire:literal
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $fident : $crate::metadata_object!(@stored $kind, $ftype),
            )*
        }

        impl $crate::metadata::object::MetadataObject for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            fn descriptors(&self) -> &'static [$crate::metadata::descriptor::FieldDescriptor] {
                &[
                    $(
                        $crate::metadata::descriptor::FieldDescriptor {
                            ident: stringify!($fident),
                            type_name: $wire,
                            type_class: $crate::metadata_object!(@class $kind),
                            multiple: $crate::metadata_object!(@multiple $kind),
                        },
                    )*
                ]
            }

            fn field(&self, index: usize) -> $crate::metadata::value::FieldValue<'_> {
                let mut current = 0usize;
                $(
                    if index == current {
                        return $crate::metadata_object!(@value $kind, self.$fident);
                    }
                    current += 1;
                )*
                let _ = current;
                $crate::metadata::value::FieldValue::Absent
            }
        }

        impl $crate::metadata::object::ObjectSchema for $name {
            fn schema() -> $crate::metadata::object::SchemaNode {
                $crate::metadata::object::SchemaNode {
                    name: stringify!($name),
                    fields: ::std::vec![
                        $(
                            $crate::metadata::object::SchemaField {
                                ident: stringify!($fident),
                                dtype: stringify!($ftype),
                                type_name: $wire,
                                type_class: $crate::metadata_object!(@class $kind),
                                multiple: $crate::metadata_object!(@multiple $kind),
                                children: $crate::metadata_object!(@children $kind, $ftype),
                            },
                        )*
                    ],
                }
            }
        }
    };

    (@stored primitive, $t:ty) => { ::std::option::Option<$t> };
    (@stored vocabulary, $t:ty) => { ::std::option::Option<$t> };
    (@stored compound, $t:ty) => { ::std::option::Option<$t> };
    (@stored primitive_list, $t:ty) => { ::std::vec::Vec<$t> };
    (@stored vocabulary_list, $t:ty) => { ::std::vec::Vec<$t> };
    (@stored compound_list, $t:ty) => { ::std::vec::Vec<$t> };

    (@class primitive) => { $crate::metadata::descriptor::TypeClass::Primitive };
    (@class primitive_list) => { $crate::metadata::descriptor::TypeClass::Primitive };
    (@class vocabulary) => { $crate::metadata::descriptor::TypeClass::ControlledVocabulary };
    (@class vocabulary_list) => { $crate::metadata::descriptor::TypeClass::ControlledVocabulary };
    (@class compound) => { $crate::metadata::descriptor::TypeClass::Compound };
    (@class compound_list) => { $crate::metadata::descriptor::TypeClass::Compound };

    (@multiple primitive) => { false };
    (@multiple vocabulary) => { false };
    (@multiple compound) => { false };
    (@multiple primitive_list) => { true };
    (@multiple vocabulary_list) => { true };
    (@multiple compound_list) => { true };

    (@value primitive, $field:expr) => {
        $crate::metadata::value::FieldValue::from_option(&$field)
    };
    (@value vocabulary, $field:expr) => {
        $crate::metadata::value::FieldValue::from_option(&$field)
    };
    (@value primitive_list, $field:expr) => {
        $crate::metadata::value::FieldValue::from_list(&$field)
    };
    (@value vocabulary_list, $field:expr) => {
        $crate::metadata::value::FieldValue::from_list(&$field)
    };
    (@value compound, $field:expr) => {
        match &$field {
            ::std::option::Option::Some(compound) => {
                $crate::metadata::value::FieldValue::Compound(compound)
            }
            ::std::option::Option::None => $crate::metadata::value::FieldValue::Absent,
        }
    };
    (@value compound_list, $field:expr) => {
        $crate::metadata::value::FieldValue::CompoundList(
            $field
                .iter()
                .map(|compound| compound as &dyn $crate::metadata::object::MetadataObject)
                .collect(),
        )
    };

    (@children compound, $t:ty) => {
        <$t as $crate::metadata::object::ObjectSchema>::schema().fields
    };
    (@children compound_list, $t:ty) => {
        <$t as $crate::metadata::object::ObjectSchema>::schema().fields
    };
    (@children $kind:ident, $t:ty) => { ::std::vec::Vec::new() };
}

/// Declares a controlled vocabulary enum.
///
/// Each variant maps to its underlying wire value, which is what all
/// serialized forms carry. The macro implements
/// [`ControlledVocabulary`](crate::metadata::value::ControlledVocabulary),
/// `Display`, `FromStr`, and string-based serde conversions.
///
/// ```
/// use easydataverse::controlled_vocabulary;
///
/// controlled_vocabulary! {
///     pub enum License {
///         CcBy => "CC BY 4.0",
///         Cc0 => "CC0 1.0",
///     }
/// }
/// ```
#[macro_export]
macro_rules! controlled_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $crate::metadata::value::ControlledVocabulary for $name {
            fn value(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )*
                }
            }
        }

        impl $crate::metadata::value::IntoScalar for $name {
            fn to_scalar(&self) -> $crate::metadata::value::Scalar {
                $crate::metadata::value::Scalar::Text(
                    $crate::metadata::value::ControlledVocabulary::value(self).to_string(),
                )
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(
                    f,
                    "{}",
                    $crate::metadata::value::ControlledVocabulary::value(self)
                )
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $value => ::std::result::Result::Ok($name::$variant), )*
                    other => ::std::result::Result::Err(::std::format!(
                        "'{}' is not a legal value for {}",
                        other,
                        stringify!($name),
                    )),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer
                    .serialize_str($crate::metadata::value::ControlledVocabulary::value(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let value =
                    <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                value.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}
