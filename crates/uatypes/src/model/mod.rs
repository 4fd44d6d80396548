// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Technology-neutral type model built from a schema document.
//!
//! A [`TypeModel`] is the ordered list of records and enumerations found in
//! one dictionary. It is transient: the materializer turns it into
//! [`crate::dynamic::MaterializedType`]s and the model is dropped (or kept
//! around only to render a [`crate::manifest::Manifest`]).
//!
//! # Example
//!
//! ```rust
//! use uatypes::model::TypeModel;
//!
//! let model = TypeModel::from_xml(r#"
//!     <TypeDictionary>
//!       <StructuredType Name="Point">
//!         <Field Name="X" TypeName="opc:Int32" />
//!         <Field Name="Y" TypeName="opc:Int32" />
//!       </StructuredType>
//!     </TypeDictionary>"#).unwrap();
//!
//! let point = model.record("Point").unwrap();
//! assert_eq!(point.fields.len(), 2);
//! ```

mod builder;
mod defaults;

pub use builder::{ModelBuilder, ModelError};
pub use defaults::DefaultValue;

use crate::ids::WireTypeId;
use crate::schema::{clean_name, strip_namespace, SchemaDocument};
use std::fmt;

/// Primitive wire kinds the codec encodes natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
    Guid,
    ByteString,
    Char,
    CharArray,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 17] = [
        Self::Boolean,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::DateTime,
        Self::Guid,
        Self::ByteString,
        Self::Char,
        Self::CharArray,
    ];

    /// Schema/wire name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::Char => "Char",
            Self::CharArray => "CharArray",
        }
    }

    /// Look up a kind by its (namespace-stripped) schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Fixed-width numeric kinds.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Float
                | Self::Double
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element type of a field, after namespace stripping and sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    /// Another record or enumeration, built-in or user-defined.
    Named(String),
}

impl TypeRef {
    /// Resolve a raw `TypeName` attribute (`opc:Int32`, `tns:Point`, ...).
    pub fn parse(raw: &str) -> Self {
        let local = clean_name(strip_namespace(raw));
        match PrimitiveKind::from_name(&local) {
            Some(kind) => Self::Primitive(kind),
            None => Self::Named(local),
        }
    }

    /// Local type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.name(),
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Codec-level layout tag of a field (`Int32`, `ListOfDouble`, `Point`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireTypeTag {
    element: String,
    array: bool,
}

impl WireTypeTag {
    pub const ARRAY_PREFIX: &'static str = "ListOf";

    pub fn scalar(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            array: false,
        }
    }

    /// Array tag. Character arrays travel as strings on the wire.
    pub fn list(element: impl Into<String>) -> Self {
        let element = element.into();
        if element == PrimitiveKind::Char.name() {
            return Self::scalar(PrimitiveKind::String.name());
        }
        Self {
            element,
            array: true,
        }
    }

    pub fn for_field(element: &TypeRef, is_array: bool) -> Self {
        if is_array {
            Self::list(element.name())
        } else {
            Self::scalar(element.name())
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn is_array(&self) -> bool {
        self.array
    }
}

impl fmt::Display for WireTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "{}{}", Self::ARRAY_PREFIX, self.element)
        } else {
            f.write_str(&self.element)
        }
    }
}

/// Field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub element_type: TypeRef,
    pub is_array: bool,
    pub default_value: DefaultValue,
}

impl Field {
    /// Scalar field with the resolver's default.
    pub fn scalar(name: impl Into<String>, element_type: TypeRef) -> Self {
        let default_value = DefaultValue::for_element(&element_type);
        Self {
            name: name.into(),
            element_type,
            is_array: false,
            default_value,
        }
    }

    /// Array field; always defaults to the empty sequence.
    pub fn array(name: impl Into<String>, element_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            element_type,
            is_array: true,
            default_value: DefaultValue::EmptySequence,
        }
    }

    pub fn wire_tag(&self) -> WireTypeTag {
        WireTypeTag::for_field(&self.element_type, self.is_array)
    }
}

/// Struct-like record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<Field>,
    /// Wire identifier bound after cross-referencing the address space.
    pub type_id: Option<WireTypeId>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            type_id: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Named integer of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDef {
    pub name: String,
    pub value: i64,
}

/// Integer-backed enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<EnumValueDef>,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// One definition of the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEntry {
    Record(RecordType),
    Enum(EnumType),
}

impl ModelEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Record(r) => &r.name,
            Self::Enum(e) => &e.name,
        }
    }
}

/// Ordered records and enumerations of one schema document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeModel {
    entries: Vec<ModelEntry>,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model of a parsed schema document.
    pub fn from_document(doc: &SchemaDocument) -> Result<Self, ModelError> {
        ModelBuilder::new().build(doc.root())
    }

    /// Parse schema text and build its model.
    pub fn from_xml(text: &str) -> Result<Self, ModelError> {
        let doc = SchemaDocument::parse(text)?;
        Self::from_document(&doc)
    }

    pub fn push(&mut self, entry: ModelEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&self, name: &str) -> Option<&RecordType> {
        self.entries.iter().find_map(|entry| match entry {
            ModelEntry::Record(r) if r.name == name => Some(r),
            _ => None,
        })
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumType> {
        self.entries.iter().find_map(|entry| match entry {
            ModelEntry::Enum(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Bind a wire identifier to the first record with that name.
    ///
    /// Returns `false` when no record matches.
    pub fn set_type_id(&mut self, name: &str, type_id: WireTypeId) -> bool {
        for entry in &mut self.entries {
            if let ModelEntry::Record(record) = entry {
                if record.name == name {
                    record.type_id = Some(type_id);
                    return true;
                }
            }
        }
        false
    }
}
