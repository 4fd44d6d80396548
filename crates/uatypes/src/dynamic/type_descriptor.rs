// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptors of materialized types.

use crate::dynamic::{EnumValue, RecordValue, Value};
use crate::model::{DefaultValue, PrimitiveKind, WireTypeTag};
use std::fmt;
use std::sync::Arc;

/// Structured built-in types whose codecs live outside this crate.
///
/// Custom structures may reference them by name without registering
/// anything. Their default is the absence marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    NodeId,
    ExpandedNodeId,
    StatusCode,
    QualifiedName,
    LocalizedText,
    ExtensionObject,
    DataValue,
    Variant,
    DiagnosticInfo,
    XmlElement,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 10] = [
        Self::NodeId,
        Self::ExpandedNodeId,
        Self::StatusCode,
        Self::QualifiedName,
        Self::LocalizedText,
        Self::ExtensionObject,
        Self::DataValue,
        Self::Variant,
        Self::DiagnosticInfo,
        Self::XmlElement,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NodeId => "NodeId",
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
            Self::ExtensionObject => "ExtensionObject",
            Self::DataValue => "DataValue",
            Self::Variant => "Variant",
            Self::DiagnosticInfo => "DiagnosticInfo",
            Self::XmlElement => "XmlElement",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Resolved element type of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    Builtin(BuiltinKind),
    Record(Arc<RecordDescriptor>),
    Enum(Arc<EnumDescriptor>),
}

impl FieldType {
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.name(),
            Self::Builtin(kind) => kind.name(),
            Self::Record(record) => record.name(),
            Self::Enum(enumeration) => enumeration.name(),
        }
    }

    /// Zero instance of the element type.
    fn zero_instance(&self) -> Value {
        match self {
            Self::Primitive(kind) => Value::zero(*kind),
            Self::Builtin(_) => Value::Null,
            Self::Record(record) => Value::Record(RecordValue::new(record)),
            Self::Enum(enumeration) => Value::Enum(enumeration.zero()),
        }
    }
}

/// Field of a materialized record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    is_array: bool,
    default: DefaultValue,
    wire_tag: WireTypeTag,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        is_array: bool,
        default: DefaultValue,
    ) -> Self {
        let wire_tag = if is_array {
            WireTypeTag::list(field_type.name())
        } else {
            WireTypeTag::scalar(field_type.name())
        };
        Self {
            name: name.into(),
            field_type,
            is_array,
            default,
            wire_tag,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn default_recipe(&self) -> &DefaultValue {
        &self.default
    }

    pub fn wire_tag(&self) -> &WireTypeTag {
        &self.wire_tag
    }

    /// Fresh default value for a new instance.
    pub fn default_value(&self) -> Value {
        self.default
            .evaluate_with(|_| self.field_type.zero_instance())
    }
}

/// Struct-like materialized type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Ordered `(field name, wire tag)` list driving field-by-field
    /// encode/decode.
    pub fn encode_descriptor(&self) -> Vec<(String, WireTypeTag)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.wire_tag.clone()))
            .collect()
    }
}

/// Named member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Integer-backed materialized enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declared order.
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// First member declared with `value`.
    pub fn member_by_value(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }

    /// Value of the named member.
    pub fn value_of(&self, name: &str) -> Option<EnumValue> {
        self.member(name).map(|m| EnumValue {
            type_name: self.name().to_string(),
            name: Some(m.name.clone()),
            value: m.value,
        })
    }

    /// Zero instance: the member whose literal is 0, or an unnamed
    /// zero-backed value when there is none.
    pub fn zero(&self) -> EnumValue {
        EnumValue {
            type_name: self.name().to_string(),
            name: self.member_by_value(0).map(|m| m.name.clone()),
            value: 0,
        }
    }
}

/// A type produced by the materializer.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterializedType {
    Record(Arc<RecordDescriptor>),
    Enum(Arc<EnumDescriptor>),
}

impl MaterializedType {
    pub fn name(&self) -> &str {
        match self {
            Self::Record(record) => record.name(),
            Self::Enum(enumeration) => enumeration.name(),
        }
    }

    pub fn as_record(&self) -> Option<&Arc<RecordDescriptor>> {
        match self {
            Self::Record(record) => Some(record),
            Self::Enum(_) => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Arc<EnumDescriptor>> {
        match self {
            Self::Enum(enumeration) => Some(enumeration),
            Self::Record(_) => None,
        }
    }

    /// Field descriptor list; empty for enumerations, which encode as a
    /// plain integer.
    pub fn encode_descriptor(&self) -> Vec<(String, WireTypeTag)> {
        match self {
            Self::Record(record) => record.encode_descriptor(),
            Self::Enum(_) => Vec::new(),
        }
    }

    /// Default-constructed instance.
    pub fn instantiate(&self) -> Value {
        match self {
            Self::Record(record) => Value::Record(RecordValue::new(record)),
            Self::Enum(enumeration) => Value::Enum(enumeration.zero()),
        }
    }

    /// Whether both handles point at the same materialized definition.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for MaterializedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => write!(f, "record {}", record.name()),
            Self::Enum(enumeration) => write!(f, "enum {}", enumeration.name()),
        }
    }
}
