// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Values of materialized types.

use crate::dynamic::RecordDescriptor;
use crate::model::PrimitiveKind;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A value of any primitive or materialized type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence marker ("no value"), distinct from an empty string.
    Null,

    // Primitives
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    ByteString(Vec<u8>),
    Char(u8),
    DateTime(DateTime<Utc>),
    Guid(Uuid),

    // Composites
    Enum(EnumValue),
    Record(RecordValue),
    Sequence(Vec<Value>),
}

impl Value {
    /// Numeric zero of `kind`; [`Value::Null`] for non-numeric kinds.
    pub fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::SByte => Self::SByte(0),
            PrimitiveKind::Byte => Self::Byte(0),
            PrimitiveKind::Int16 => Self::Int16(0),
            PrimitiveKind::UInt16 => Self::UInt16(0),
            PrimitiveKind::Int32 => Self::Int32(0),
            PrimitiveKind::UInt32 => Self::UInt32(0),
            PrimitiveKind::Int64 => Self::Int64(0),
            PrimitiveKind::UInt64 => Self::UInt64(0),
            PrimitiveKind::Float => Self::Float(0.0),
            PrimitiveKind::Double => Self::Double(0.0),
            _ => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::SByte(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::UInt16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Self::Enum(v)
    }
}

impl From<RecordValue> for Value {
    fn from(v: RecordValue) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

/// Member of a materialized enumeration.
///
/// `name` is `None` for zero-backed values that match no declared member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: String,
    pub name: Option<String>,
    pub value: i64,
}

/// Errors for record field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    FieldNotFound { record: String, field: String },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound { record, field } => {
                write!(f, "{} has no field named {}", record, field)
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Instance of a materialized record: one value per declared field, in
/// declaration order.
#[derive(Debug, Clone)]
pub struct RecordValue {
    descriptor: Arc<RecordDescriptor>,
    fields: Vec<Value>,
}

impl RecordValue {
    /// Default-constructed instance: every field set to its default.
    pub fn new(descriptor: &Arc<RecordDescriptor>) -> Self {
        let fields = descriptor
            .fields()
            .iter()
            .map(|field| field.default_value())
            .collect();
        Self {
            descriptor: descriptor.clone(),
            fields,
        }
    }

    pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
        &self.descriptor
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Result<&Value, ValueError> {
        let index = self.index_of(name)?;
        Ok(&self.fields[index])
    }

    /// Replace a field value by name.
    ///
    /// Only the field name is checked; the codec validates the value
    /// against the field's wire tag when encoding.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValueError> {
        let index = self.index_of(name)?;
        self.fields[index] = value.into();
        Ok(())
    }

    /// `(field name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.descriptor
            .fields()
            .iter()
            .map(|f| f.name())
            .zip(self.fields.iter())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn index_of(&self, name: &str) -> Result<usize, ValueError> {
        self.descriptor
            .field_index(name)
            .ok_or_else(|| ValueError::FieldNotFound {
                record: self.descriptor.name().to_string(),
                field: name.to_string(),
            })
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name() == other.descriptor.name() && self.fields == other.fields
    }
}
