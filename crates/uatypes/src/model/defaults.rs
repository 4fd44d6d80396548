// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Default values of record fields.
//!
//! The resolver returns a recipe rather than a value: GUID and timestamp
//! defaults are generated fresh for every instance, and defaults of named
//! types are only known once the materializer has resolved the name.

use super::{PrimitiveKind, TypeRef};
use crate::dynamic::Value;
use chrono::Utc;
use uuid::Uuid;

/// How to produce a field's initial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Absence marker (`Value::Null`), distinct from an empty string.
    Null,
    /// Fresh random v4 GUID per instance.
    NewGuid,
    Boolean(bool),
    /// Current UTC time per instance.
    Now,
    /// Numeric zero of the given kind.
    Zero(PrimitiveKind),
    /// Empty sequence (every array field).
    EmptySequence,
    /// Zero instance of a named record or enumeration.
    InstanceOf(String),
}

impl DefaultValue {
    /// Default for a non-array field of the given element type.
    pub fn for_element(element: &TypeRef) -> Self {
        match element {
            TypeRef::Primitive(kind) => match kind {
                PrimitiveKind::String
                | PrimitiveKind::ByteString
                | PrimitiveKind::Char
                | PrimitiveKind::CharArray => Self::Null,
                PrimitiveKind::Guid => Self::NewGuid,
                PrimitiveKind::Boolean => Self::Boolean(true),
                PrimitiveKind::DateTime => Self::Now,
                numeric => Self::Zero(*numeric),
            },
            TypeRef::Named(name) => Self::InstanceOf(name.clone()),
        }
    }

    /// Produce the value. `instance` is called only for [`Self::InstanceOf`].
    pub fn evaluate_with(&self, instance: impl FnOnce(&str) -> Value) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::NewGuid => Value::Guid(Uuid::new_v4()),
            Self::Boolean(v) => Value::Boolean(*v),
            Self::Now => Value::DateTime(Utc::now()),
            Self::Zero(kind) => Value::zero(*kind),
            Self::EmptySequence => Value::Sequence(Vec::new()),
            Self::InstanceOf(name) => instance(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(kind: PrimitiveKind) -> DefaultValue {
        DefaultValue::for_element(&TypeRef::Primitive(kind))
    }

    #[test]
    fn test_primitive_defaults() {
        assert_eq!(prim(PrimitiveKind::String), DefaultValue::Null);
        assert_eq!(prim(PrimitiveKind::ByteString), DefaultValue::Null);
        assert_eq!(prim(PrimitiveKind::Char), DefaultValue::Null);
        assert_eq!(prim(PrimitiveKind::CharArray), DefaultValue::Null);
        assert_eq!(prim(PrimitiveKind::Guid), DefaultValue::NewGuid);
        assert_eq!(prim(PrimitiveKind::Boolean), DefaultValue::Boolean(true));
        assert_eq!(prim(PrimitiveKind::DateTime), DefaultValue::Now);
        assert_eq!(
            prim(PrimitiveKind::UInt16),
            DefaultValue::Zero(PrimitiveKind::UInt16)
        );
    }

    #[test]
    fn test_named_default_is_deferred() {
        let default = DefaultValue::for_element(&TypeRef::Named("Color".into()));
        assert_eq!(default, DefaultValue::InstanceOf("Color".into()));
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(prim(PrimitiveKind::String).evaluate_with(|_| unreachable!()), Value::Null);
        assert_eq!(
            prim(PrimitiveKind::Double).evaluate_with(|_| unreachable!()),
            Value::Double(0.0)
        );
        assert_eq!(
            prim(PrimitiveKind::SByte).evaluate_with(|_| unreachable!()),
            Value::SByte(0)
        );
        assert_eq!(
            DefaultValue::EmptySequence.evaluate_with(|_| unreachable!()),
            Value::Sequence(Vec::new())
        );

        let named = DefaultValue::InstanceOf("Point".into());
        let value = named.evaluate_with(|name| Value::String(name.to_string()));
        assert_eq!(value, Value::String("Point".into()));
    }

    #[test]
    fn test_guids_are_fresh_per_evaluation() {
        let recipe = prim(PrimitiveKind::Guid);
        let a = recipe.evaluate_with(|_| unreachable!());
        let b = recipe.evaluate_with(|_| unreachable!());
        assert!(matches!(a, Value::Guid(_)));
        assert_ne!(a, b);
    }
}
