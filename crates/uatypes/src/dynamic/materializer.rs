// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeModel -> materialized types.
//!
//! Entries are processed strictly in model order. A field may reference a
//! type materialized earlier in the same model, a type already known to
//! the caller (usually a registry snapshot), or a structured built-in.
//! Anything else aborts the whole model.

use crate::dynamic::{
    BuiltinKind, EnumDescriptor, EnumMember, FieldDescriptor, FieldType, MaterializedType,
    RecordDescriptor,
};
use crate::model::{EnumType, ModelEntry, RecordType, TypeModel, TypeRef};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Types resolvable before the current model is materialized.
pub trait KnownTypes {
    /// Look up a materialized type by name.
    fn lookup(&self, name: &str) -> Option<MaterializedType>;
}

impl KnownTypes for HashMap<String, MaterializedType> {
    fn lookup(&self, name: &str) -> Option<MaterializedType> {
        self.get(name).cloned()
    }
}

/// Empty universe: only primitives and structured built-ins resolve.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKnownTypes;

impl KnownTypes for NoKnownTypes {
    fn lookup(&self, _name: &str) -> Option<MaterializedType> {
        None
    }
}

/// Materialization failure. The whole model is discarded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("{record}.{field}: unresolved type reference `{type_name}`")]
    UnresolvedTypeReference {
        record: String,
        field: String,
        type_name: String,
    },
}

/// Materialized types of one model, in model order.
#[derive(Debug, Clone, Default)]
pub struct MaterializedSet {
    types: Vec<MaterializedType>,
    index: HashMap<String, usize>,
}

impl MaterializedSet {
    fn insert(&mut self, ty: MaterializedType) {
        match self.index.get(ty.name()) {
            Some(&slot) => {
                log::warn!(
                    "[materialize] {} defined twice in one schema, keeping the later definition",
                    ty.name()
                );
                self.types[slot] = ty;
            }
            None => {
                self.index.insert(ty.name().to_string(), self.types.len());
                self.types.push(ty);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MaterializedType> {
        self.index.get(name).map(|&slot| &self.types[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterializedType> {
        self.types.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(MaterializedType::name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl IntoIterator for MaterializedSet {
    type Item = MaterializedType;
    type IntoIter = std::vec::IntoIter<MaterializedType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

/// Turns a [`TypeModel`] into [`MaterializedType`]s.
pub struct Materializer<'a> {
    known: &'a dyn KnownTypes,
}

impl<'a> Materializer<'a> {
    pub fn new(known: &'a dyn KnownTypes) -> Self {
        Self { known }
    }

    /// Materialize every entry of `model`, in order.
    pub fn materialize(&self, model: &TypeModel) -> Result<MaterializedSet, MaterializeError> {
        let mut set = MaterializedSet::default();
        for entry in model.entries() {
            let ty = match entry {
                ModelEntry::Record(record) => self.record(record, &set)?,
                ModelEntry::Enum(enumeration) => enum_type(enumeration),
            };
            log::debug!("[materialize] {}", ty);
            set.insert(ty);
        }
        Ok(set)
    }

    fn record(
        &self,
        record: &RecordType,
        done: &MaterializedSet,
    ) -> Result<MaterializedType, MaterializeError> {
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            let field_type = self.resolve(&field.element_type, done).ok_or_else(|| {
                MaterializeError::UnresolvedTypeReference {
                    record: record.name.clone(),
                    field: field.name.clone(),
                    type_name: field.element_type.name().to_string(),
                }
            })?;
            fields.push(FieldDescriptor::new(
                field.name.clone(),
                field_type,
                field.is_array,
                field.default_value.clone(),
            ));
        }
        Ok(MaterializedType::Record(Arc::new(RecordDescriptor::new(
            record.name.clone(),
            fields,
        ))))
    }

    /// Earlier entries of this model first, then the known universe, then
    /// structured built-ins.
    fn resolve(&self, element: &TypeRef, done: &MaterializedSet) -> Option<FieldType> {
        let name = match element {
            TypeRef::Primitive(kind) => return Some(FieldType::Primitive(*kind)),
            TypeRef::Named(name) => name.as_str(),
        };

        let found = done.get(name).cloned().or_else(|| self.known.lookup(name));
        match found {
            Some(MaterializedType::Record(record)) => Some(FieldType::Record(record)),
            Some(MaterializedType::Enum(enumeration)) => Some(FieldType::Enum(enumeration)),
            None => BuiltinKind::from_name(name).map(FieldType::Builtin),
        }
    }
}

fn enum_type(enumeration: &EnumType) -> MaterializedType {
    let members = enumeration
        .values
        .iter()
        .map(|v| EnumMember::new(v.name.clone(), v.value))
        .collect();
    MaterializedType::Enum(Arc::new(EnumDescriptor::new(
        enumeration.name.clone(),
        members,
    )))
}

/// Materialize `model` against `known`.
pub fn materialize(
    known: &dyn KnownTypes,
    model: &TypeModel,
) -> Result<MaterializedSet, MaterializeError> {
    Materializer::new(known).materialize(model)
}
