// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema tree -> [`TypeModel`].
//!
//! Records are collected in a first pass and enumerations in a second one,
//! so every record precedes every enumeration in the resulting model
//! regardless of how the document interleaves them.

use super::{EnumType, EnumValueDef, Field, ModelEntry, RecordType, TypeModel, TypeRef};
use crate::schema::{clean_name, SchemaNode, SchemaParseError};
use std::collections::HashSet;
use thiserror::Error;

const STRUCTURED_TYPE: &str = "StructuredType";
const FIELD: &str = "Field";
const ENUMERATED_TYPE: &str = "EnumeratedType";
const ENUMERATED_VALUE: &str = "EnumeratedValue";

/// Prefix of the implicit length field preceding an array field.
const ARRAY_LENGTH_PREFIX: &str = "NoOf";

/// Structural problems in a well-formed schema document.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Parse(#[from] SchemaParseError),

    #[error("<{element}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> has name `{raw}` which sanitizes to an empty identifier")]
    EmptyName { element: &'static str, raw: String },

    #[error("enumeration {enumeration}: value `{name}` is not an integer: `{value}`")]
    InvalidEnumValue {
        enumeration: String,
        name: String,
        value: String,
    },

    #[error("{owner}: duplicate member name `{name}`")]
    DuplicateName { owner: String, name: String },
}

/// Walks a parse tree and accumulates model entries.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: TypeModel,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model of the subtree rooted at `root`.
    pub fn build(mut self, root: &SchemaNode) -> Result<TypeModel, ModelError> {
        for node in root.descendants_named(STRUCTURED_TYPE) {
            let record = build_record(node)?;
            log::debug!(
                "[model] record {} ({} fields)",
                record.name,
                record.fields.len()
            );
            self.model.push(ModelEntry::Record(record));
        }
        for node in root.descendants_named(ENUMERATED_TYPE) {
            let enumeration = build_enum(node)?;
            log::debug!(
                "[model] enum {} ({} values)",
                enumeration.name,
                enumeration.values.len()
            );
            self.model.push(ModelEntry::Enum(enumeration));
        }
        Ok(self.model)
    }
}

fn build_record(node: &SchemaNode) -> Result<RecordType, ModelError> {
    let mut record = RecordType::new(identifier(node, STRUCTURED_TYPE)?);
    let mut seen = HashSet::new();
    let mut array_pending = false;

    for xml_field in node.children_named(FIELD) {
        let raw_name = required(xml_field, FIELD, "Name")?;
        if raw_name.starts_with(ARRAY_LENGTH_PREFIX) {
            array_pending = true;
            continue;
        }

        let name = identifier(xml_field, FIELD)?;
        let element_type = TypeRef::parse(required(xml_field, FIELD, "TypeName")?);
        let field = if array_pending {
            array_pending = false;
            Field::array(name, element_type)
        } else {
            Field::scalar(name, element_type)
        };

        if !seen.insert(field.name.clone()) {
            return Err(ModelError::DuplicateName {
                owner: record.name,
                name: field.name,
            });
        }
        record.fields.push(field);
    }

    Ok(record)
}

fn build_enum(node: &SchemaNode) -> Result<EnumType, ModelError> {
    let mut enumeration = EnumType::new(identifier(node, ENUMERATED_TYPE)?);
    let mut seen = HashSet::new();

    for xml_value in node.children_named(ENUMERATED_VALUE) {
        let name = identifier(xml_value, ENUMERATED_VALUE)?;
        let raw_value = required(xml_value, ENUMERATED_VALUE, "Value")?;
        let value = raw_value
            .trim()
            .parse::<i64>()
            .map_err(|_| ModelError::InvalidEnumValue {
                enumeration: enumeration.name.clone(),
                name: name.clone(),
                value: raw_value.to_string(),
            })?;

        if !seen.insert(name.clone()) {
            return Err(ModelError::DuplicateName {
                owner: enumeration.name,
                name,
            });
        }
        enumeration.values.push(EnumValueDef { name, value });
    }

    Ok(enumeration)
}

fn required<'a>(
    node: &'a SchemaNode,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ModelError> {
    node.attribute(attribute)
        .ok_or(ModelError::MissingAttribute { element, attribute })
}

/// Sanitized `Name` attribute of `node`.
fn identifier(node: &SchemaNode, element: &'static str) -> Result<String, ModelError> {
    let raw = required(node, element, "Name")?;
    let name = clean_name(raw);
    if name.is_empty() {
        return Err(ModelError::EmptyName {
            element,
            raw: raw.to_string(),
        });
    }
    Ok(name)
}
