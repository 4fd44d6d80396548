// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration manifest.
//!
//! Serializable summary of a [`TypeModel`]: every record with its field
//! wire tags and bound type id, every enumeration with its members. Useful
//! to inspect or archive what a server's dictionaries produced.
//!
//! ```yaml
//! types:
//!   - kind: record
//!     name: Point
//!     type_id: ns=2;i=5001
//!     fields:
//!       - name: X
//!         wire_tag: Int32
//!   - kind: enum
//!     name: Color
//!     values:
//!       - name: Red
//!         value: 0
//! ```

use crate::ids::WireTypeId;
use crate::model::{ModelEntry, TypeModel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to write manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Field of a manifest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestField {
    pub name: String,
    /// `Int32`, `ListOfDouble`, `Point`, ...
    pub wire_tag: String,
}

/// Member of a manifest enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEnumValue {
    pub name: String,
    pub value: i64,
}

/// One type of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestType {
    Record {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_id: Option<WireTypeId>,
        #[serde(default)]
        fields: Vec<ManifestField>,
    },
    Enum {
        name: String,
        #[serde(default)]
        values: Vec<ManifestEnumValue>,
    },
}

impl ManifestType {
    pub fn name(&self) -> &str {
        match self {
            Self::Record { name, .. } | Self::Enum { name, .. } => name,
        }
    }
}

/// Types of one model, in model order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub types: Vec<ManifestType>,
}

impl Manifest {
    pub fn from_model(model: &TypeModel) -> Self {
        let types = model
            .entries()
            .iter()
            .map(|entry| match entry {
                ModelEntry::Record(record) => ManifestType::Record {
                    name: record.name.clone(),
                    type_id: record.type_id.clone(),
                    fields: record
                        .fields
                        .iter()
                        .map(|f| ManifestField {
                            name: f.name.clone(),
                            wire_tag: f.wire_tag().to_string(),
                        })
                        .collect(),
                },
                ModelEntry::Enum(enumeration) => ManifestType::Enum {
                    name: enumeration.name.clone(),
                    values: enumeration
                        .values
                        .iter()
                        .map(|v| ManifestEnumValue {
                            name: v.name.clone(),
                            value: v.value,
                        })
                        .collect(),
                },
            })
            .collect();
        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&ManifestType> {
        self.types.iter().find(|t| t.name() == name)
    }

    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let path = path.as_ref();
        fs::write(path, self.to_yaml()?)?;
        log::info!(
            "[manifest] wrote {} types to {}",
            self.types.len(),
            path.display()
        );
        Ok(())
    }
}
