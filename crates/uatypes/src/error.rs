// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-level error type.

use crate::driver::Stage;
use crate::dynamic::MaterializeError;
use crate::ids::NodeId;
use crate::model::ModelError;
use crate::schema::SchemaParseError;
use thiserror::Error;

/// Error returned by address-space collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to register the types of one schema-bearing node.
///
/// The registry is left untouched: nothing of that node's document is
/// registered.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] SchemaParseError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error("{stage} failed for node {node}: {source}")]
    Collaborator {
        stage: Stage,
        node: NodeId,
        #[source]
        source: BoxError,
    },
}

impl DriverError {
    /// Stage at which the error was raised.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Parse(_) => Stage::Parse,
            Self::Model(ModelError::Parse(_)) => Stage::Parse,
            Self::Model(_) => Stage::BuildModel,
            Self::Materialize(_) => Stage::Materialize,
            Self::Collaborator { stage, .. } => *stage,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
