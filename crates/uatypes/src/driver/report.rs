// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Outcome of a registration run.

use crate::error::DriverError;
use crate::ids::{NodeId, WireTypeId};
use crate::model::TypeModel;
use std::fmt;

/// Non-fatal finding while registering a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A described child has no matching type in the node's document.
    DescribedNodeMismatch { name: String, node: NodeId },
    /// A registration replaced an existing entry of the same name.
    RegistryOverwrite {
        name: String,
        previous: Option<WireTypeId>,
        current: Option<WireTypeId>,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescribedNodeMismatch { name, node } => write!(
                f,
                "{} ({}) is described but has no definition in the dictionary",
                name, node
            ),
            Self::RegistryOverwrite {
                name,
                previous,
                current,
            } => write!(
                f,
                "{} overwritten ({} -> {})",
                name,
                display_id(previous.as_ref()),
                display_id(current.as_ref())
            ),
        }
    }
}

fn display_id(id: Option<&WireTypeId>) -> String {
    id.map_or_else(|| "name only".to_string(), ToString::to_string)
}

/// What registering one schema-bearing node did.
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub node: NodeId,
    /// Model of the node's document, with bound type ids.
    pub model: TypeModel,
    /// Types registered under both name and wire type id, in browse order.
    pub bound: Vec<(String, WireTypeId)>,
    /// Types registered by name only, in model order.
    pub name_only: Vec<String>,
    pub anomalies: Vec<Anomaly>,
}

impl RegistrationReport {
    /// Number of registrations performed.
    pub fn registered(&self) -> usize {
        self.bound.len() + self.name_only.len()
    }

    pub fn wire_type_id(&self, name: &str) -> Option<&WireTypeId> {
        self.bound
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, id)| id)
    }
}

/// Result of a batch: per-node reports and per-node failures.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub reports: Vec<RegistrationReport>,
    pub failures: Vec<(NodeId, DriverError)>,
}

impl LoadOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &Anomaly> {
        self.reports.iter().flat_map(|r| r.anomalies.iter())
    }
}
