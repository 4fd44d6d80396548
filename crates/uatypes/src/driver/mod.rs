// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration Driver
//!
//! Loads the custom types of a server into a [`TypeRegistry`].
//!
//! # Flow (per schema-bearing node)
//!
//! ```text
//! Fetch          read the dictionary bytes from the node value
//! Parse          bytes -> SchemaDocument
//! BuildModel     SchemaDocument -> TypeModel
//! Materialize    TypeModel -> MaterializedSet (against a registry snapshot)
//! CrossReference children of the node with a HasDescription reference
//!                bind a materialized name to a wire type id
//! Register       bound types by name + id, leftovers by name only
//! Done
//! ```
//!
//! A failure before `Register` leaves the registry untouched. Nothing is
//! rolled back once registration started.

mod address_space;
mod report;

pub use address_space::{AddressSpace, ChildDescription};
pub use report::{Anomaly, LoadOutcome, RegistrationReport};

use crate::config::LoaderConfig;
use crate::dynamic::Materializer;
use crate::error::{BoxError, DriverError, Result};
use crate::ids::{NodeId, WireTypeId};
use crate::model::TypeModel;
use crate::registry::{Registration, TypeRegistry};
use crate::schema::{clean_name, SchemaDocument};
use std::collections::HashSet;
use std::fmt;

/// Registration pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Listing the schema-bearing nodes under the dictionary root.
    Discover,
    Fetch,
    Parse,
    BuildModel,
    Materialize,
    CrossReference,
    Register,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discover => "discover",
            Self::Fetch => "fetch",
            Self::Parse => "parse",
            Self::BuildModel => "build-model",
            Self::Materialize => "materialize",
            Self::CrossReference => "cross-reference",
            Self::Register => "register",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Drives type registration for one address space into one registry.
pub struct RegistrationDriver<'a, A: AddressSpace + ?Sized> {
    address_space: &'a A,
    registry: &'a TypeRegistry,
    config: LoaderConfig,
}

impl<'a, A: AddressSpace + ?Sized> RegistrationDriver<'a, A> {
    pub fn new(address_space: &'a A, registry: &'a TypeRegistry) -> Self {
        Self::with_config(address_space, registry, LoaderConfig::default())
    }

    pub fn with_config(
        address_space: &'a A,
        registry: &'a TypeRegistry,
        config: LoaderConfig,
    ) -> Self {
        Self {
            address_space,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Schema-bearing nodes under the dictionary root, minus the skipped
    /// dictionaries.
    pub fn discover_schema_nodes(&self) -> Result<Vec<NodeId>> {
        let root = &self.config.dictionary_root;
        let children = self
            .address_space
            .list_child_descriptions(root)
            .map_err(|source| collaborator(Stage::Discover, root, source))?;

        let nodes: Vec<_> = children
            .into_iter()
            .filter(|child| {
                let skip = self.config.skips(&child.browse_name);
                if skip {
                    log::debug!("[driver] skipping dictionary {}", child.browse_name);
                }
                !skip
            })
            .map(|child| child.node_id)
            .collect();
        log::debug!("[driver] discovered {} dictionaries under {}", nodes.len(), root);
        Ok(nodes)
    }

    /// Register the given nodes, or every discovered dictionary when
    /// `nodes` is `None`.
    ///
    /// Only discovery failures are returned as `Err`; per-node failures are
    /// collected in the outcome.
    pub fn load_type_definitions(&self, nodes: Option<&[NodeId]>) -> Result<LoadOutcome> {
        match nodes {
            Some(nodes) => Ok(self.register_nodes(nodes)),
            None => {
                let discovered = self.discover_schema_nodes()?;
                Ok(self.register_nodes(&discovered))
            }
        }
    }

    /// Register several nodes in sequence into the same registry.
    pub fn register_nodes(&self, nodes: &[NodeId]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();
        for node in nodes {
            match self.register_node(node) {
                Ok(report) => outcome.reports.push(report),
                Err(e) => {
                    log::warn!("[driver] {} failed at {}: {}", node, e.stage(), e);
                    outcome.failures.push((node.clone(), e));
                }
            }
        }
        outcome
    }

    /// Run the whole pipeline for one schema-bearing node.
    pub fn register_node(&self, node: &NodeId) -> Result<RegistrationReport> {
        enter(node, Stage::Fetch);
        let bytes = self
            .address_space
            .fetch_schema_document(node)
            .map_err(|source| collaborator(Stage::Fetch, node, source))?;

        enter(node, Stage::Parse);
        let document = SchemaDocument::from_bytes(&bytes)?;

        enter(node, Stage::BuildModel);
        let mut model = TypeModel::from_document(&document)?;

        enter(node, Stage::Materialize);
        let snapshot = self.registry.snapshot();
        let types = Materializer::new(&snapshot).materialize(&model)?;

        enter(node, Stage::CrossReference);
        let mut anomalies = Vec::new();
        let mut bound: Vec<(String, WireTypeId)> = Vec::new();
        let children = self
            .address_space
            .list_child_descriptions(node)
            .map_err(|source| collaborator(Stage::CrossReference, node, source))?;

        for child in children {
            let references = self
                .address_space
                .has_description_references(&child.node_id)
                .map_err(|source| collaborator(Stage::CrossReference, &child.node_id, source))?;
            let Some(target) = references.into_iter().next() else {
                log::debug!(
                    "[driver] {} has no HasDescription reference, ignored",
                    child.browse_name
                );
                continue;
            };

            let name = clean_name(&child.browse_name);
            if !types.contains(&name) {
                log::warn!(
                    "[driver] {} is found as child of {} but is not defined in its dictionary",
                    name,
                    node
                );
                anomalies.push(Anomaly::DescribedNodeMismatch {
                    name,
                    node: child.node_id,
                });
                continue;
            }

            let id = WireTypeId::from(target);
            model.set_type_id(&name, id.clone());
            bound.push((name, id));
        }

        enter(node, Stage::Register);
        let bound_names: HashSet<&str> = bound.iter().map(|(name, _)| name.as_str()).collect();
        let mut name_only = Vec::new();

        for (name, id) in &bound {
            if let Some(ty) = types.get(name) {
                let outcome = self.registry.register(name, Some(id.clone()), ty.clone());
                record_overwrite(&mut anomalies, name, Some(id), outcome);
            }
        }
        for ty in types.iter() {
            if bound_names.contains(ty.name()) {
                continue;
            }
            let outcome = self.registry.register(ty.name(), None, ty.clone());
            record_overwrite(&mut anomalies, ty.name(), None, outcome);
            name_only.push(ty.name().to_string());
        }

        enter(node, Stage::Done);
        log::info!(
            "[driver] {}: {} types registered ({} by wire id, {} by name only, {} anomalies)",
            node,
            bound.len() + name_only.len(),
            bound.len(),
            name_only.len(),
            anomalies.len()
        );

        Ok(RegistrationReport {
            node: node.clone(),
            model,
            bound,
            name_only,
            anomalies,
        })
    }
}

fn enter(node: &NodeId, stage: Stage) {
    log::debug!("[driver] {} -> {}", node, stage);
}

fn collaborator(stage: Stage, node: &NodeId, source: BoxError) -> DriverError {
    DriverError::Collaborator {
        stage,
        node: node.clone(),
        source,
    }
}

fn record_overwrite(
    anomalies: &mut Vec<Anomaly>,
    name: &str,
    current: Option<&WireTypeId>,
    outcome: Registration,
) {
    if let Registration::Overwritten { previous } = outcome {
        anomalies.push(Anomaly::RegistryOverwrite {
            name: name.to_string(),
            previous: previous.wire_type_id,
            current: current.cloned(),
        });
    }
}
