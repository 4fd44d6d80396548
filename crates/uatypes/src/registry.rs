// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type Registry for materialized custom types.
//!
//! Maps type names and wire type identifiers to [`MaterializedType`]s so the
//! codec can dispatch extension-object payloads.
//!
//! # Design
//!
//! - Writers are serialized by a `parking_lot::Mutex`
//! - Readers load an immutable [`RegistryState`] through `ArcSwap` (no lock)
//! - A registration publishes its name and identifier entries in one swap,
//!   so a reader never sees one without the other
//! - Same-name registration overwrites (last writer wins); identifier
//!   entries of the previous registration stay resolvable
//! - Nothing is ever removed; teardown drops the registry

use crate::config::LoaderConfig;
use crate::dynamic::{KnownTypes, MaterializedType};
use crate::ids::WireTypeId;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One registered type.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub wire_type_id: Option<WireTypeId>,
    pub type_name: String,
    pub materialized_type: MaterializedType,
}

/// Outcome of [`TypeRegistry::register`].
#[derive(Debug, Clone)]
pub enum Registration {
    Inserted,
    /// An entry with the same name existed and was replaced.
    Overwritten { previous: RegistryEntry },
}

impl Registration {
    pub fn is_overwrite(&self) -> bool {
        matches!(self, Self::Overwritten { .. })
    }
}

/// Immutable published view of the registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    by_name: HashMap<String, RegistryEntry>,
    by_id: HashMap<WireTypeId, RegistryEntry>,
}

impl RegistryState {
    pub fn by_name(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(name)
    }

    pub fn by_wire_type_id(&self, id: &WireTypeId) -> Option<&RegistryEntry> {
        self.by_id.get(id)
    }
}

/// Read-consistent snapshot, usable as the known-type universe of the
/// materializer.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot(Arc<RegistryState>);

impl RegistrySnapshot {
    pub fn state(&self) -> &RegistryState {
        &self.0
    }
}

impl KnownTypes for RegistrySnapshot {
    fn lookup(&self, name: &str) -> Option<MaterializedType> {
        self.0
            .by_name(name)
            .map(|entry| entry.materialized_type.clone())
    }
}

/// Process- or connection-wide registry of materialized types.
pub struct TypeRegistry {
    state: ArcSwap<RegistryState>,
    write_lock: Mutex<()>,
    log_overwrites: bool,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(RegistryState::default()),
            write_lock: Mutex::new(()),
            log_overwrites: true,
        }
    }

    pub fn with_config(config: &LoaderConfig) -> Self {
        Self {
            log_overwrites: config.log_overwrites,
            ..Self::new()
        }
    }

    /// Register `ty` under `name` and, when given, `wire_type_id`.
    pub fn register(
        &self,
        name: &str,
        wire_type_id: Option<WireTypeId>,
        ty: MaterializedType,
    ) -> Registration {
        let _guard = self.write_lock.lock();

        let current = self.state.load_full();
        let mut next = RegistryState::clone(&current);

        let entry = RegistryEntry {
            wire_type_id: wire_type_id.clone(),
            type_name: name.to_string(),
            materialized_type: ty,
        };
        if let Some(id) = wire_type_id {
            next.by_id.insert(id, entry.clone());
        }
        let previous = next.by_name.insert(name.to_string(), entry);
        self.state.store(Arc::new(next));

        match previous {
            Some(previous) => {
                if self.log_overwrites {
                    log::warn!(
                        "[registry] {} registered again, replacing the previous definition (was {})",
                        name,
                        previous
                            .wire_type_id
                            .as_ref()
                            .map_or_else(|| "name only".to_string(), ToString::to_string)
                    );
                }
                Registration::Overwritten { previous }
            }
            None => {
                log::debug!("[registry] registered {}", name);
                Registration::Inserted
            }
        }
    }

    pub fn lookup_by_wire_type_id(&self, id: &WireTypeId) -> Option<MaterializedType> {
        self.entry_by_wire_type_id(id)
            .map(|entry| entry.materialized_type)
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<MaterializedType> {
        self.entry_by_name(name).map(|entry| entry.materialized_type)
    }

    pub fn entry_by_wire_type_id(&self, id: &WireTypeId) -> Option<RegistryEntry> {
        self.state.load().by_wire_type_id(id).cloned()
    }

    pub fn entry_by_name(&self, name: &str) -> Option<RegistryEntry> {
        self.state.load().by_name(name).cloned()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot(self.state.load_full())
    }

    /// Number of distinct registered names.
    pub fn len(&self) -> usize {
        self.state.load().by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.state.load().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .field("log_overwrites", &self.log_overwrites)
            .finish()
    }
}
