// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opaque node and wire-type identifiers.
//!
//! The address-space collaborator owns the identifier syntax (`i=93`,
//! `ns=2;s=MyType`, ...). This crate never interprets it: identifiers are
//! compared and hashed as strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address-space node identifier, as rendered by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a collaborator-rendered identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier carried by an extension object on the wire.
///
/// Derived from the node id of the type's encoding node; the registry keys
/// decodable types by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireTypeId(String);

impl WireTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert back to the node id it was derived from.
    pub fn to_node_id(&self) -> NodeId {
        NodeId(self.0.clone())
    }
}

impl fmt::Display for WireTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&NodeId> for WireTypeId {
    fn from(node: &NodeId) -> Self {
        Self(node.0.clone())
    }
}

impl From<NodeId> for WireTypeId {
    fn from(node: NodeId) -> Self {
        Self(node.0)
    }
}

impl From<&str> for WireTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
