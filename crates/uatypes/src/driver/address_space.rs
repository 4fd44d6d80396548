// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Address-space collaborator.

use crate::error::BoxError;
use crate::ids::NodeId;

/// Browse result entry: one child of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDescription {
    /// Unqualified browse name (namespace index dropped).
    pub browse_name: String,
    pub node_id: NodeId,
}

impl ChildDescription {
    pub fn new(browse_name: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self {
            browse_name: browse_name.into(),
            node_id: node_id.into(),
        }
    }
}

/// Narrow view of a server address space used by the registration driver.
///
/// Implementations are expected to block until the server answers; the
/// driver treats every call as a single fetch.
pub trait AddressSpace {
    /// Value of a schema-bearing node: the raw dictionary bytes.
    fn fetch_schema_document(&self, node: &NodeId) -> Result<Vec<u8>, BoxError>;

    /// Direct children of `node`.
    fn list_child_descriptions(&self, node: &NodeId) -> Result<Vec<ChildDescription>, BoxError>;

    /// Targets of inverse HasDescription references of `node`, in server
    /// order. Empty when the node describes nothing.
    fn has_description_references(&self, node: &NodeId) -> Result<Vec<NodeId>, BoxError>;
}

impl<T: AddressSpace + ?Sized> AddressSpace for &T {
    fn fetch_schema_document(&self, node: &NodeId) -> Result<Vec<u8>, BoxError> {
        (**self).fetch_schema_document(node)
    }

    fn list_child_descriptions(&self, node: &NodeId) -> Result<Vec<ChildDescription>, BoxError> {
        (**self).list_child_descriptions(node)
    }

    fn has_description_references(&self, node: &NodeId) -> Result<Vec<NodeId>, BoxError> {
        (**self).has_description_references(node)
    }
}
