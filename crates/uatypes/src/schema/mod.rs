// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema document parser.
//!
//! Turns an OPC binary type dictionary (or any markup with the same element
//! names) into an owned tree of untyped nodes. Element and attribute lookups
//! use local names only: `opc:StructuredType` and `StructuredType` match the
//! same query.
//!
//! The tree knows nothing about records or enumerations; see
//! [`crate::model`] for that.

mod sanitize;

pub use sanitize::{clean_name, strip_namespace};

use roxmltree::Document;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to turn schema bytes into a parse tree.
#[derive(Debug, Error)]
pub enum SchemaParseError {
    #[error("schema document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed schema document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to read schema document: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed schema document (owned tree rooted at the document element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    root: SchemaNode,
}

impl SchemaDocument {
    /// Parse schema text.
    pub fn parse(text: &str) -> Result<Self, SchemaParseError> {
        let doc = Document::parse(text)?;
        Ok(Self {
            root: SchemaNode::from_xml(doc.root_element()),
        })
    }

    /// Parse raw schema bytes as fetched from a node value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaParseError> {
        let text = std::str::from_utf8(bytes)?;
        Self::parse(text)
    }

    /// Load and parse a schema document from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaParseError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Document element.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }
}

/// One element of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();
        let children = node
            .children()
            .filter(|n| n.is_element())
            .map(SchemaNode::from_xml)
            .collect();

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }

    /// Element name without namespace prefix.
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Direct child elements with the given local name, in document order.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a SchemaNode> {
        self.children.iter().filter(move |c| c.name == local)
    }

    /// This node and all its descendants with the given local name, in
    /// document (pre-)order.
    pub fn descendants_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a SchemaNode> {
        Descendants { stack: vec![self] }.filter(move |n| n.name == local)
    }
}

/// Pre-order walk over a subtree, self included.
struct Descendants<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
