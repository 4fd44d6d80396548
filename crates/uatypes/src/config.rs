// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Loader configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! # uatypes.yaml
//! dictionary_root: "i=93"
//! skip_dictionaries:
//!   - Opc.Ua
//! log_overwrites: true
//! ```
//!
//! Every key is optional; missing keys take the defaults of
//! [`LoaderConfig::default`].

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Node holding the binary type dictionaries of a server ("OPC Binary").
pub const DEFAULT_DICTIONARY_ROOT: &str = "i=93";

/// Dictionary of the protocol's own built-in types.
pub const STANDARD_DICTIONARY: &str = "Opc.Ua";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings of the registration driver and registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Parent of the schema-bearing nodes scanned by discovery.
    pub dictionary_root: NodeId,

    /// Dictionary browse names discovery ignores.
    pub skip_dictionaries: Vec<String>,

    /// Emit a warning whenever a registration replaces an existing name.
    pub log_overwrites: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dictionary_root: NodeId::new(DEFAULT_DICTIONARY_ROOT),
            skip_dictionaries: vec![STANDARD_DICTIONARY.to_string()],
            log_overwrites: true,
        }
    }
}

impl LoaderConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Whether discovery should ignore a dictionary with this browse name.
    pub fn skips(&self, browse_name: &str) -> bool {
        self.skip_dictionaries.iter().any(|s| s == browse_name)
    }
}
