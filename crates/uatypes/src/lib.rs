// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA custom data type loader
//!
//! Compiles the binary type dictionaries published by a server into
//! runtime type descriptions, and registers them so extension-object
//! payloads can be encoded and decoded without generated code.
//!
//! # Features
//!
//! - **Schema Parser**: dictionary markup -> owned, namespace-agnostic tree
//! - **Type Model**: records and enumerations with sanitized names, array
//!   flags and default recipes
//! - **Materializer**: records with wire descriptors, integer-backed enums
//! - **Type Registry**: lock-free lookups by name and wire type id
//! - **Registration Driver**: discovery, cross-referencing and registration
//!   against an [`driver::AddressSpace`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use uatypes::{RegistrationDriver, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let driver = RegistrationDriver::new(&client, &registry);
//! let outcome = driver.load_type_definitions(None)?;
//!
//! for (node, error) in &outcome.failures {
//!     eprintln!("{}: {}", node, error);
//! }
//! let point = registry.lookup_by_name("Point").unwrap();
//! let instance = point.instantiate();
//! ```
//!
//! # Configuration File
//!
//! ```yaml
//! dictionary_root: "i=93"
//! skip_dictionaries: [Opc.Ua]
//! log_overwrites: true
//! ```

pub mod config;
pub mod driver;
pub mod dynamic;
pub mod error;
pub mod ids;
pub mod manifest;
pub mod model;
pub mod registry;
pub mod schema;

pub use config::{ConfigError, LoaderConfig};
pub use driver::{
    AddressSpace, Anomaly, ChildDescription, LoadOutcome, RegistrationDriver, RegistrationReport,
    Stage,
};
pub use dynamic::{MaterializeError, MaterializedType, Materializer, Value};
pub use error::{BoxError, DriverError, Result};
pub use ids::{NodeId, WireTypeId};
pub use manifest::{Manifest, ManifestError};
pub use model::{ModelError, TypeModel};
pub use registry::{Registration, RegistryEntry, TypeRegistry};
pub use schema::{SchemaDocument, SchemaParseError};
