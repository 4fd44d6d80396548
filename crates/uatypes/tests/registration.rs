// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::too_many_lines)] // Example/test code

//! Registration driver integration tests
//!
//! Runs the full fetch -> register pipeline against an in-memory address
//! space and checks what ends up in the registry.

use std::collections::HashMap;
use std::sync::Mutex;
use uatypes::driver::ChildDescription;
use uatypes::dynamic::Value;
use uatypes::{
    AddressSpace, Anomaly, BoxError, DriverError, LoaderConfig, Manifest, NodeId,
    RegistrationDriver, Stage, TypeRegistry, WireTypeId,
};

const OPC_BINARY: &str = "i=93";

/// Address space held in memory, with a call log.
#[derive(Default)]
struct InMemoryAddressSpace {
    values: HashMap<NodeId, Vec<u8>>,
    children: HashMap<NodeId, Vec<ChildDescription>>,
    descriptions: HashMap<NodeId, Vec<NodeId>>,
    fetched: Mutex<Vec<NodeId>>,
}

impl InMemoryAddressSpace {
    /// Add a dictionary node under "OPC Binary".
    fn dictionary(&mut self, browse_name: &str, node: &str, xml: &str) -> &mut Self {
        let node = NodeId::new(node);
        self.values.insert(node.clone(), xml.as_bytes().to_vec());
        self.children
            .entry(NodeId::new(OPC_BINARY))
            .or_default()
            .push(ChildDescription::new(browse_name, node));
        self
    }

    /// Add a child of `parent`, optionally described by `description`.
    fn child(
        &mut self,
        parent: &str,
        browse_name: &str,
        node: &str,
        description: Option<&str>,
    ) -> &mut Self {
        self.children
            .entry(NodeId::new(parent))
            .or_default()
            .push(ChildDescription::new(browse_name, node));
        if let Some(target) = description {
            self.descriptions
                .insert(NodeId::new(node), vec![NodeId::new(target)]);
        }
        self
    }

    fn fetched(&self) -> Vec<NodeId> {
        self.fetched.lock().expect("log lock").clone()
    }
}

impl AddressSpace for InMemoryAddressSpace {
    fn fetch_schema_document(&self, node: &NodeId) -> Result<Vec<u8>, BoxError> {
        self.fetched.lock().expect("log lock").push(node.clone());
        self.values
            .get(node)
            .cloned()
            .ok_or_else(|| format!("no value for {}", node).into())
    }

    fn list_child_descriptions(&self, node: &NodeId) -> Result<Vec<ChildDescription>, BoxError> {
        Ok(self.children.get(node).cloned().unwrap_or_default())
    }

    fn has_description_references(&self, node: &NodeId) -> Result<Vec<NodeId>, BoxError> {
        Ok(self.descriptions.get(node).cloned().unwrap_or_default())
    }
}

fn dictionary(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<opc:TypeDictionary xmlns:opc="http://opcfoundation.org/BinarySchema/"
    xmlns:ua="http://opcfoundation.org/UA/" xmlns:tns="urn:vendor:types"
    DefaultByteOrder="LittleEndian" TargetNamespace="urn:vendor:types">
{}
</opc:TypeDictionary>"#,
        body
    )
}

fn point_dictionary() -> String {
    dictionary(
        r#"<opc:StructuredType Name="Point">
             <opc:Field Name="X" TypeName="opc:Int32" />
             <opc:Field Name="Y" TypeName="opc:Int32" />
           </opc:StructuredType>"#,
    )
}

#[test]
fn test_described_children_bind_and_mismatches_are_reported() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary("Vendor", "ns=2;i=100", &point_dictionary())
        .child("ns=2;i=100", "Point", "ns=2;i=101", Some("ns=2;i=5001"))
        .child("ns=2;i=100", "Extra", "ns=2;i=102", Some("ns=2;i=5002"));

    let registry = TypeRegistry::new();
    let driver = RegistrationDriver::new(&space, &registry);
    let report = driver
        .register_node(&NodeId::new("ns=2;i=100"))
        .expect("register");

    let point = registry
        .lookup_by_wire_type_id(&WireTypeId::new("ns=2;i=5001"))
        .expect("Point by id");
    assert!(point.ptr_eq(&registry.lookup_by_name("Point").expect("Point by name")));
    assert!(registry.lookup_by_name("Extra").is_none());
    assert_eq!(registry.len(), 1);

    assert_eq!(
        report.anomalies,
        vec![Anomaly::DescribedNodeMismatch {
            name: "Extra".into(),
            node: NodeId::new("ns=2;i=102"),
        }]
    );

    let instance = point.instantiate();
    let record = instance.as_record().expect("record");
    assert_eq!(record.get("X").expect("X"), &Value::Int32(0));
    assert_eq!(record.get("Y").expect("Y"), &Value::Int32(0));
}

#[test]
fn test_undescribed_children_are_ignored_and_leftovers_registered_by_name() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary(
            "Vendor",
            "ns=2;i=100",
            &dictionary(
                r#"<opc:StructuredType Name="Point">
                     <opc:Field Name="X" TypeName="opc:Int32" />
                   </opc:StructuredType>
                   <opc:EnumeratedType Name="Color">
                     <opc:EnumeratedValue Name="Red" Value="0" />
                   </opc:EnumeratedType>"#,
            ),
        )
        .child("ns=2;i=100", "NamespaceUri", "ns=2;i=110", None)
        .child("ns=2;i=100", "Point", "ns=2;i=101", Some("ns=2;i=5001"))
        .child("ns=2;i=100", "Color", "ns=2;i=103", None);

    let registry = TypeRegistry::new();
    let driver = RegistrationDriver::new(&space, &registry);
    let report = driver
        .register_node(&NodeId::new("ns=2;i=100"))
        .expect("register");

    assert!(report.anomalies.is_empty());
    assert_eq!(report.wire_type_id("Point"), Some(&WireTypeId::new("ns=2;i=5001")));
    assert_eq!(report.name_only, vec!["Color".to_string()]);

    let color = registry.entry_by_name("Color").expect("Color");
    assert_eq!(color.wire_type_id, None);
    assert!(color.materialized_type.as_enum().is_some());
}

#[test]
fn test_browse_names_are_sanitized_before_matching() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary(
            "Vendor",
            "ns=2;i=100",
            &dictionary(r#"<opc:StructuredType Name="3D Pose" />"#),
        )
        .child("ns=2;i=100", "3D Pose", "ns=2;i=101", Some("ns=2;i=5010"));

    let registry = TypeRegistry::new();
    RegistrationDriver::new(&space, &registry)
        .register_node(&NodeId::new("ns=2;i=100"))
        .expect("register");

    let entry = registry
        .entry_by_wire_type_id(&WireTypeId::new("ns=2;i=5010"))
        .expect("pose");
    assert_eq!(entry.type_name, "_3D_Pose");
}

#[test]
fn test_unresolved_reference_registers_nothing() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary(
            "Vendor",
            "ns=2;i=100",
            &dictionary(
                r#"<opc:StructuredType Name="Point">
                     <opc:Field Name="X" TypeName="opc:Int32" />
                   </opc:StructuredType>
                   <opc:StructuredType Name="AlarmEvent">
                     <opc:Field Name="Alarm" TypeName="ns3:CustomAlarm" />
                   </opc:StructuredType>"#,
            ),
        )
        .child("ns=2;i=100", "Point", "ns=2;i=101", Some("ns=2;i=5001"));

    let registry = TypeRegistry::new();
    let err = RegistrationDriver::new(&space, &registry)
        .register_node(&NodeId::new("ns=2;i=100"))
        .expect_err("unresolved");

    assert_eq!(err.stage(), Stage::Materialize);
    assert!(matches!(err, DriverError::Materialize(_)));
    assert!(err.to_string().contains("CustomAlarm"));
    assert!(registry.is_empty());
}

#[test]
fn test_later_dictionary_sees_earlier_types() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary(
            "Base",
            "ns=2;i=100",
            &dictionary(
                r#"<opc:EnumeratedType Name="Color">
                     <opc:EnumeratedValue Name="Red" Value="0" />
                     <opc:EnumeratedValue Name="Green" Value="1" />
                   </opc:EnumeratedType>"#,
            ),
        )
        .dictionary(
            "Derived",
            "ns=3;i=100",
            &dictionary(
                r#"<opc:StructuredType Name="Lamp">
                     <opc:Field Name="Color" TypeName="ns2:Color" />
                   </opc:StructuredType>"#,
            ),
        );

    let registry = TypeRegistry::new();
    let outcome = RegistrationDriver::new(&space, &registry)
        .register_nodes(&[NodeId::new("ns=2;i=100"), NodeId::new("ns=3;i=100")]);
    assert!(outcome.is_complete());

    let lamp = registry.lookup_by_name("Lamp").expect("Lamp").instantiate();
    let color = lamp
        .as_record()
        .expect("record")
        .get("Color")
        .expect("Color")
        .as_enum()
        .expect("enum")
        .clone();
    assert_eq!(color.name.as_deref(), Some("Red"));
}

#[test]
fn test_batch_continues_after_failure() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary("Broken", "ns=2;i=100", "<opc:TypeDictionary>")
        .dictionary("Vendor", "ns=3;i=100", &point_dictionary());

    let registry = TypeRegistry::new();
    let outcome = RegistrationDriver::new(&space, &registry)
        .load_type_definitions(Some(&[
            NodeId::new("ns=2;i=100"),
            NodeId::new("ns=3;i=100"),
        ]))
        .expect("batch");

    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    let (node, err) = &outcome.failures[0];
    assert_eq!(node, &NodeId::new("ns=2;i=100"));
    assert_eq!(err.stage(), Stage::Parse);
    assert!(registry.lookup_by_name("Point").is_some());
}

#[test]
fn test_discovery_skips_standard_dictionary() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary("Opc.Ua", "i=7617", &point_dictionary())
        .dictionary("Vendor", "ns=2;i=100", &point_dictionary());

    let registry = TypeRegistry::new();
    let driver = RegistrationDriver::new(&space, &registry);

    assert_eq!(
        driver.discover_schema_nodes().expect("discover"),
        vec![NodeId::new("ns=2;i=100")]
    );

    let outcome = driver.load_type_definitions(None).expect("load");
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(space.fetched(), vec![NodeId::new("ns=2;i=100")]);
}

#[test]
fn test_custom_dictionary_root() {
    let mut space = InMemoryAddressSpace::default();
    space.dictionary("Vendor", "ns=2;i=100", &point_dictionary());
    space.child("ns=5;i=1", "Other", "ns=5;i=2", None);

    let config = LoaderConfig::from_yaml_str("dictionary_root: \"ns=5;i=1\"\n").expect("config");
    let registry = TypeRegistry::with_config(&config);
    let driver = RegistrationDriver::with_config(&space, &registry, config);

    assert_eq!(
        driver.discover_schema_nodes().expect("discover"),
        vec![NodeId::new("ns=5;i=2")]
    );
}

#[test]
fn test_overwrite_across_nodes_keeps_old_id() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary("First", "ns=2;i=100", &point_dictionary())
        .child("ns=2;i=100", "Point", "ns=2;i=101", Some("ns=2;i=5001"))
        .dictionary("Second", "ns=3;i=100", &point_dictionary())
        .child("ns=3;i=100", "Point", "ns=3;i=101", Some("ns=3;i=5001"));

    let registry = TypeRegistry::new();
    let outcome = RegistrationDriver::new(&space, &registry)
        .load_type_definitions(None)
        .expect("load");
    assert!(outcome.is_complete());

    let overwrites: Vec<_> = outcome.anomalies().collect();
    assert_eq!(
        overwrites,
        vec![&Anomaly::RegistryOverwrite {
            name: "Point".into(),
            previous: Some(WireTypeId::new("ns=2;i=5001")),
            current: Some(WireTypeId::new("ns=3;i=5001")),
        }]
    );

    let old = registry
        .lookup_by_wire_type_id(&WireTypeId::new("ns=2;i=5001"))
        .expect("old id");
    let new = registry
        .lookup_by_wire_type_id(&WireTypeId::new("ns=3;i=5001"))
        .expect("new id");
    assert!(!old.ptr_eq(&new));
    assert!(registry.lookup_by_name("Point").expect("Point").ptr_eq(&new));
}

#[test]
fn test_manifest_of_report() {
    let mut space = InMemoryAddressSpace::default();
    space
        .dictionary("Vendor", "ns=2;i=100", &point_dictionary())
        .child("ns=2;i=100", "Point", "ns=2;i=101", Some("ns=2;i=5001"));

    let registry = TypeRegistry::new();
    let report = RegistrationDriver::new(&space, &registry)
        .register_node(&NodeId::new("ns=2;i=100"))
        .expect("register");

    let yaml = Manifest::from_model(&report.model).to_yaml().expect("yaml");
    assert!(yaml.contains("Point"));
    assert!(yaml.contains("ns=2;i=5001"));
}
