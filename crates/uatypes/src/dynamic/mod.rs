// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Materialized custom types.
//!
//! Runtime type descriptions built from a [`crate::model::TypeModel`]
//! without generating code: a record is a list of field descriptors, an
//! enumeration a list of `(name, value)` members. The binary codec walks
//! the descriptors to encode and decode extension-object bodies.
//!
//! # Features
//!
//! - **MaterializedType**: record or enumeration, shared via `Arc`
//! - **Value / RecordValue**: default-constructed instances with named field access
//! - **Materializer**: resolves field types against earlier entries, known
//!   types and the structured built-ins
//!
//! # Example
//!
//! ```rust
//! use uatypes::dynamic::{Materializer, NoKnownTypes, Value};
//! use uatypes::model::TypeModel;
//!
//! let model = TypeModel::from_xml(r#"
//!     <TypeDictionary>
//!       <StructuredType Name="Point">
//!         <Field Name="X" TypeName="opc:Int32" />
//!         <Field Name="Y" TypeName="opc:Int32" />
//!       </StructuredType>
//!     </TypeDictionary>"#).unwrap();
//!
//! let types = Materializer::new(&NoKnownTypes).materialize(&model).unwrap();
//! let point = types.get("Point").unwrap().instantiate();
//!
//! let record = point.as_record().unwrap();
//! assert_eq!(record.get("X").unwrap(), &Value::Int32(0));
//! ```

mod materializer;
mod type_descriptor;
mod value;

pub use materializer::{
    materialize, KnownTypes, MaterializeError, MaterializedSet, Materializer, NoKnownTypes,
};
pub use type_descriptor::{
    BuiltinKind, EnumDescriptor, EnumMember, FieldDescriptor, FieldType, MaterializedType,
    RecordDescriptor,
};
pub use value::{EnumValue, RecordValue, Value, ValueError};
