//! protojson-core - Schema model, type mapping, and naming rules
//!
//! This crate provides the foundational types shared by the protojson code
//! generators:
//! - [`FileSpec`], [`MessageSpec`], [`FieldSpec`], [`ServiceSpec`] and
//!   [`MethodSpec`], the read-only schema view the generators consume
//! - [`JavaType`] and [`java_type`] for mapping field kinds to Java and `org.json`
//! - [`naming`] for protobuf's Java naming conventions
//! - [`CodegenError`] for error handling
//! - [`GeneratorConfig`] for plugin configuration

mod config;
mod error;
pub mod naming;
mod schema;
mod types;

pub use config::GeneratorConfig;
pub use error::{CodegenError, CodegenResult};
pub use schema::{
    Cardinality, FieldKind, FieldSpec, FileSpec, HttpBinding, MapEntry, MessageSpec, MethodSpec,
    ServiceSpec,
};
pub use types::{JavaType, box_value, java_type, value_to_string};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Cardinality, CodegenError, CodegenResult, FieldKind, FieldSpec, FileSpec,
        GeneratorConfig, HttpBinding, JavaType, MapEntry, MessageSpec, MethodSpec, ServiceSpec,
    };
}
