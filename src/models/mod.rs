//! Models module for the SDK
//!
//! Defines the metadata graph consumed by validation and translation:
//! entity types, properties, keys, indexes and their annotations, plus
//! the relational and SQL Server views over those annotations.

pub mod annotations;
pub mod clr_type;
pub mod entity_type;
pub mod key;
pub mod model;
pub mod property;
pub mod relational;
pub mod sql_server;

pub use annotations::{
    Annotation, AnnotationValue, Annotations, ConfigurationSource, Configured, names,
};
pub use clr_type::{ClrType, ParseClrTypeError};
pub use entity_type::EntityType;
pub use key::{ForeignKey, Index, Key, format_properties};
pub use model::{Model, TableMapping};
pub use property::{Property, ValueGenerated};
pub use relational::{
    RelationalEntityTypeAnnotations, RelationalKeyAnnotations, RelationalPropertyAnnotations,
};
pub use sql_server::{
    SqlServerEntityTypeAnnotations, SqlServerIndexAnnotations, SqlServerKeyAnnotations,
    SqlServerModelAnnotations, SqlServerPropertyAnnotations, SqlServerValueGenerationStrategy,
    default_store_type,
};
