//! Model building functionality
//!
//! Provides the fluent builder, the conventions applied at finalization,
//! cached model sources and loading of model documents.

pub mod builder;
pub mod conventions;
pub mod error;
pub mod loader;
pub mod source;

pub use builder::{EntityTypeBuilder, IndexBuilder, KeyBuilder, ModelBuilder, PropertyBuilder};
pub use conventions::{
    ConventionSet, KeyValueGenerationConvention, ModelBuiltConvention, TypeMappingConvention,
    ValidatingConvention, ValueGenerationStrategyConvention,
};
pub use error::{ModelBuildError, ModelBuildResult};
pub use loader::{ModelFormat, ModelLoader};
pub use source::{ModelSource, TestModelSource};
