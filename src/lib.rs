//! Relational Model SDK - model metadata and SQL Server model validation
//!
//! Provides unified interfaces for:
//! - Entity type metadata with provenance-aware annotations
//! - Model building, conventions and cached model sources
//! - Relational and SQL Server model validation
//! - Diagnostics logging with configurable warning behavior
//! - Member translation to SQL Server expressions

pub mod config;
pub mod diagnostics;
pub mod model;
pub mod models;
pub mod query;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, ValidatorConfig, WarningBehavior};
pub use diagnostics::{
    DiagnosticEvent, DiagnosticsLoggers, DiagnosticsSink, EventId, LoggerCategory, MemorySink,
    TracingSink, WarningAsError,
};
pub use model::{
    ConventionSet, ModelBuildError, ModelBuilder, ModelLoader, ModelSource, TestModelSource,
};
pub use query::{CompositeMemberTranslator, MemberInfo, MemberTranslator, SqlExpression};
pub use validation::{ModelValidationError, ModelValidator, ValidationResult};

// Re-export models
pub use models::{
    ClrType, ConfigurationSource, EntityType, Index, Key, Model, Property,
    SqlServerValueGenerationStrategy, ValueGenerated,
};
