//! Validation functionality
//!
//! Provides model validation for:
//! - Generic relational rules on tables shared by several entity types
//! - SQL Server rules (decimal and byte identity warnings, hi-lo sequences,
//!   index include lists, memory-optimized tables, identity columns, key
//!   clustering)

pub mod error;
pub mod pipeline;
pub mod relational;
pub mod sql_server;

pub use error::{ModelValidationError, ValidationResult};
pub use pipeline::{ModelCheck, ModelValidator, SharedTableCheck, SharedTableCompatibility};
