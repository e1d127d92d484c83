//! Error types for model validation
//!
//! Every fatal rule has its own variant so callers can match on the
//! violation while the `Display` text stays a readable, fixed template.

use crate::diagnostics::WarningAsError;
use thiserror::Error;

/// A model configuration that cannot be mapped to the database
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    #[error(
        "The property '{property}' on entity type '{entity_type}' is configured to use 'SequenceHiLo' value generator, which is only intended for keys. If this was intentional configure an alternate key on the property, otherwise call 'value_generated_never' or configure store generation for this property."
    )]
    NonKeyValueGeneration {
        property: String,
        entity_type: String,
    },

    #[error("Include property '{entity_type}.{property}' not found.")]
    IncludePropertyNotFound {
        entity_type: String,
        property: String,
    },

    #[error("Include property '{entity_type}.{property}' cannot be defined multiple times.")]
    IncludePropertyDuplicated {
        entity_type: String,
        property: String,
    },

    #[error("Include property '{entity_type}.{property}' is already included in the index.")]
    IncludePropertyInIndex {
        entity_type: String,
        property: String,
    },

    #[error(
        "Cannot use table '{table}' for entity type '{entity_type}' since it is being used for entity type '{other_entity_type}' and entity type '{memory_optimized_entity_type}' is marked as memory-optimized, but entity type '{non_memory_optimized_entity_type}' is not."
    )]
    IncompatibleTableMemoryOptimizedMismatch {
        table: String,
        entity_type: String,
        other_entity_type: String,
        memory_optimized_entity_type: String,
        non_memory_optimized_entity_type: String,
    },

    #[error(
        "Cannot use table '{table}' for entity type '{entity_type}' since it is being used for entity type '{other_entity_type}' and the name '{key_name}' of the primary key {primary_key} does not match the name '{other_key_name}' of the primary key {other_primary_key}."
    )]
    IncompatibleTableKeyNameMismatch {
        table: String,
        entity_type: String,
        other_entity_type: String,
        key_name: String,
        primary_key: String,
        other_key_name: String,
        other_primary_key: String,
    },

    #[error(
        "'{entity_type1}.{property1}' and '{entity_type2}.{property2}' are both mapped to column '{column}' in '{table}' but are configured to use different data types ('{data_type1}' and '{data_type2}')."
    )]
    DuplicateColumnNameDataTypeMismatch {
        entity_type1: String,
        property1: String,
        entity_type2: String,
        property2: String,
        column: String,
        table: String,
        data_type1: String,
        data_type2: String,
    },

    #[error(
        "'{entity_type1}.{property1}' and '{entity_type2}.{property2}' are both mapped to column '{column}' in '{table}' but are configured with different nullability."
    )]
    DuplicateColumnNameNullabilityMismatch {
        entity_type1: String,
        property1: String,
        entity_type2: String,
        property2: String,
        column: String,
        table: String,
    },

    #[error(
        "'{entity_type1}.{property1}' and '{entity_type2}.{property2}' are both mapped to column '{column}' in '{table}' but are configured to use different computed values ('{value1}' and '{value2}')."
    )]
    DuplicateColumnNameComputedSqlMismatch {
        entity_type1: String,
        property1: String,
        entity_type2: String,
        property2: String,
        column: String,
        table: String,
        value1: String,
        value2: String,
    },

    #[error(
        "'{entity_type1}.{property1}' and '{entity_type2}.{property2}' are both mapped to column '{column}' in '{table}' but are configured to use different default values ('{value1}' and '{value2}')."
    )]
    DuplicateColumnNameDefaultSqlMismatch {
        entity_type1: String,
        property1: String,
        entity_type2: String,
        property2: String,
        column: String,
        table: String,
        value1: String,
        value2: String,
    },

    #[error(
        "'{entity_type1}.{property1}' and '{entity_type2}.{property2}' are both mapped to column '{column}' in '{table}' but are configured with different value generation strategies."
    )]
    DuplicateColumnNameValueGenerationStrategyMismatch {
        entity_type1: String,
        property1: String,
        entity_type2: String,
        property2: String,
        column: String,
        table: String,
    },

    #[error(
        "The properties {properties} are configured to use 'Identity' value generator and are mapped to the same table '{table}'. Only one column per table can be configured as 'Identity'. Call 'value_generated_never' for properties that should not use 'Identity'."
    )]
    MultipleIdentityColumns { properties: String, table: String },

    #[error(
        "The keys {key1} on '{entity_type1}' and {key2} on '{entity_type2}' are both mapped to '{table}.{key_name}' but with different columns ({columns1} and {columns2})."
    )]
    DuplicateKeyColumnMismatch {
        key1: String,
        entity_type1: String,
        key2: String,
        entity_type2: String,
        table: String,
        key_name: String,
        columns1: String,
        columns2: String,
    },

    #[error(
        "The keys {key1} on '{entity_type1}' and {key2} on '{entity_type2}' are both mapped to '{table}.{key_name}' but with different clustering."
    )]
    DuplicateKeyMismatchedClustering {
        key1: String,
        entity_type1: String,
        key2: String,
        entity_type2: String,
        table: String,
        key_name: String,
    },

    #[error(transparent)]
    Warning(#[from] WarningAsError),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ModelValidationError>;

impl ModelValidationError {
    /// Whether the error came from a warning configured to throw
    pub fn is_warning(&self) -> bool {
        matches!(self, ModelValidationError::Warning(_))
    }
}
