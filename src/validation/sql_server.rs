//! SQL Server model validation rules
//!
//! Provider rules are registered after the generic relational ones. The
//! memory-optimized table check is the exception: it runs before the
//! generic table check because a mismatch there makes the other table
//! comparisons meaningless.

use super::error::{ModelValidationError, ValidationResult};
use super::pipeline::{ModelCheck, ModelValidator, SharedTableCheck, SharedTableCompatibility};
use super::relational::{PrimaryKeyNameCheck, SharedColumnCheck, SharedKeyColumnsCheck};
use crate::diagnostics::{DiagnosticsLoggers, LoggerCategory};
use crate::models::{
    EntityType, Key, Model, Property, SqlServerValueGenerationStrategy, TableMapping,
    ValueGenerated, format_properties, names,
};
use std::collections::HashMap;

/// Register the SQL Server pipeline on `validator`
pub fn register(validator: ModelValidator) -> ModelValidator {
    let shared = SharedTableCompatibility::new()
        .table_check(MemoryOptimizedTableCheck)
        .table_check(PrimaryKeyNameCheck)
        .column_check(SharedColumnCheck)
        .column_check(IdentityColumnSharingCheck)
        .key_check(SharedKeyColumnsCheck)
        .key_check(KeyClusteringCheck);

    validator
        .with_check(DecimalDefaultMappingCheck)
        .with_check(ByteIdentityMappingCheck)
        .with_check(NonKeyValueGenerationCheck)
        .with_check(IndexIncludePropertiesCheck)
        .with_check(shared)
}

/// Warns about decimal columns left on the default precision and scale
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalDefaultMappingCheck;

impl DecimalDefaultMappingCheck {
    /// Whether neither the column type nor the type mapping reflects user intent
    fn uses_default_mapping(property: &Property) -> bool {
        match property.relational().column_type_annotation() {
            Some(column_type) => !column_type.source.is_explicit(),
            None => property
                .annotations
                .source(names::TYPE_MAPPING)
                .is_none_or(|source| !source.is_explicit()),
        }
    }
}

impl ModelCheck for DecimalDefaultMappingCheck {
    fn name(&self) -> &'static str {
        "sql_server_default_decimal_mapping"
    }

    fn validate(&self, model: &Model, loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        let logger = loggers.logger(LoggerCategory::ModelValidation);

        for (entity_type, property) in model.declared_properties() {
            if property.clr_type.is_decimal()
                && !entity_type.is_foreign_key(&property.name)
                && Self::uses_default_mapping(property)
            {
                logger.decimal_type_default_warning(entity_type, property)?;
            }
        }
        Ok(())
    }
}

/// Warns about single-byte identity columns
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteIdentityMappingCheck;

impl ModelCheck for ByteIdentityMappingCheck {
    fn name(&self) -> &'static str {
        "sql_server_byte_identity_mapping"
    }

    fn validate(&self, model: &Model, loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        let logger = loggers.logger(LoggerCategory::ModelValidation);

        for (entity_type, property) in model.declared_properties() {
            if property.clr_type.is_byte()
                && property.sql_server().value_generation_strategy(model)
                    == Some(SqlServerValueGenerationStrategy::IdentityColumn)
            {
                logger.byte_identity_column_warning(entity_type, property)?;
            }
        }
        Ok(())
    }
}

/// Sequence hi-lo generation configured on a property outside any key
#[derive(Debug, Clone, Copy, Default)]
pub struct NonKeyValueGenerationCheck;

impl ModelCheck for NonKeyValueGenerationCheck {
    fn name(&self) -> &'static str {
        "sql_server_non_key_value_generation"
    }

    fn validate(&self, model: &Model, _loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        for (entity_type, property) in model.declared_properties() {
            let sql_server = property.sql_server();
            if sql_server.own_value_generation_strategy()
                == Some(SqlServerValueGenerationStrategy::SequenceHiLo)
                && !entity_type.is_key(&property.name)
                && property.value_generated() != ValueGenerated::Never
                && sql_server
                    .value_generation_strategy_annotation()
                    .is_none_or(|annotation| annotation.source.is_explicit())
            {
                return Err(ModelValidationError::NonKeyValueGeneration {
                    property: property.name.clone(),
                    entity_type: entity_type.display_name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Index include lists must name existing, distinct, non-index properties
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexIncludePropertiesCheck;

impl ModelCheck for IndexIncludePropertiesCheck {
    fn name(&self) -> &'static str {
        "sql_server_index_include_properties"
    }

    fn validate(&self, model: &Model, _loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        for entity_type in &model.entity_types {
            for index in &entity_type.indexes {
                let include = match index.sql_server().include_properties() {
                    Some(include) if !include.is_empty() => include,
                    _ => continue,
                };
                let entity_name = entity_type.display_name();

                if let Some(missing) = include
                    .iter()
                    .find(|name| entity_type.find_property(name).is_none())
                {
                    return Err(ModelValidationError::IncludePropertyNotFound {
                        entity_type: entity_name.to_string(),
                        property: missing.clone(),
                    });
                }

                // First name, in list order, that occurs more than once
                if let Some(duplicate) = include
                    .iter()
                    .find(|name| include.iter().filter(|other| other == name).count() > 1)
                {
                    return Err(ModelValidationError::IncludePropertyDuplicated {
                        entity_type: entity_name.to_string(),
                        property: duplicate.clone(),
                    });
                }

                if let Some(in_index) = include
                    .iter()
                    .find(|name| index.properties.contains(name))
                {
                    return Err(ModelValidationError::IncludePropertyInIndex {
                        entity_type: entity_name.to_string(),
                        property: in_index.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Entity types sharing a table must agree on memory optimization
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryOptimizedTableCheck;

impl SharedTableCheck for MemoryOptimizedTableCheck {
    fn name(&self) -> &'static str {
        "sql_server_memory_optimized_table"
    }

    fn validate(
        &self,
        _model: &Model,
        table: &TableMapping<'_>,
        _loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()> {
        let Some((&first, others)) = table.entity_types.split_first() else {
            return Ok(());
        };
        let is_memory_optimized = first.sql_server().is_memory_optimized();

        for &other in others {
            if other.sql_server().is_memory_optimized() != is_memory_optimized {
                let (optimized, plain) = if is_memory_optimized {
                    (first, other)
                } else {
                    (other, first)
                };
                return Err(
                    ModelValidationError::IncompatibleTableMemoryOptimizedMismatch {
                        table: table.to_string(),
                        entity_type: first.display_name().to_string(),
                        other_entity_type: other.display_name().to_string(),
                        memory_optimized_entity_type: optimized.display_name().to_string(),
                        non_memory_optimized_entity_type: plain.display_name().to_string(),
                    },
                );
            }
        }
        Ok(())
    }
}

/// Shared columns must agree on identity generation; one identity per table
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityColumnSharingCheck;

impl SharedTableCheck for IdentityColumnSharingCheck {
    fn name(&self) -> &'static str {
        "sql_server_identity_columns"
    }

    fn validate(
        &self,
        model: &Model,
        table: &TableMapping<'_>,
        _loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()> {
        const IDENTITY: Option<SqlServerValueGenerationStrategy> =
            Some(SqlServerValueGenerationStrategy::IdentityColumn);

        let mut identity_columns: Vec<(&EntityType, &Property)> = Vec::new();
        let mut columns: HashMap<&str, (&EntityType, &Property)> = HashMap::new();

        for &entity_type in &table.entity_types {
            for property in &entity_type.properties {
                let column = property.relational().column_name();
                let strategy = property.sql_server().value_generation_strategy(model);

                match columns.get(column) {
                    Some(&(other_type, other)) => {
                        let other_strategy = other.sql_server().value_generation_strategy(model);
                        if strategy != other_strategy
                            && (strategy == IDENTITY || other_strategy == IDENTITY)
                        {
                            return Err(
                                ModelValidationError::DuplicateColumnNameValueGenerationStrategyMismatch {
                                    entity_type1: other_type.display_name().to_string(),
                                    property1: other.name.clone(),
                                    entity_type2: entity_type.display_name().to_string(),
                                    property2: property.name.clone(),
                                    column: column.to_string(),
                                    table: table.to_string(),
                                },
                            );
                        }
                    }
                    None => {
                        columns.insert(column, (entity_type, property));
                        if strategy == IDENTITY {
                            identity_columns.push((entity_type, property));
                        }
                    }
                }
            }
        }

        if identity_columns.len() > 1 {
            let properties = identity_columns
                .iter()
                .map(|(entity_type, property)| {
                    format!("'{}.{}'", entity_type.display_name(), property.name)
                })
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ModelValidationError::MultipleIdentityColumns {
                properties,
                table: table.to_string(),
            });
        }
        Ok(())
    }
}

/// Keys sharing a constraint name must agree on clustering
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyClusteringCheck;

impl SharedTableCheck for KeyClusteringCheck {
    fn name(&self) -> &'static str {
        "sql_server_key_clustering"
    }

    fn validate(
        &self,
        _model: &Model,
        table: &TableMapping<'_>,
        _loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()> {
        let mut keys: HashMap<String, (&EntityType, &Key)> = HashMap::new();

        for &entity_type in &table.entity_types {
            for key in &entity_type.keys {
                let name = key.relational(entity_type).name();
                let (other_type, other_key) = match keys.get(&name) {
                    Some(&found) => found,
                    None => {
                        keys.insert(name, (entity_type, key));
                        continue;
                    }
                };

                if key.sql_server().is_clustered() != other_key.sql_server().is_clustered() {
                    return Err(ModelValidationError::DuplicateKeyMismatchedClustering {
                        key1: format_properties(&key.properties),
                        entity_type1: entity_type.display_name().to_string(),
                        key2: format_properties(&other_key.properties),
                        entity_type2: other_type.display_name().to_string(),
                        table: table.to_string(),
                        key_name: name,
                    });
                }
            }
        }
        Ok(())
    }
}
