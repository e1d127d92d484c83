//! Generic relational shared-table checks
//!
//! These hold for any relational provider: entity types that share a table
//! must agree on the primary key name, on the shape of every column they
//! share, and on the columns behind every key name they share.

use super::error::{ModelValidationError, ValidationResult};
use super::pipeline::{SharedTableCheck, SharedTableCompatibility};
use crate::diagnostics::DiagnosticsLoggers;
use crate::models::{EntityType, Key, Model, Property, TableMapping, format_properties};
use std::collections::HashMap;

/// Shared-table pass holding only the generic checks
pub fn shared_table_checks() -> SharedTableCompatibility {
    SharedTableCompatibility::new()
        .table_check(PrimaryKeyNameCheck)
        .column_check(SharedColumnCheck)
        .key_check(SharedKeyColumnsCheck)
}

/// Primary keys of co-located entity types must use the same name
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeyNameCheck;

impl SharedTableCheck for PrimaryKeyNameCheck {
    fn name(&self) -> &'static str {
        "relational_primary_key_name"
    }

    fn is_relational(&self) -> bool {
        true
    }

    fn validate(
        &self,
        _model: &Model,
        table: &TableMapping<'_>,
        _loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()> {
        let mut keyed = table
            .entity_types
            .iter()
            .filter_map(|et| et.primary_key().map(|key| (*et, key)));

        let Some((root, root_key)) = keyed.next() else {
            return Ok(());
        };
        let root_name = root_key.relational(root).name();

        for (entity_type, key) in keyed {
            let name = key.relational(entity_type).name();
            if name != root_name {
                return Err(ModelValidationError::IncompatibleTableKeyNameMismatch {
                    table: table.to_string(),
                    entity_type: entity_type.display_name().to_string(),
                    other_entity_type: root.display_name().to_string(),
                    key_name: name,
                    primary_key: format_properties(&key.properties),
                    other_key_name: root_name,
                    other_primary_key: format_properties(&root_key.properties),
                });
            }
        }
        Ok(())
    }
}

/// Properties mapped to the same column must agree on its definition
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedColumnCheck;

impl SharedColumnCheck {
    fn compare(
        table: &TableMapping<'_>,
        column: &str,
        (first_type, first): (&EntityType, &Property),
        (entity_type, property): (&EntityType, &Property),
    ) -> ValidationResult<()> {
        let a = first.relational();
        let b = property.relational();

        if let (Some(type1), Some(type2)) = (a.column_type(), b.column_type())
            && !type1.eq_ignore_ascii_case(type2)
        {
            return Err(ModelValidationError::DuplicateColumnNameDataTypeMismatch {
                entity_type1: first_type.display_name().to_string(),
                property1: first.name.clone(),
                entity_type2: entity_type.display_name().to_string(),
                property2: property.name.clone(),
                column: column.to_string(),
                table: table.to_string(),
                data_type1: type1.to_string(),
                data_type2: type2.to_string(),
            });
        }

        if first.is_nullable() != property.is_nullable() {
            return Err(ModelValidationError::DuplicateColumnNameNullabilityMismatch {
                entity_type1: first_type.display_name().to_string(),
                property1: first.name.clone(),
                entity_type2: entity_type.display_name().to_string(),
                property2: property.name.clone(),
                column: column.to_string(),
                table: table.to_string(),
            });
        }

        if a.computed_column_sql() != b.computed_column_sql() {
            return Err(ModelValidationError::DuplicateColumnNameComputedSqlMismatch {
                entity_type1: first_type.display_name().to_string(),
                property1: first.name.clone(),
                entity_type2: entity_type.display_name().to_string(),
                property2: property.name.clone(),
                column: column.to_string(),
                table: table.to_string(),
                value1: a.computed_column_sql().unwrap_or_default().to_string(),
                value2: b.computed_column_sql().unwrap_or_default().to_string(),
            });
        }

        if a.default_value_sql() != b.default_value_sql() {
            return Err(ModelValidationError::DuplicateColumnNameDefaultSqlMismatch {
                entity_type1: first_type.display_name().to_string(),
                property1: first.name.clone(),
                entity_type2: entity_type.display_name().to_string(),
                property2: property.name.clone(),
                column: column.to_string(),
                table: table.to_string(),
                value1: a.default_value_sql().unwrap_or_default().to_string(),
                value2: b.default_value_sql().unwrap_or_default().to_string(),
            });
        }

        Ok(())
    }
}

impl SharedTableCheck for SharedColumnCheck {
    fn name(&self) -> &'static str {
        "relational_shared_columns"
    }

    fn is_relational(&self) -> bool {
        true
    }

    fn validate(
        &self,
        _model: &Model,
        table: &TableMapping<'_>,
        _loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()> {
        let mut columns: HashMap<&str, (&EntityType, &Property)> = HashMap::new();

        for &entity_type in &table.entity_types {
            for property in &entity_type.properties {
                let column = property.relational().column_name();
                match columns.get(column) {
                    Some(&first) => Self::compare(table, column, first, (entity_type, property))?,
                    None => {
                        columns.insert(column, (entity_type, property));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Keys sharing a constraint name must cover the same columns
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedKeyColumnsCheck;

impl SharedTableCheck for SharedKeyColumnsCheck {
    fn name(&self) -> &'static str {
        "relational_shared_keys"
    }

    fn is_relational(&self) -> bool {
        true
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
                let relational = key.relational(entity_type);
                let name = relational.name();
                let (other_type, other_key) = match keys.get(&name) {
                    Some(&found) => found,
                    None => {
                        keys.insert(name, (entity_type, key));
                        continue;
                    }
                };

                let columns = relational.column_names();
                let other_columns = other_key.relational(other_type).column_names();
                if columns != other_columns {
                    return Err(ModelValidationError::DuplicateKeyColumnMismatch {
                        key1: format_properties(&key.properties),
                        entity_type1: entity_type.display_name().to_string(),
                        key2: format_properties(&other_key.properties),
                        entity_type2: other_type.display_name().to_string(),
                        table: table.to_string(),
                        key_name: name,
                        columns1: format_properties(&columns),
                        columns2: format_properties(&other_columns),
                    });
                }
            }
        }
        Ok(())
    }
}
