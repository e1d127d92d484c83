//! SQL Server metadata views
//!
//! Provider-specific accessors over the `SqlServer:` annotations, plus the
//! default store types the provider maps CLR types to.

use super::annotations::{Annotation, names};
use super::clr_type::ClrType;
use super::entity_type::EntityType;
use super::key::{Index, Key};
use super::model::Model;
use super::property::{Property, ValueGenerated};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How SQL Server generates values for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlServerValueGenerationStrategy {
    None,
    /// Client-side generation from a database sequence in blocks
    SequenceHiLo,
    /// Database-assigned auto-increment column
    IdentityColumn,
}

impl fmt::Display for SqlServerValueGenerationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlServerValueGenerationStrategy::None => "None",
            SqlServerValueGenerationStrategy::SequenceHiLo => "SequenceHiLo",
            SqlServerValueGenerationStrategy::IdentityColumn => "IdentityColumn",
        };
        f.write_str(name)
    }
}

impl FromStr for SqlServerValueGenerationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(SqlServerValueGenerationStrategy::None),
            "SequenceHiLo" => Ok(SqlServerValueGenerationStrategy::SequenceHiLo),
            "IdentityColumn" => Ok(SqlServerValueGenerationStrategy::IdentityColumn),
            other => Err(format!("Unknown value generation strategy: {}", other)),
        }
    }
}

fn strategy_from(annotation: &Annotation) -> Option<SqlServerValueGenerationStrategy> {
    annotation.value.as_str().and_then(|s| s.parse().ok())
}

static DEFAULT_STORE_TYPES: Lazy<HashMap<ClrType, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(ClrType::Bool, "bit");
    m.insert(ClrType::Byte, "tinyint");
    m.insert(ClrType::Int16, "smallint");
    m.insert(ClrType::Int32, "int");
    m.insert(ClrType::Int64, "bigint");
    m.insert(ClrType::Decimal, "decimal(18,2)");
    m.insert(ClrType::Single, "real");
    m.insert(ClrType::Double, "float");
    m.insert(ClrType::Char, "nvarchar(1)");
    m.insert(ClrType::String, "nvarchar(max)");
    m.insert(ClrType::DateTime, "datetime2");
    m.insert(ClrType::DateTimeOffset, "datetimeoffset");
    m.insert(ClrType::TimeSpan, "time");
    m.insert(ClrType::Guid, "uniqueidentifier");
    m.insert(ClrType::Bytes, "varbinary(max)");
    m
});

/// Store type SQL Server uses for a CLR type when none is configured
pub fn default_store_type(clr_type: &ClrType) -> Option<&'static str> {
    DEFAULT_STORE_TYPES.get(clr_type.unwrap_nullable()).copied()
}

/// SQL Server view of a property
#[derive(Debug, Clone, Copy)]
pub struct SqlServerPropertyAnnotations<'a> {
    property: &'a Property,
}

impl<'a> SqlServerPropertyAnnotations<'a> {
    pub fn value_generation_strategy_annotation(&self) -> Option<&'a Annotation> {
        self.property
            .annotations
            .find(names::VALUE_GENERATION_STRATEGY)
    }

    /// Strategy configured on the property itself, without model fallback
    pub fn own_value_generation_strategy(&self) -> Option<SqlServerValueGenerationStrategy> {
        self.value_generation_strategy_annotation()
            .and_then(strategy_from)
    }

    /// Effective strategy, falling back to the model-wide default.
    ///
    /// The model default only applies to `OnAdd` properties with no default
    /// or computed SQL whose type is compatible with that strategy.
    pub fn value_generation_strategy(
        &self,
        model: &Model,
    ) -> Option<SqlServerValueGenerationStrategy> {
        if let Some(strategy) = self.own_value_generation_strategy() {
            return Some(strategy);
        }

        let relational = self.property.relational();
        if self.property.value_generated() != ValueGenerated::OnAdd
            || relational.default_value_sql().is_some()
            || relational.computed_column_sql().is_some()
        {
            return None;
        }

        match model.sql_server().value_generation_strategy() {
            Some(SqlServerValueGenerationStrategy::SequenceHiLo)
                if is_compatible_with_sequence_hilo(&self.property.clr_type) =>
            {
                Some(SqlServerValueGenerationStrategy::SequenceHiLo)
            }
            Some(SqlServerValueGenerationStrategy::IdentityColumn)
                if is_compatible_with_identity_column(&self.property.clr_type) =>
            {
                Some(SqlServerValueGenerationStrategy::IdentityColumn)
            }
            _ => None,
        }
    }

    pub fn hilo_sequence_name(&self) -> Option<&'a str> {
        self.property
            .annotations
            .value(names::HILO_SEQUENCE_NAME)
            .and_then(|v| v.as_str())
    }
}

pub fn is_compatible_with_identity_column(clr_type: &ClrType) -> bool {
    clr_type.is_integer() || clr_type.is_decimal()
}

pub fn is_compatible_with_sequence_hilo(clr_type: &ClrType) -> bool {
    clr_type.is_integer()
}

/// SQL Server view of a key
#[derive(Debug, Clone, Copy)]
pub struct SqlServerKeyAnnotations<'a> {
    key: &'a Key,
}

impl SqlServerKeyAnnotations<'_> {
    /// Clustering flag; `None` leaves the choice to the server
    pub fn is_clustered(&self) -> Option<bool> {
        self.key
            .annotations
            .value(names::CLUSTERED)
            .and_then(|v| v.as_bool())
    }
}

/// SQL Server view of an index
#[derive(Debug, Clone, Copy)]
pub struct SqlServerIndexAnnotations<'a> {
    index: &'a Index,
}

impl<'a> SqlServerIndexAnnotations<'a> {
    /// Non-key columns stored in the index leaf level
    pub fn include_properties(&self) -> Option<&'a [String]> {
        self.index
            .annotations
            .value(names::INCLUDE)
            .and_then(|v| v.as_list())
    }

    pub fn is_clustered(&self) -> Option<bool> {
        self.index
            .annotations
            .value(names::CLUSTERED)
            .and_then(|v| v.as_bool())
    }
}

/// SQL Server view of an entity type
#[derive(Debug, Clone, Copy)]
pub struct SqlServerEntityTypeAnnotations<'a> {
    entity_type: &'a EntityType,
}

impl SqlServerEntityTypeAnnotations<'_> {
    pub fn is_memory_optimized(&self) -> bool {
        self.entity_type
            .annotations
            .value(names::MEMORY_OPTIMIZED)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// SQL Server view of the model
#[derive(Debug, Clone, Copy)]
pub struct SqlServerModelAnnotations<'a> {
    model: &'a Model,
}

impl SqlServerModelAnnotations<'_> {
    /// Model-wide default strategy for store-generated keys
    pub fn value_generation_strategy(&self) -> Option<SqlServerValueGenerationStrategy> {
        self.model
            .annotations
            .find(names::VALUE_GENERATION_STRATEGY)
            .and_then(strategy_from)
    }
}

impl Property {
    pub fn sql_server(&self) -> SqlServerPropertyAnnotations<'_> {
        SqlServerPropertyAnnotations { property: self }
    }
}

impl Key {
    pub fn sql_server(&self) -> SqlServerKeyAnnotations<'_> {
        SqlServerKeyAnnotations { key: self }
    }
}

impl Index {
    pub fn sql_server(&self) -> SqlServerIndexAnnotations<'_> {
        SqlServerIndexAnnotations { index: self }
    }
}

impl EntityType {
    pub fn sql_server(&self) -> SqlServerEntityTypeAnnotations<'_> {
        SqlServerEntityTypeAnnotations { entity_type: self }
    }
}

impl Model {
    pub fn sql_server(&self) -> SqlServerModelAnnotations<'_> {
        SqlServerModelAnnotations { model: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotations::{ConfigurationSource, Configured};

    fn model_with_strategy(strategy: SqlServerValueGenerationStrategy) -> Model {
        let mut model = Model::new();
        model.annotations.set(
            names::VALUE_GENERATION_STRATEGY,
            strategy.to_string(),
            ConfigurationSource::Convention,
        );
        model
    }

    #[test]
    fn test_model_fallback_only_for_on_add() {
        let model = model_with_strategy(SqlServerValueGenerationStrategy::IdentityColumn);
        let mut id = Property::new("Id", ClrType::Int32);
        assert_eq!(id.sql_server().value_generation_strategy(&model), None);

        id.set_value_generated(Configured::convention(ValueGenerated::OnAdd));
        assert_eq!(
            id.sql_server().value_generation_strategy(&model),
            Some(SqlServerValueGenerationStrategy::IdentityColumn)
        );
        assert_eq!(id.sql_server().own_value_generation_strategy(), None);
    }

    #[test]
    fn test_model_fallback_respects_type_compatibility() {
        let model = model_with_strategy(SqlServerValueGenerationStrategy::SequenceHiLo);
        let mut amount = Property::new("Amount", ClrType::Decimal);
        amount.set_value_generated(Configured::explicit(ValueGenerated::OnAdd));
        assert_eq!(amount.sql_server().value_generation_strategy(&model), None);

        let model = model_with_strategy(SqlServerValueGenerationStrategy::IdentityColumn);
        assert_eq!(
            amount.sql_server().value_generation_strategy(&model),
            Some(SqlServerValueGenerationStrategy::IdentityColumn)
        );
    }

    #[test]
    fn test_default_sql_disables_fallback() {
        let model = model_with_strategy(SqlServerValueGenerationStrategy::IdentityColumn);
        let mut id = Property::new("Id", ClrType::Int64);
        id.set_value_generated(Configured::explicit(ValueGenerated::OnAdd));
        id.annotations.set(
            names::DEFAULT_VALUE_SQL,
            "NEXT VALUE FOR ids",
            ConfigurationSource::Explicit,
        );
        assert_eq!(id.sql_server().value_generation_strategy(&model), None);
    }

    #[test]
    fn test_default_store_types() {
        assert_eq!(default_store_type(&ClrType::Decimal), Some("decimal(18,2)"));
        assert_eq!(
            default_store_type(&ClrType::nullable(ClrType::Byte)),
            Some("tinyint")
        );
        assert_eq!(default_store_type(&ClrType::Other("Point".into())), None);
    }
}
