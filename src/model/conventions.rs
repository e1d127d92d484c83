//! Conventions applied when a model is finalized
//!
//! Conventions fill in defaults with the `Convention` source, so anything
//! the user configured explicitly is left alone. The last convention in the
//! SQL Server set validates the finished model.

use super::error::ModelBuildResult;
use crate::diagnostics::DiagnosticsLoggers;
use crate::models::{
    ConfigurationSource, Configured, Model, SqlServerValueGenerationStrategy, ValueGenerated,
    default_store_type, names,
};
use crate::validation::ModelValidator;
use tracing::{debug, debug_span};

/// A convention run once the model has been built
pub trait ModelBuiltConvention: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, model: &mut Model, loggers: &DiagnosticsLoggers) -> ModelBuildResult<()>;
}

/// Ordered list of model-built conventions
#[derive(Default)]
pub struct ConventionSet {
    conventions: Vec<Box<dyn ModelBuiltConvention>>,
}

impl ConventionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// SQL Server conventions followed by validation
    pub fn sql_server() -> Self {
        Self::new()
            .with_convention(KeyValueGenerationConvention)
            .with_convention(ValueGenerationStrategyConvention::default())
            .with_convention(TypeMappingConvention)
            .with_convention(ValidatingConvention::new(ModelValidator::sql_server()))
    }

    pub fn with_convention(mut self, convention: impl ModelBuiltConvention + 'static) -> Self {
        self.conventions.push(Box::new(convention));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.conventions.iter().map(|c| c.name()).collect()
    }

    pub fn apply(&self, model: &mut Model, loggers: &DiagnosticsLoggers) -> ModelBuildResult<()> {
        for convention in &self.conventions {
            let span = debug_span!("convention", name = convention.name());
            let _enter = span.enter();
            convention.apply(model, loggers)?;
            debug!("Applied convention {}", convention.name());
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConventionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionSet")
            .field("conventions", &self.names())
            .finish()
    }
}

/// Single-column integer primary keys are generated on add
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueGenerationConvention;

impl ModelBuiltConvention for KeyValueGenerationConvention {
    fn name(&self) -> &'static str {
        "key_value_generation"
    }

    fn apply(&self, model: &mut Model, _loggers: &DiagnosticsLoggers) -> ModelBuildResult<()> {
        for entity_type in &mut model.entity_types {
            let Some(key) = entity_type.primary_key() else {
                continue;
            };
            let [column] = key.properties.as_slice() else {
                continue;
            };
            if entity_type.is_foreign_key(column) {
                continue;
            }
            let column = column.clone();
            if let Some(property) = entity_type.find_property_mut(&column)
                && property.clr_type.is_integer()
            {
                property.set_value_generated(Configured::convention(ValueGenerated::OnAdd));
            }
        }
        Ok(())
    }
}

/// Model-wide default value generation strategy
#[derive(Debug, Clone, Copy)]
pub struct ValueGenerationStrategyConvention {
    pub strategy: SqlServerValueGenerationStrategy,
}

impl Default for ValueGenerationStrategyConvention {
    fn default() -> Self {
        Self {
            strategy: SqlServerValueGenerationStrategy::IdentityColumn,
        }
    }
}

impl ModelBuiltConvention for ValueGenerationStrategyConvention {
    fn name(&self) -> &'static str {
        "value_generation_strategy"
    }

    fn apply(&self, model: &mut Model, _loggers: &DiagnosticsLoggers) -> ModelBuildResult<()> {
        model.annotations.set(
            names::VALUE_GENERATION_STRATEGY,
            self.strategy.to_string(),
            ConfigurationSource::Convention,
        );
        Ok(())
    }
}

/// Records the default store type of every property as its type mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMappingConvention;

impl ModelBuiltConvention for TypeMappingConvention {
    fn name(&self) -> &'static str {
        "type_mapping"
    }

    fn apply(&self, model: &mut Model, _loggers: &DiagnosticsLoggers) -> ModelBuildResult<()> {
        for entity_type in &mut model.entity_types {
            for property in &mut entity_type.properties {
                if let Some(store_type) = default_store_type(&property.clr_type) {
                    property.annotations.set(
                        names::TYPE_MAPPING,
                        store_type,
                        ConfigurationSource::Convention,
                    );
                }
            }
        }
        Ok(())
    }
}

/// Runs a validator over the finished model
#[derive(Debug)]
pub struct ValidatingConvention {
    validator: ModelValidator,
}

impl ValidatingConvention {
    pub fn new(validator: ModelValidator) -> Self {
        Self { validator }
    }
}

impl ModelBuiltConvention for ValidatingConvention {
    fn name(&self) -> &'static str {
        "validating"
    }

    fn apply(&self, model: &mut Model, loggers: &DiagnosticsLoggers) -> ModelBuildResult<()> {
        self.validator.validate(model, loggers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClrType, EntityType, Key, Property};

    fn order_model() -> Model {
        let mut order = EntityType::new("Order");
        order.properties.push(Property::new("Id", ClrType::Int32));
        order.properties.push(Property::new("Code", ClrType::String));
        order.keys.push(Key::new(["Id"], true));
        let mut model = Model::new();
        model.entity_types.push(order);
        model
    }

    #[test]
    fn test_integer_key_is_generated_on_add() {
        let mut model = order_model();
        KeyValueGenerationConvention
            .apply(&mut model, &DiagnosticsLoggers::default())
            .unwrap();

        let id = model.entity_types[0].find_property("Id").unwrap();
        assert_eq!(id.value_generated(), ValueGenerated::OnAdd);
        assert_eq!(
            id.value_generated.as_ref().map(|v| v.source),
            Some(ConfigurationSource::Convention)
        );
    }

    #[test]
    fn test_explicit_value_generation_is_kept() {
        let mut model = order_model();
        model.entity_types[0]
            .find_property_mut("Id")
            .unwrap()
            .set_value_generated(Configured::explicit(ValueGenerated::Never));
        KeyValueGenerationConvention
            .apply(&mut model, &DiagnosticsLoggers::default())
            .unwrap();

        let id = model.entity_types[0].find_property("Id").unwrap();
        assert_eq!(id.value_generated(), ValueGenerated::Never);
    }

    #[test]
    fn test_strategy_convention_does_not_override_explicit() {
        let mut model = order_model();
        model.annotations.set(
            names::VALUE_GENERATION_STRATEGY,
            "SequenceHiLo",
            ConfigurationSource::Explicit,
        );
        ValueGenerationStrategyConvention::default()
            .apply(&mut model, &DiagnosticsLoggers::default())
            .unwrap();

        assert_eq!(
            model.sql_server().value_generation_strategy(),
            Some(SqlServerValueGenerationStrategy::SequenceHiLo)
        );
    }

    #[test]
    fn test_type_mapping_is_convention_sourced() {
        let mut model = order_model();
        TypeMappingConvention
            .apply(&mut model, &DiagnosticsLoggers::default())
            .unwrap();

        let code = model.entity_types[0].find_property("Code").unwrap();
        assert_eq!(code.relational().column_type(), Some("nvarchar(max)"));
        assert_eq!(
            code.annotations.source(names::TYPE_MAPPING),
            Some(ConfigurationSource::Convention)
        );
    }

    #[test]
    fn test_sql_server_set_order() {
        let set = ConventionSet::sql_server();
        assert_eq!(
            set.names(),
            vec![
                "key_value_generation",
                "value_generation_strategy",
                "type_mapping",
                "validating"
            ]
        );
    }
}
