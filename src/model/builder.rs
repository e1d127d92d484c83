//! Fluent model building
//!
//! Everything configured through the builder is recorded with the
//! `Explicit` source so conventions applied later never override it.
//!
//! # Example
//!
//! ```rust
//! use relational_model_sdk::model::{ConventionSet, ModelBuilder};
//! use relational_model_sdk::diagnostics::DiagnosticsLoggers;
//! use relational_model_sdk::models::ClrType;
//!
//! let mut builder = ModelBuilder::new();
//! builder.entity("Order", |order| {
//!     order.property("Id", ClrType::Int32);
//!     order.property("Total", ClrType::Decimal).has_column_type("decimal(10,2)");
//!     order.has_key(["Id"]);
//! });
//!
//! let model = builder
//!     .finalize_model(&ConventionSet::sql_server(), &DiagnosticsLoggers::default())
//!     .unwrap();
//! assert_eq!(model.entity_types.len(), 1);
//! ```

use super::conventions::ConventionSet;
use super::error::{ModelBuildError, ModelBuildResult};
use crate::diagnostics::DiagnosticsLoggers;
use crate::models::{
    AnnotationValue, Annotations, ClrType, ConfigurationSource, Configured, EntityType,
    ForeignKey, Index, Key, Model, Property, SqlServerValueGenerationStrategy, ValueGenerated,
    names,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug_span, info};

const EXPLICIT: ConfigurationSource = ConfigurationSource::Explicit;

fn to_names<I, S>(properties: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    properties.into_iter().map(Into::into).collect()
}

/// Builds a [`Model`] and finalizes it through a [`ConventionSet`]
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building from an existing model, e.g. one loaded from a document
    pub fn from_model(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Configure an entity type, adding it on first use
    pub fn entity(
        &mut self,
        name: &str,
        configure: impl FnOnce(&mut EntityTypeBuilder<'_>),
    ) -> &mut Self {
        let position = match self.model.entity_types.iter().position(|e| e.name == name) {
            Some(position) => position,
            None => {
                self.model.entity_types.push(EntityType::new(name));
                self.model.entity_types.len() - 1
            }
        };
        let mut builder = EntityTypeBuilder {
            entity_type: &mut self.model.entity_types[position],
        };
        configure(&mut builder);
        self
    }

    /// Model-wide default strategy for store-generated keys
    pub fn has_value_generation_strategy(
        &mut self,
        strategy: SqlServerValueGenerationStrategy,
    ) -> &mut Self {
        self.model.annotations.set(
            names::VALUE_GENERATION_STRATEGY,
            strategy.to_string(),
            EXPLICIT,
        );
        self
    }

    pub fn use_identity_columns(&mut self) -> &mut Self {
        self.has_value_generation_strategy(SqlServerValueGenerationStrategy::IdentityColumn)
    }

    pub fn use_hilo(&mut self) -> &mut Self {
        self.has_value_generation_strategy(SqlServerValueGenerationStrategy::SequenceHiLo)
    }

    pub fn has_annotation(
        &mut self,
        name: &str,
        value: impl Into<AnnotationValue>,
    ) -> &mut Self {
        self.model.annotations.set(name, value, EXPLICIT);
        self
    }

    /// Check structure, run the conventions and freeze the model
    pub fn finalize_model(
        self,
        conventions: &ConventionSet,
        loggers: &DiagnosticsLoggers,
    ) -> ModelBuildResult<Arc<Model>> {
        let span = debug_span!("finalize_model", entity_types = self.model.entity_types.len());
        let _enter = span.enter();

        let mut model = self.model;
        check_structure(&model)?;
        conventions.apply(&mut model, loggers)?;

        info!(
            "Finalized model with {} entity types",
            model.entity_types.len()
        );
        Ok(Arc::new(model))
    }
}

/// Reject references to properties or entity types that do not exist
fn check_structure(model: &Model) -> ModelBuildResult<()> {
    let mut seen = HashSet::new();
    for entity_type in &model.entity_types {
        if !seen.insert(entity_type.name.as_str()) {
            return Err(ModelBuildError::DuplicateEntityType(entity_type.name.clone()));
        }
    }

    for entity_type in &model.entity_types {
        let check = |properties: &[String], usage: &'static str| -> ModelBuildResult<()> {
            match properties
                .iter()
                .find(|p| entity_type.find_property(p).is_none())
            {
                Some(missing) => Err(ModelBuildError::UnknownProperty {
                    entity_type: entity_type.name.clone(),
                    property: missing.clone(),
                    usage,
                }),
                None => Ok(()),
            }
        };

        for key in &entity_type.keys {
            check(key.properties.as_slice(), "a key")?;
        }
        for index in &entity_type.indexes {
            check(index.properties.as_slice(), "an index")?;
        }
        for foreign_key in &entity_type.foreign_keys {
            check(foreign_key.properties.as_slice(), "a foreign key")?;
            if model
                .find_entity_type(&foreign_key.principal_entity_type)
                .is_none()
            {
                return Err(ModelBuildError::UnknownPrincipalEntityType {
                    entity_type: entity_type.name.clone(),
                    principal: foreign_key.principal_entity_type.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Configures one entity type
#[derive(Debug)]
pub struct EntityTypeBuilder<'a> {
    entity_type: &'a mut EntityType,
}

impl EntityTypeBuilder<'_> {
    /// Configure a property, adding it on first use
    pub fn property(&mut self, name: &str, clr_type: ClrType) -> PropertyBuilder<'_> {
        let properties = &mut self.entity_type.properties;
        let position = match properties.iter().position(|p| p.name == name) {
            Some(position) => {
                properties[position].clr_type = clr_type;
                position
            }
            None => {
                properties.push(Property::new(name, clr_type));
                properties.len() - 1
            }
        };
        PropertyBuilder {
            property: &mut properties[position],
        }
    }

    /// Set the primary key, replacing a previous one over other properties
    pub fn has_key<I, S>(&mut self, properties: I) -> KeyBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties = to_names(properties);
        let keys = &mut self.entity_type.keys;
        let position = match keys.iter().position(|k| k.is_primary) {
            Some(position) if keys[position].properties == properties => position,
            _ => {
                keys.retain(|k| !k.is_primary);
                keys.insert(0, Key::new(properties, true));
                0
            }
        };
        KeyBuilder {
            key: &mut keys[position],
        }
    }

    pub fn has_alternate_key<I, S>(&mut self, properties: I) -> KeyBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties = to_names(properties);
        let keys = &mut self.entity_type.keys;
        let position = match keys
            .iter()
            .position(|k| !k.is_primary && k.properties == properties)
        {
            Some(position) => position,
            None => {
                keys.push(Key::new(properties, false));
                keys.len() - 1
            }
        };
        KeyBuilder {
            key: &mut keys[position],
        }
    }

    pub fn has_index<I, S>(&mut self, properties: I) -> IndexBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties = to_names(properties);
        let indexes = &mut self.entity_type.indexes;
        let position = match indexes.iter().position(|i| i.properties == properties) {
            Some(position) => position,
            None => {
                indexes.push(Index::new(properties));
                indexes.len() - 1
            }
        };
        IndexBuilder {
            index: &mut indexes[position],
        }
    }

    /// Declare a foreign key to the principal's primary key
    pub fn has_foreign_key<I, S>(&mut self, properties: I, principal: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_type
            .foreign_keys
            .push(ForeignKey::new(to_names(properties), principal));
        self
    }

    pub fn to_table(&mut self, name: &str) -> &mut Self {
        self.entity_type
            .annotations
            .set(names::TABLE_NAME, name, EXPLICIT);
        self
    }

    pub fn to_schema(&mut self, schema: &str) -> &mut Self {
        self.entity_type
            .annotations
            .set(names::SCHEMA, schema, EXPLICIT);
        self
    }

    pub fn is_memory_optimized(&mut self, memory_optimized: bool) -> &mut Self {
        self.entity_type
            .annotations
            .set(names::MEMORY_OPTIMIZED, memory_optimized, EXPLICIT);
        self
    }

    pub fn has_annotation(
        &mut self,
        name: &str,
        value: impl Into<AnnotationValue>,
    ) -> &mut Self {
        self.entity_type.annotations.set(name, value, EXPLICIT);
        self
    }
}

/// Configures one property
#[derive(Debug)]
pub struct PropertyBuilder<'a> {
    property: &'a mut Property,
}

impl PropertyBuilder<'_> {
    fn annotate(&mut self, name: &str, value: impl Into<AnnotationValue>) -> &mut Self {
        self.property.annotations.set(name, value, EXPLICIT);
        self
    }

    pub fn is_required(&mut self, required: bool) -> &mut Self {
        self.property.nullable = Some(!required);
        self
    }

    pub fn has_column_name(&mut self, name: &str) -> &mut Self {
        self.annotate(names::COLUMN_NAME, name)
    }

    pub fn has_column_type(&mut self, store_type: &str) -> &mut Self {
        self.annotate(names::COLUMN_TYPE, store_type)
    }

    pub fn has_default_value_sql(&mut self, sql: &str) -> &mut Self {
        self.annotate(names::DEFAULT_VALUE_SQL, sql)
    }

    pub fn has_computed_column_sql(&mut self, sql: &str) -> &mut Self {
        self.annotate(names::COMPUTED_COLUMN_SQL, sql)
    }

    pub fn value_generated(&mut self, value_generated: ValueGenerated) -> &mut Self {
        self.property
            .set_value_generated(Configured::explicit(value_generated));
        self
    }

    pub fn value_generated_on_add(&mut self) -> &mut Self {
        self.value_generated(ValueGenerated::OnAdd)
    }

    pub fn value_generated_never(&mut self) -> &mut Self {
        self.value_generated(ValueGenerated::Never)
    }

    pub fn has_value_generation_strategy(
        &mut self,
        strategy: SqlServerValueGenerationStrategy,
    ) -> &mut Self {
        self.annotate(names::VALUE_GENERATION_STRATEGY, strategy.to_string())
    }

    /// Store-assigned identity column, generated on add
    pub fn use_identity_column(&mut self) -> &mut Self {
        self.value_generated_on_add()
            .has_value_generation_strategy(SqlServerValueGenerationStrategy::IdentityColumn)
    }

    /// Hi-lo generation from the named sequence, or the default one
    pub fn use_hilo(&mut self, sequence: Option<&str>) -> &mut Self {
        if let Some(sequence) = sequence {
            self.annotate(names::HILO_SEQUENCE_NAME, sequence);
        }
        self.value_generated_on_add()
            .has_value_generation_strategy(SqlServerValueGenerationStrategy::SequenceHiLo)
    }

    pub fn has_annotation(&mut self, name: &str, value: impl Into<AnnotationValue>) -> &mut Self {
        self.annotate(name, value)
    }
}

/// Configures one key
#[derive(Debug)]
pub struct KeyBuilder<'a> {
    key: &'a mut Key,
}

impl KeyBuilder<'_> {
    pub fn has_name(&mut self, name: &str) -> &mut Self {
        self.key.annotations.set(names::NAME, name, EXPLICIT);
        self
    }

    pub fn is_clustered(&mut self, clustered: bool) -> &mut Self {
        self.key.annotations.set(names::CLUSTERED, clustered, EXPLICIT);
        self
    }
}

/// Configures one index
#[derive(Debug)]
pub struct IndexBuilder<'a> {
    index: &'a mut Index,
}

impl IndexBuilder<'_> {
    fn annotations(&mut self) -> &mut Annotations {
        &mut self.index.annotations
    }

    pub fn is_unique(&mut self, unique: bool) -> &mut Self {
        self.index.is_unique = unique;
        self
    }

    pub fn is_clustered(&mut self, clustered: bool) -> &mut Self {
        self.annotations().set(names::CLUSTERED, clustered, EXPLICIT);
        self
    }

    /// Non-key columns carried by the index
    pub fn include<I, S>(&mut self, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations()
            .set(names::INCLUDE, to_names(properties), EXPLICIT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_records_explicit_configuration() {
        let mut builder = ModelBuilder::new();
        builder.entity("Customer", |customer| {
            customer.property("Id", ClrType::Int32);
            customer
                .property("Name", ClrType::String)
                .has_column_name("FullName")
                .is_required(true);
            customer.has_key(["Id"]).has_name("PK_Customer").is_clustered(false);
            customer.to_table("Customers").to_schema("sales");
        });

        let model = builder.model();
        let customer = model.find_entity_type("Customer").unwrap();
        let name = customer.find_property("Name").unwrap();
        assert_eq!(name.relational().column_name(), "FullName");
        assert!(!name.is_nullable());
        assert_eq!(
            name.annotations.source(names::COLUMN_NAME),
            Some(ConfigurationSource::Explicit)
        );
        assert_eq!(customer.relational().table_name(), "Customers");
        assert_eq!(customer.relational().schema(), Some("sales"));
        assert_eq!(customer.primary_key().unwrap().sql_server().is_clustered(), Some(false));
    }

    #[test]
    fn test_hilo_records_sequence_name() {
        let mut builder = ModelBuilder::new();
        builder.entity("Order", |order| {
            order.property("Id", ClrType::Int64).use_hilo(Some("OrderIds"));
            order.property("Number", ClrType::Int32).use_hilo(None);
            order.has_key(["Id"]);
        });

        let order = builder.model().find_entity_type("Order").unwrap();
        let id = order.find_property("Id").unwrap();
        assert_eq!(id.sql_server().hilo_sequence_name(), Some("OrderIds"));
        assert_eq!(
            id.sql_server().own_value_generation_strategy(),
            Some(SqlServerValueGenerationStrategy::SequenceHiLo)
        );
        assert_eq!(id.value_generated(), ValueGenerated::OnAdd);
        let number = order.find_property("Number").unwrap();
        assert_eq!(number.sql_server().hilo_sequence_name(), None);
    }

    #[test]
    fn test_reconfiguring_reuses_members() {
        let mut builder = ModelBuilder::new();
        builder.entity("Order", |order| {
            order.property("Id", ClrType::Int32);
            order.has_key(["Id"]);
        });
        builder.entity("Order", |order| {
            order.property("Id", ClrType::Int64);
            order.has_key(["Id"]);
            order.has_index(["Id"]).is_unique(true);
            order.has_index(["Id"]).include(["Id"]);
        });

        let order = builder.model().find_entity_type("Order").unwrap();
        assert_eq!(builder.model().entity_types.len(), 1);
        assert_eq!(order.properties.len(), 1);
        assert_eq!(order.properties[0].clr_type, ClrType::Int64);
        assert_eq!(order.keys.len(), 1);
        assert_eq!(order.indexes.len(), 1);
        assert!(order.indexes[0].is_unique);
    }

    #[test]
    fn test_unknown_key_property_is_rejected() {
        let mut builder = ModelBuilder::new();
        builder.entity("Order", |order| {
            order.property("Id", ClrType::Int32);
            order.has_key(["OrderId"]);
        });

        let err = builder
            .finalize_model(&ConventionSet::new(), &DiagnosticsLoggers::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ModelBuildError::UnknownProperty { ref property, .. } if property == "OrderId"
        ));
    }

    #[test]
    fn test_duplicate_entity_type_from_document() {
        let mut model = Model::new();
        model.entity_types.push(EntityType::new("Order"));
        model.entity_types.push(EntityType::new("Order"));

        let err = ModelBuilder::from_model(model)
            .finalize_model(&ConventionSet::new(), &DiagnosticsLoggers::default())
            .unwrap_err();
        assert!(matches!(err, ModelBuildError::DuplicateEntityType(ref name) if name == "Order"));
    }
}
