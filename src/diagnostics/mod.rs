//! Diagnostics logging
//!
//! `DiagnosticsLoggers` is injected into validation. It hands out loggers
//! scoped to a category, applies the configured warning behavior and
//! forwards events to a shared sink.

pub mod events;
pub mod sink;

pub use events::{DiagnosticEvent, DiagnosticLevel, EventId, LoggerCategory};
pub use sink::{DiagnosticsSink, MemorySink, TracingSink};

use crate::config::{ValidatorConfig, WarningBehavior};
use crate::models::{EntityType, Property};
use std::sync::Arc;
use thiserror::Error;

/// A warning configured to fail validation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Warning '{id}' was raised and is configured to throw: {message}")]
pub struct WarningAsError {
    pub id: EventId,
    pub message: String,
}

/// Provider of category-scoped loggers
#[derive(Clone)]
pub struct DiagnosticsLoggers {
    sink: Arc<dyn DiagnosticsSink>,
    config: ValidatorConfig,
}

impl DiagnosticsLoggers {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            sink,
            config: ValidatorConfig::default(),
        }
    }

    /// Loggers writing to `tracing`
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn logger(&self, category: LoggerCategory) -> Logger<'_> {
        Logger {
            category,
            loggers: self,
        }
    }
}

impl Default for DiagnosticsLoggers {
    fn default() -> Self {
        Self::tracing()
    }
}

impl std::fmt::Debug for DiagnosticsLoggers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsLoggers")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Logger scoped to one category
#[derive(Clone, Copy)]
pub struct Logger<'a> {
    category: LoggerCategory,
    loggers: &'a DiagnosticsLoggers,
}

impl Logger<'_> {
    pub fn category(&self) -> LoggerCategory {
        self.category
    }

    /// Raise a warning, honoring the configured behavior for its id
    pub fn warning(
        &self,
        id: EventId,
        message: String,
        entity_type: Option<&str>,
        property: Option<&str>,
    ) -> Result<(), WarningAsError> {
        match self.loggers.config.behavior_for(id) {
            WarningBehavior::Ignore => Ok(()),
            WarningBehavior::Throw => Err(WarningAsError { id, message }),
            WarningBehavior::Log => {
                self.loggers.sink.log(&DiagnosticEvent {
                    id,
                    category: self.category,
                    level: DiagnosticLevel::Warning,
                    message,
                    entity_type: entity_type.map(str::to_string),
                    property: property.map(str::to_string),
                });
                Ok(())
            }
        }
    }

    pub fn debug(&self, id: EventId, message: String) {
        self.loggers.sink.log(&DiagnosticEvent {
            id,
            category: self.category,
            level: DiagnosticLevel::Debug,
            message,
            entity_type: None,
            property: None,
        });
    }

    pub fn decimal_type_default_warning(
        &self,
        entity_type: &EntityType,
        property: &Property,
    ) -> Result<(), WarningAsError> {
        self.warning(
            EventId::DecimalTypeDefaultWarning,
            format!(
                "No type was specified for the decimal column '{}' on entity type '{}'. \
                 This will cause values to be silently truncated if they do not fit in the \
                 default precision and scale. Explicitly specify the SQL server column type \
                 that can accommodate all the values using 'has_column_type()'.",
                property.name,
                entity_type.display_name()
            ),
            Some(entity_type.display_name()),
            Some(&property.name),
        )
    }

    pub fn byte_identity_column_warning(
        &self,
        entity_type: &EntityType,
        property: &Property,
    ) -> Result<(), WarningAsError> {
        self.warning(
            EventId::ByteIdentityColumnWarning,
            format!(
                "The property '{}' on entity type '{}' is of type 'byte', but is set up to use \
                 a SQL Server identity column. This requires that values starting at 255 and \
                 counting down will be used for temporary key values. A temporary key value is \
                 needed for every entity inserted in a single save. Care must be taken that \
                 these values do not collide with real key values.",
                property.name,
                entity_type.display_name()
            ),
            Some(entity_type.display_name()),
            Some(&property.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClrType;

    #[test]
    fn test_warning_behaviors() {
        let sink = Arc::new(MemorySink::new());
        let entity = EntityType::new("Order");
        let property = Property::new("Total", ClrType::Decimal);

        let loggers = DiagnosticsLoggers::new(sink.clone());
        let logger = loggers.logger(LoggerCategory::ModelValidation);
        logger.decimal_type_default_warning(&entity, &property).unwrap();
        assert_eq!(sink.count(EventId::DecimalTypeDefaultWarning), 1);
        let event = &sink.events()[0];
        assert_eq!(event.entity_type.as_deref(), Some("Order"));
        assert_eq!(event.property.as_deref(), Some("Total"));

        let loggers = DiagnosticsLoggers::new(sink.clone()).with_config(
            ValidatorConfig::new()
                .with_warning(EventId::DecimalTypeDefaultWarning, WarningBehavior::Ignore),
        );
        loggers
            .logger(LoggerCategory::ModelValidation)
            .decimal_type_default_warning(&entity, &property)
            .unwrap();
        assert_eq!(sink.count(EventId::DecimalTypeDefaultWarning), 1);

        let loggers = DiagnosticsLoggers::new(sink).with_config(
            ValidatorConfig::new()
                .with_warning(EventId::DecimalTypeDefaultWarning, WarningBehavior::Throw),
        );
        let err = loggers
            .logger(LoggerCategory::ModelValidation)
            .decimal_type_default_warning(&entity, &property)
            .unwrap_err();
        assert_eq!(err.id, EventId::DecimalTypeDefaultWarning);
        assert!(err.message.contains("'Total'"));
    }
}
