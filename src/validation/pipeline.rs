//! Validation pipeline
//!
//! A validator is an ordered list of independent checks. Checks that look
//! at tables mapped by several entity types run inside
//! [`SharedTableCompatibility`], which groups the model by table once and
//! runs its table, column and key checks per shared table in that order.

use super::error::ValidationResult;
use crate::diagnostics::DiagnosticsLoggers;
use crate::models::{Model, TableMapping};
use tracing::{debug, debug_span};

/// A check over the whole model
pub trait ModelCheck: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, model: &Model, loggers: &DiagnosticsLoggers) -> ValidationResult<()>;
}

/// A check over one table mapped by several entity types
pub trait SharedTableCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// Generic relational checks are skipped when the loggers' config
    /// turns `relational_checks` off
    fn is_relational(&self) -> bool {
        false
    }

    fn validate(
        &self,
        model: &Model,
        table: &TableMapping<'_>,
        loggers: &DiagnosticsLoggers,
    ) -> ValidationResult<()>;
}

/// Runs registered shared-table checks for every shared table
#[derive(Default)]
pub struct SharedTableCompatibility {
    table_checks: Vec<Box<dyn SharedTableCheck>>,
    column_checks: Vec<Box<dyn SharedTableCheck>>,
    key_checks: Vec<Box<dyn SharedTableCheck>>,
}

impl SharedTableCompatibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_check(mut self, check: impl SharedTableCheck + 'static) -> Self {
        self.table_checks.push(Box::new(check));
        self
    }

    pub fn column_check(mut self, check: impl SharedTableCheck + 'static) -> Self {
        self.column_checks.push(Box::new(check));
        self
    }

    pub fn key_check(mut self, check: impl SharedTableCheck + 'static) -> Self {
        self.key_checks.push(Box::new(check));
        self
    }

    /// Registered check names in execution order for one table
    pub fn check_names(&self) -> Vec<&'static str> {
        self.table_checks
            .iter()
            .chain(&self.column_checks)
            .chain(&self.key_checks)
            .map(|c| c.name())
            .collect()
    }
}

impl ModelCheck for SharedTableCompatibility {
    fn name(&self) -> &'static str {
        "shared_table_compatibility"
    }

    fn validate(&self, model: &Model, loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        let relational_checks = loggers.config().relational_checks;
        for table in model.shared_tables() {
            let _span = debug_span!("shared_table", table = %table).entered();
            debug!(
                entity_types = table.entity_types.len(),
                "Validating shared table"
            );
            for check in self
                .table_checks
                .iter()
                .chain(&self.column_checks)
                .chain(&self.key_checks)
            {
                if check.is_relational() && !relational_checks {
                    continue;
                }
                check.validate(model, &table, loggers)?;
            }
        }
        Ok(())
    }
}

/// Ordered pipeline of model checks
///
/// # Example
///
/// ```rust
/// use relational_model_sdk::diagnostics::DiagnosticsLoggers;
/// use relational_model_sdk::models::Model;
/// use relational_model_sdk::validation::ModelValidator;
///
/// let validator = ModelValidator::sql_server();
/// assert!(validator.validate(&Model::new(), &DiagnosticsLoggers::tracing()).is_ok());
/// ```
#[derive(Default)]
pub struct ModelValidator {
    checks: Vec<Box<dyn ModelCheck>>,
}

impl ModelValidator {
    /// An empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check; checks run in registration order
    pub fn with_check(mut self, check: impl ModelCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Generic relational checks only
    pub fn relational() -> Self {
        Self::new().with_check(super::relational::shared_table_checks())
    }

    /// Relational checks composed with the SQL Server rules
    pub fn sql_server() -> Self {
        super::sql_server::register(Self::new())
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check in order, stopping at the first fatal error
    pub fn validate(&self, model: &Model, loggers: &DiagnosticsLoggers) -> ValidationResult<()> {
        let _span = debug_span!(
            "model_validation",
            entity_types = model.entity_types.len()
        )
        .entered();

        for check in &self.checks {
            debug!(check = check.name(), "Running model check");
            if let Err(e) = check.validate(model, loggers) {
                debug!(check = check.name(), error = %e, "Model check failed");
                return Err(e);
            }
        }

        debug!("Model validation completed");
        Ok(())
    }
}

impl std::fmt::Debug for ModelValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelValidator")
            .field("checks", &self.check_names())
            .finish()
    }
}
