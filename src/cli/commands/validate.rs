//! Validate command implementation

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, ValidationReport, format_report};
use crate::config::ValidatorConfig;
use crate::diagnostics::{DiagnosticsLoggers, MemorySink};
use crate::model::{ConventionSet, ModelBuilder, ModelLoader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Arguments of the validate command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub model: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Build the report for a model document
///
/// Returns the report together with the fatal error, if any, so the caller
/// can print before failing.
pub fn run_validate(args: &ValidateArgs) -> Result<(ValidationReport, Option<CliError>), CliError> {
    let config = match &args.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };
    let model = ModelLoader::new()
        .load_file(&args.model)
        .map_err(CliError::ModelLoad)?;
    let entity_types = model.entity_types.len();

    let sink = Arc::new(MemorySink::new());
    let loggers = DiagnosticsLoggers::new(sink.clone()).with_config(config);
    let result = ModelBuilder::from_model(model)
        .finalize_model(&ConventionSet::sql_server(), &loggers);

    let error = result.err().map(CliError::Validation);
    let report = ValidationReport {
        model: args.model.display().to_string(),
        valid: error.is_none(),
        entity_types,
        warnings: sink.events(),
        error: error.as_ref().map(|e| e.to_string()),
    };
    Ok((report, error))
}

/// Handle the validate command
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let (report, error) = run_validate(args)?;
    println!("{}", format_report(&report, args.format)?);

    info!(
        "Validated {} with {} warning(s)",
        report.model,
        report.warnings.len()
    );
    match error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
