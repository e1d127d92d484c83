//! CLI-specific error types

use crate::config::ConfigError;
use crate::model::ModelBuildError;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load model: {0}")]
    ModelLoad(#[source] ModelBuildError),

    #[error("Model validation failed: {0}")]
    Validation(#[source] ModelBuildError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
