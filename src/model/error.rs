//! Model building errors

use crate::validation::ModelValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, finalizing or loading a model
#[derive(Error, Debug)]
pub enum ModelBuildError {
    #[error("The entity type '{0}' is defined more than once.")]
    DuplicateEntityType(String),

    #[error(
        "The property '{property}' cannot be used in {usage} on entity type '{entity_type}' \
         because it is not declared on that entity type."
    )]
    UnknownProperty {
        entity_type: String,
        property: String,
        usage: &'static str,
    },

    #[error(
        "The foreign key on entity type '{entity_type}' references the unknown principal entity type '{principal}'."
    )]
    UnknownPrincipalEntityType {
        entity_type: String,
        principal: String,
    },

    #[error(transparent)]
    Validation(#[from] ModelValidationError),

    #[error("Failed to read model document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML model document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON model document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported model document format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl ModelBuildError {
    /// The validation error, when finalization failed in validation
    pub fn validation(&self) -> Option<&ModelValidationError> {
        match self {
            ModelBuildError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

pub type ModelBuildResult<T> = Result<T, ModelBuildError>;
