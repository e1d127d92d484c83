//! Model document loading
//!
//! Reads a serialized [`Model`] from a YAML or JSON file. The format is
//! chosen by the file extension.

use super::error::{ModelBuildError, ModelBuildResult};
use crate::models::Model;
use std::path::Path;
use tracing::info;

/// Document formats a model can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Yaml,
    Json,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(ModelFormat::Yaml),
            Some("json") => Some(ModelFormat::Json),
            _ => None,
        }
    }
}

/// Loads model documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelLoader;

impl ModelLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_str(&self, content: &str, format: ModelFormat) -> ModelBuildResult<Model> {
        let model = match format {
            ModelFormat::Yaml => serde_yaml::from_str(content)?,
            ModelFormat::Json => serde_json::from_str(content)?,
        };
        Ok(model)
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> ModelBuildResult<Model> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path)
            .ok_or_else(|| ModelBuildError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| ModelBuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let model = self.load_str(&content, format)?;
        info!(
            "Loaded {} entity types from {}",
            model.entity_types.len(),
            path.display()
        );
        Ok(model)
    }
}
