//! Validator configuration
//!
//! Controls how warnings raised during validation are handled. Loadable
//! from TOML, YAML or JSON files.

use crate::diagnostics::{EventId, LoggerCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to do when a warning is raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WarningBehavior {
    /// Send the warning to the diagnostics sink
    #[default]
    Log,
    /// Drop the warning
    Ignore,
    /// Fail validation with the warning message
    Throw,
}

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error with {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported configuration file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Behavior for warnings without an explicit entry
    pub default_warning_behavior: WarningBehavior,
    /// Per-event overrides
    pub warnings: BTreeMap<EventId, WarningBehavior>,
    /// Run the generic relational shared-table checks before the provider ones
    pub relational_checks: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_warning_behavior: WarningBehavior::Log,
            warnings: BTreeMap::new(),
            relational_checks: true,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the behavior of a single warning
    pub fn with_warning(mut self, id: EventId, behavior: WarningBehavior) -> Self {
        self.warnings.insert(id, behavior);
        self
    }

    pub fn with_default_warning_behavior(mut self, behavior: WarningBehavior) -> Self {
        self.default_warning_behavior = behavior;
        self
    }

    pub fn with_relational_checks(mut self, enabled: bool) -> Self {
        self.relational_checks = enabled;
        self
    }

    pub fn behavior_for(&self, id: EventId) -> WarningBehavior {
        self.warnings
            .get(&id)
            .copied()
            .unwrap_or(self.default_warning_behavior)
    }

    /// Reject entries that can never take effect
    pub fn validate(&self) -> Result<(), String> {
        for (id, behavior) in &self.warnings {
            if *behavior == WarningBehavior::Throw
                && id.category() != LoggerCategory::ModelValidation
            {
                return Err(format!(
                    "warning '{}' is not raised during model validation and cannot be thrown",
                    id
                ));
            }
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::checked(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::checked(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::checked(serde_json::from_str(content)?)
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    fn checked(config: Self) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(config.relational_checks);
        assert_eq!(
            config.behavior_for(EventId::DecimalTypeDefaultWarning),
            WarningBehavior::Log
        );
    }

    #[test]
    fn test_toml_overrides() {
        let config = ValidatorConfig::from_toml_str(
            r#"
default_warning_behavior = "ignore"

[warnings]
ByteIdentityColumnWarning = "throw"
"#,
        )
        .unwrap();
        assert_eq!(
            config.behavior_for(EventId::ByteIdentityColumnWarning),
            WarningBehavior::Throw
        );
        assert_eq!(
            config.behavior_for(EventId::DecimalTypeDefaultWarning),
            WarningBehavior::Ignore
        );
    }

    #[test]
    fn test_throwing_query_warning_is_rejected() {
        let result = ValidatorConfig::from_yaml_str("warnings:\n  MemberTranslationMissing: throw\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validator.ini");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(
            ValidatorConfig::load(&path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }
}
