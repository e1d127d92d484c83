//! Annotations and configuration sources
//!
//! Every piece of provider metadata is stored as a named annotation that
//! remembers where it came from. Validation rules use that provenance to
//! tell user intent apart from defaults applied by conventions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known annotation names
pub mod names {
    /// Core type mapping chosen for a property
    pub const TYPE_MAPPING: &str = "TypeMapping";

    pub const TABLE_NAME: &str = "Relational:TableName";
    pub const SCHEMA: &str = "Relational:Schema";
    pub const COLUMN_NAME: &str = "Relational:ColumnName";
    pub const COLUMN_TYPE: &str = "Relational:ColumnType";
    pub const DEFAULT_VALUE_SQL: &str = "Relational:DefaultValueSql";
    pub const COMPUTED_COLUMN_SQL: &str = "Relational:ComputedColumnSql";
    /// Constraint name of a key
    pub const NAME: &str = "Relational:Name";

    pub const VALUE_GENERATION_STRATEGY: &str = "SqlServer:ValueGenerationStrategy";
    pub const HILO_SEQUENCE_NAME: &str = "SqlServer:HiLoSequenceName";
    pub const CLUSTERED: &str = "SqlServer:Clustered";
    pub const INCLUDE: &str = "SqlServer:Include";
    pub const MEMORY_OPTIMIZED: &str = "SqlServer:MemoryOptimized";
}

/// Where a configuration value came from.
///
/// Variants are ordered by precedence: a source can replace a value set by
/// any source that is not stronger than itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ConfigurationSource {
    /// Inferred by a convention during model building
    Convention,
    /// Declared through attribute-style metadata on the mapped type
    DataAnnotation,
    /// Set by the user through the model builder or a model document
    #[default]
    Explicit,
}

impl ConfigurationSource {
    /// Whether a value from `self` may replace a value from `other`
    pub fn overrides(self, other: Option<ConfigurationSource>) -> bool {
        match other {
            None => true,
            Some(other) => self >= other,
        }
    }

    /// Whether a value from this source reflects user intent
    pub fn is_explicit(self) -> bool {
        !ConfigurationSource::Convention.overrides(Some(self))
    }
}

impl fmt::Display for ConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigurationSource::Convention => "Convention",
            ConfigurationSource::DataAnnotation => "DataAnnotation",
            ConfigurationSource::Explicit => "Explicit",
        };
        f.write_str(name)
    }
}

/// A configuration value tagged with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configured<T> {
    pub value: T,
    #[serde(default)]
    pub source: ConfigurationSource,
}

impl<T> Configured<T> {
    pub fn new(value: T, source: ConfigurationSource) -> Self {
        Self { value, source }
    }

    pub fn explicit(value: T) -> Self {
        Self::new(value, ConfigurationSource::Explicit)
    }

    pub fn convention(value: T) -> Self {
        Self::new(value, ConfigurationSource::Convention)
    }
}

/// Annotation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<String>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnnotationValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::String(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::String(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Int(value)
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(value: Vec<String>) -> Self {
        AnnotationValue::List(value)
    }
}

/// A named annotation together with its configuration source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub value: AnnotationValue,
    #[serde(default)]
    pub source: ConfigurationSource,
}

/// Annotation set attached to a metadata item
///
/// Backed by an ordered map so iteration and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(BTreeMap<String, Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&Annotation> {
        self.0.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.0.get(name).map(|a| &a.value)
    }

    pub fn source(&self, name: &str) -> Option<ConfigurationSource> {
        self.0.get(name).map(|a| a.source)
    }

    /// Set an annotation unless a stronger source already configured it.
    ///
    /// Returns `true` when the value was stored.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AnnotationValue>,
        source: ConfigurationSource,
    ) -> bool {
        let name = name.into();
        if !source.overrides(self.source(&name)) {
            return false;
        }
        self.0.insert(
            name,
            Annotation {
                value: value.into(),
                source,
            },
        );
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Annotation> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
