//! Key and index models

use super::annotations::Annotations;
use serde::{Deserialize, Serialize};

/// A primary or alternate key over an ordered list of properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub properties: Vec<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Key {
    pub fn new<I, S>(properties: I, is_primary: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            is_primary,
            annotations: Annotations::new(),
        }
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }
}

/// An index over an ordered list of properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub properties: Vec<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Index {
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            is_unique: false,
            annotations: Annotations::new(),
        }
    }
}

/// A foreign key from dependent properties to a principal entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub properties: Vec<String>,
    pub principal_entity_type: String,
    /// Principal key properties. Empty means the principal's primary key.
    #[serde(default)]
    pub principal_key: Vec<String>,
}

impl ForeignKey {
    pub fn new<I, S>(properties: I, principal_entity_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            principal_entity_type: principal_entity_type.into(),
            principal_key: Vec::new(),
        }
    }
}

/// Format a property list the way error messages show it: `{'A', 'B'}`
pub fn format_properties(properties: &[String]) -> String {
    let quoted: Vec<String> = properties.iter().map(|p| format!("'{}'", p)).collect();
    format!("{{{}}}", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_properties() {
        let key = Key::new(["OrderId", "LineNo"], true);
        assert_eq!(format_properties(&key.properties), "{'OrderId', 'LineNo'}");
        assert_eq!(format_properties(&[]), "{}");
    }
}
