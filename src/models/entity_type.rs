//! Entity type model

use super::annotations::Annotations;
use super::key::{ForeignKey, Index, Key};
use super::property::Property;
use serde::{Deserialize, Serialize};

/// A mapped domain type with its declared properties, keys and indexes
///
/// # Example
///
/// ```rust
/// use relational_model_sdk::models::{ClrType, EntityType, Key, Property};
///
/// let mut order = EntityType::new("Order");
/// order.properties.push(Property::new("Id", ClrType::Int32));
/// order.keys.push(Key::new(["Id"], true));
/// assert!(order.is_key("Id"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            keys: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            annotations: Annotations::new(),
        }
    }

    /// Name used in diagnostics
    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn find_property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    pub fn primary_key(&self) -> Option<&Key> {
        self.keys.iter().find(|k| k.is_primary)
    }

    /// Whether the property takes part in any primary or alternate key
    pub fn is_key(&self, property: &str) -> bool {
        self.keys.iter().any(|k| k.contains(property))
    }

    pub fn is_foreign_key(&self, property: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.properties.iter().any(|p| p == property))
    }
}
