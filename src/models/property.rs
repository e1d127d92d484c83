//! Property model

use super::annotations::{Annotations, Configured};
use super::clr_type::ClrType;
use serde::{Deserialize, Serialize};

/// When the store generates a value for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueGenerated {
    #[default]
    Never,
    OnAdd,
    OnUpdate,
    OnAddOrUpdate,
}

/// A scalar property of an entity type, mapped to a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub clr_type: ClrType,
    /// Explicit nullability. Defaults from the type when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_generated: Option<Configured<ValueGenerated>>,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Property {
    pub fn new(name: impl Into<String>, clr_type: ClrType) -> Self {
        Self {
            name: name.into(),
            clr_type,
            nullable: None,
            value_generated: None,
            annotations: Annotations::new(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or_else(|| {
            self.clr_type.is_nullable_wrapper() || self.clr_type.is_reference_type()
        })
    }

    pub fn value_generated(&self) -> ValueGenerated {
        self.value_generated
            .as_ref()
            .map(|v| v.value)
            .unwrap_or_default()
    }

    /// Set the value generation mode unless a stronger source already did
    pub fn set_value_generated(&mut self, value: Configured<ValueGenerated>) -> bool {
        let current = self.value_generated.as_ref().map(|v| v.source);
        if !value.source.overrides(current) {
            return false;
        }
        self.value_generated = Some(value);
        true
    }
}
