//! Relational metadata views
//!
//! Read-only accessors over the relational annotations of a metadata item.
//! Each view falls back to the naming defaults used when nothing was
//! configured.

use super::annotations::{Annotation, names};
use super::entity_type::EntityType;
use super::key::Key;
use super::property::Property;

/// Relational view of a property
#[derive(Debug, Clone, Copy)]
pub struct RelationalPropertyAnnotations<'a> {
    property: &'a Property,
}

impl<'a> RelationalPropertyAnnotations<'a> {
    /// Column name, defaulting to the property name
    pub fn column_name(&self) -> &'a str {
        self.property
            .annotations
            .value(names::COLUMN_NAME)
            .and_then(|v| v.as_str())
            .unwrap_or(&self.property.name)
    }

    /// The column type annotation, if any
    pub fn column_type_annotation(&self) -> Option<&'a Annotation> {
        self.property.annotations.find(names::COLUMN_TYPE)
    }

    /// Store type: the configured column type, else the mapped store type
    pub fn column_type(&self) -> Option<&'a str> {
        self.property
            .annotations
            .value(names::COLUMN_TYPE)
            .or_else(|| self.property.annotations.value(names::TYPE_MAPPING))
            .and_then(|v| v.as_str())
    }

    pub fn default_value_sql(&self) -> Option<&'a str> {
        self.property
            .annotations
            .value(names::DEFAULT_VALUE_SQL)
            .and_then(|v| v.as_str())
    }

    pub fn computed_column_sql(&self) -> Option<&'a str> {
        self.property
            .annotations
            .value(names::COMPUTED_COLUMN_SQL)
            .and_then(|v| v.as_str())
    }
}

/// Relational view of an entity type
#[derive(Debug, Clone, Copy)]
pub struct RelationalEntityTypeAnnotations<'a> {
    entity_type: &'a EntityType,
}

impl<'a> RelationalEntityTypeAnnotations<'a> {
    /// Table name, defaulting to the entity type name
    pub fn table_name(&self) -> &'a str {
        self.entity_type
            .annotations
            .value(names::TABLE_NAME)
            .and_then(|v| v.as_str())
            .unwrap_or(&self.entity_type.name)
    }

    pub fn schema(&self) -> Option<&'a str> {
        self.entity_type
            .annotations
            .value(names::SCHEMA)
            .and_then(|v| v.as_str())
    }
}

/// Relational view of a key, read in the context of its declaring type
#[derive(Debug, Clone, Copy)]
pub struct RelationalKeyAnnotations<'a> {
    key: &'a Key,
    entity_type: &'a EntityType,
}

impl RelationalKeyAnnotations<'_> {
    /// Constraint name: `PK_<table>` or `AK_<table>_<columns>` unless configured
    pub fn name(&self) -> String {
        if let Some(name) = self.key.annotations.value(names::NAME).and_then(|v| v.as_str()) {
            return name.to_string();
        }
        let table = self.entity_type.relational().table_name();
        if self.key.is_primary {
            format!("PK_{}", table)
        } else {
            format!("AK_{}_{}", table, self.column_names().join("_"))
        }
    }

    /// Column names of the key properties, in key order
    pub fn column_names(&self) -> Vec<String> {
        self.key
            .properties
            .iter()
            .map(|name| match self.entity_type.find_property(name) {
                Some(property) => property.relational().column_name().to_string(),
                None => name.clone(),
            })
            .collect()
    }
}

impl Property {
    pub fn relational(&self) -> RelationalPropertyAnnotations<'_> {
        RelationalPropertyAnnotations { property: self }
    }
}

impl EntityType {
    pub fn relational(&self) -> RelationalEntityTypeAnnotations<'_> {
        RelationalEntityTypeAnnotations { entity_type: self }
    }
}

impl Key {
    pub fn relational<'a>(&'a self, entity_type: &'a EntityType) -> RelationalKeyAnnotations<'a> {
        RelationalKeyAnnotations {
            key: self,
            entity_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotations::ConfigurationSource;
    use crate::models::clr_type::ClrType;

    #[test]
    fn test_key_name_defaults() {
        let mut order = EntityType::new("Order");
        let mut number = Property::new("Number", ClrType::String);
        number
            .annotations
            .set(names::COLUMN_NAME, "order_no", ConfigurationSource::Explicit);
        order.properties.push(Property::new("Id", ClrType::Int32));
        order.properties.push(number);
        order.keys.push(Key::new(["Id"], true));
        order.keys.push(Key::new(["Number"], false));

        assert_eq!(order.keys[0].relational(&order).name(), "PK_Order");
        assert_eq!(order.keys[1].relational(&order).name(), "AK_Order_order_no");
    }

    #[test]
    fn test_column_type_prefers_explicit_annotation() {
        let mut price = Property::new("Price", ClrType::Decimal);
        price
            .annotations
            .set(names::TYPE_MAPPING, "decimal(18,2)", ConfigurationSource::Convention);
        assert_eq!(price.relational().column_type(), Some("decimal(18,2)"));

        price
            .annotations
            .set(names::COLUMN_TYPE, "money", ConfigurationSource::Explicit);
        assert_eq!(price.relational().column_type(), Some("money"));
        assert_eq!(price.relational().column_name(), "Price");
    }
}
