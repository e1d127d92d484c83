//! Model root and table mapping

use super::annotations::Annotations;
use super::entity_type::EntityType;
use super::property::Property;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Root container of entity types
///
/// Once finalized a model is read-only; validators only inspect it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    /// All declared properties paired with their declaring entity type
    pub fn declared_properties(&self) -> impl Iterator<Item = (&EntityType, &Property)> {
        self.entity_types
            .iter()
            .flat_map(|e| e.properties.iter().map(move |p| (e, p)))
    }

    /// Group entity types by the table they map to.
    ///
    /// Tables keep the order in which they are first mapped, and entity
    /// types within a table keep model order.
    pub fn tables(&self) -> Vec<TableMapping<'_>> {
        let mut tables: Vec<TableMapping<'_>> = Vec::new();
        let mut positions: HashMap<(Option<&str>, &str), usize> = HashMap::new();

        for entity_type in &self.entity_types {
            let relational = entity_type.relational();
            let key = (relational.schema(), relational.table_name());
            match positions.get(&key) {
                Some(&idx) => tables[idx].entity_types.push(entity_type),
                None => {
                    positions.insert(key, tables.len());
                    tables.push(TableMapping {
                        schema: key.0,
                        name: key.1,
                        entity_types: vec![entity_type],
                    });
                }
            }
        }

        tables
    }

    /// Tables mapped by more than one entity type
    pub fn shared_tables(&self) -> Vec<TableMapping<'_>> {
        self.tables()
            .into_iter()
            .filter(|table| table.is_shared())
            .collect()
    }
}

/// A physical table and the entity types mapped to it
#[derive(Debug, Clone)]
pub struct TableMapping<'a> {
    pub schema: Option<&'a str>,
    pub name: &'a str,
    pub entity_types: Vec<&'a EntityType>,
}

impl TableMapping<'_> {
    pub fn is_shared(&self) -> bool {
        self.entity_types.len() > 1
    }
}

impl fmt::Display for TableMapping<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(self.name),
        }
    }
}
