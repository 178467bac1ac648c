//! Schema description types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single column as the engine's catalog reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Engine-native declared type, e.g. `character varying(40)`. Not normalized.
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

/// Table name to ordered columns. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescription {
    tables: BTreeMap<String, Vec<ColumnDescriptor>>,
}

impl SchemaDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with no columns yet. Existing entries are kept.
    pub fn add_table(&mut self, table: impl Into<String>) -> &mut Vec<ColumnDescriptor> {
        self.tables.entry(table.into()).or_default()
    }

    /// Append a column to a table, creating the table if needed.
    pub fn push_column(&mut self, table: impl Into<String>, column: ColumnDescriptor) {
        self.add_table(table).push(column);
    }

    pub fn columns(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
