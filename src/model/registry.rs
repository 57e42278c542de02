//! Schema registry
//!
//! The registry is the run's accumulated extraction result: an
//! insertion-ordered mapping from source entity name to table. It is owned
//! by the pipeline and threaded through extraction, export and rendering;
//! renderers only read it.

use indexmap::IndexMap;

use crate::model::types::Table;

/// Ordered mapping from source entity name to extracted table
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: IndexMap<String, Table>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its source entity name.
    ///
    /// Keys are unique: a later extraction of the same entity name replaces
    /// the earlier table (last write wins, no merge). The entry keeps its
    /// original position so diagram order stays stable.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.source_entity_name.clone(), table);
    }

    /// Look up a table by source entity name
    pub fn get(&self, entity_name: &str) -> Option<&Table> {
        self.tables.get(entity_name)
    }

    /// Iterate tables in registry population order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Table)> {
        self.tables.iter()
    }

    /// Tables in registry population order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Consume the registry, yielding the ordered table map
    pub fn into_tables(self) -> IndexMap<String, Table> {
        self.tables
    }
}
