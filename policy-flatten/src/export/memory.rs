//! In-memory sink: keeps persisted tables by name.

use crate::core::{summary::PersistedTable, traits::TableSink};
use crate::errors::Result;
use crate::model::table::Table;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemorySink {
    tables: BTreeMap<String, Table>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn into_tables(self) -> BTreeMap<String, Table> {
        self.tables
    }
}

impl TableSink for MemorySink {
    fn persist(&mut self, table: Table) -> Result<PersistedTable> {
        let persisted = PersistedTable {
            name: table.name().to_string(),
            rows: table.len(),
            columns: table.columns().to_vec(),
            path: None,
        };
        self.tables.insert(persisted.name.clone(), table);
        Ok(persisted)
    }
}
