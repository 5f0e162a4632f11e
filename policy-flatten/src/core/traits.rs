//! Seams between extraction and storage.

use crate::core::summary::PersistedTable;
use crate::errors::Result;
use crate::model::table::Table;

/// Accepts finished tables.
///
/// The table is taken by value: once persisted, the in-memory copy is
/// released. Implementations overwrite any earlier output with the same name.
pub trait TableSink {
    fn persist(&mut self, table: Table) -> Result<PersistedTable>;
}
