//! Root message extractor (`TABLE_PersAutoPolicyModRq`).

use super::{LevelOutput, Scoped};
use crate::core::{ids::IdGenerator, project};
use crate::errors::{FlattenError, Result};
use crate::model::{element::Element, level::Level, table::Row, table::Table};
use tracing::debug;

/// Message-level scalars; each must be present exactly where expected.
pub const REQUIRED_FIELDS: [&str; 3] = ["RequId", "TransactionRequestDt", "TransactionEffectiveDt"];

/// Extract the single root row. The key is the unsalted hash of the message.
pub fn extract_root<'doc>(msg: &'doc Element, ids: &mut IdGenerator) -> Result<LevelOutput<'doc>> {
    let level = Level::PersAutoPolicyModRq;
    let mut row = Row::new();

    for field in REQUIRED_FIELDS {
        let el = msg
            .find(field)
            .ok_or_else(|| FlattenError::missing(field, msg.tag.clone()))?;
        row.extend(project::project(el));
    }
    row.insert(level.pk_column(), ids.generate(msg, ""));

    let mut table = Table::new(level.table_name(), base_columns());
    table.push(row.clone());
    debug!(table = level.table_name(), "extracted root message");

    Ok(LevelOutput {
        table,
        scopes: vec![Scoped { element: msg, row }],
    })
}

fn base_columns() -> Vec<String> {
    let mut cols = vec![Level::PersAutoPolicyModRq.pk_column(), "RequId".to_string()];
    for field in &REQUIRED_FIELDS[1..] {
        cols.push(field.to_string());
        cols.push(format!("{field}_id"));
    }
    cols
}
