//! Foreign-key binding.
//!
//! A child row carries one `FK_<name>` per ancestor up to the root. Values are
//! read from the parent row, which holds its own `PK_<name>` and the FKs it
//! inherited, so the whole path is re-exposed on every level.

use crate::errors::{FlattenError, Result};
use crate::model::{level::Level, table::Row};

/// Build `FK_<name>` columns for `ancestors` from `known`.
///
/// `PK_<name>` wins over `FK_<name>`. Neither present is a binding error:
/// every ancestor must have produced its row before a descendant runs.
pub fn bind_fks(ancestors: &[Level], known: &Row, table: &str) -> Result<Row> {
    let mut out = Row::new();
    for level in ancestors {
        let value = known
            .get(&level.pk_column())
            .or_else(|| known.get(&level.fk_column()))
            .ok_or_else(|| FlattenError::KeyBinding {
                ancestor: level.key_name().to_string(),
                table: table.to_string(),
            })?;
        out.insert(level.fk_column(), value.clone());
    }
    Ok(out)
}
