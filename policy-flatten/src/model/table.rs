//! In-memory tabular representation.
//!
//! All cells are strings; a column missing from a [`Row`] is a null.

use serde::Serialize;
use std::collections::BTreeMap;

/// One flat row: column name → value. Absent keys are nulls.
pub type Row = BTreeMap<String, String>;

/// A named table with a stable column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table whose schema starts with `base_columns`.
    ///
    /// Columns seen later in pushed rows are appended after them: rows are
    /// scanned in push order, and a row's new keys are taken in sorted order.
    pub fn new<I, S>(name: impl Into<String>, base_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        };
        for c in base_columns {
            table.add_column(c.into());
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, extending the schema with any new columns (sorted within
    /// the row, since [`Row`] is ordered by key).
    pub fn push(&mut self, row: Row) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Values of one column in row order (`None` = null).
    pub fn column(&self, name: &str) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|r| r.get(name).map(String::as_str))
            .collect()
    }

    fn add_column(&mut self, name: String) {
        if !self.columns.contains(&name) {
            self.columns.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_grows_by_row_then_by_sorted_key() {
        let mut t = Table::new("T", ["FK_A", "PK_B"]);
        let mut r1 = Row::new();
        r1.insert("PK_B".into(), "1".into());
        r1.insert("Zeta".into(), "z".into());
        r1.insert("Beta".into(), "b".into());
        t.push(r1);
        let mut r2 = Row::new();
        r2.insert("Alpha".into(), "a".into());
        t.push(r2);

        assert_eq!(t.columns(), ["FK_A", "PK_B", "Beta", "Zeta", "Alpha"]);
        assert_eq!(t.column("Zeta"), vec![Some("z"), None]);
        assert_eq!(t.len(), 2);
    }
}
