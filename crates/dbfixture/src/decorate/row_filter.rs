//! Row filtering and primary-key projection.
//!
//! Both tables here scan every source row once, at construction, and record
//! the surviving source row indices in order. Filtered rows are renumbered
//! contiguously from 0; the metadata is unchanged.

use std::sync::Arc;

use tracing::debug;

use crate::core::{Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// One row of the source table, presented to a predicate one row at a time.
pub struct RowView<'a> {
    table: &'a dyn Table,
    row: usize,
}

impl RowView<'_> {
    /// Source row index of this view.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Metadata of the table being filtered.
    #[must_use]
    pub fn metadata(&self) -> &TableMetadata {
        self.table.metadata()
    }

    /// Cell value of the viewed row.
    pub fn value(&self, column: &str) -> Result<Value> {
        self.table.value(self.row, column)
    }
}

/// Row-acceptance predicate, evaluated through a [`RowView`].
pub trait RowFilter {
    /// Whether the viewed row survives the filter.
    fn accept(&self, row: &RowView<'_>) -> Result<bool>;
}

impl<F> RowFilter for F
where
    F: Fn(&RowView<'_>) -> Result<bool>,
{
    fn accept(&self, row: &RowView<'_>) -> Result<bool> {
        self(row)
    }
}

/// Scan the source once, recording accepted row indices in order.
fn scan_rows(
    source: &dyn Table,
    mut accept: impl FnMut(&RowView<'_>) -> Result<bool>,
) -> Result<Vec<usize>> {
    let count = source.row_count()?;
    let mut mapping = Vec::new();
    for row in 0..count {
        let view = RowView { table: source, row };
        if accept(&view)? {
            mapping.push(row);
        }
    }
    Ok(mapping)
}

/// A table exposing only the rows a predicate accepts.
///
/// Row `i` of this table is the `i`-th source row satisfying the predicate,
/// in original relative order. Bounds failures report this table's filtered
/// row count, distinct from the source's.
#[derive(Debug)]
pub struct RowFilterTable {
    source: Arc<dyn Table>,
    mapping: Vec<usize>,
}

impl RowFilterTable {
    /// Filter `source` through `filter`. The source is scanned eagerly.
    pub fn new(source: Arc<dyn Table>, filter: &dyn RowFilter) -> Result<Self> {
        let mapping = scan_rows(source.as_ref(), |view| filter.accept(view))?;
        Ok(Self { source, mapping })
    }
}

impl Table for RowFilterTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.mapping.len())
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let source_row = *self.mapping.get(row).ok_or_else(|| {
            FixtureError::row_out_of_bounds(
                self.metadata().table_name(),
                row,
                self.mapping.len(),
            )
        })?;
        self.source.value(source_row, column)
    }
}

/// A table exposing only the rows whose primary-key value is in an allowed
/// list.
///
/// Only the *first* primary-key column is consulted; additional key columns
/// of a composite key are ignored (a debug log notes this). The source must
/// have a primary key.
#[derive(Debug)]
pub struct PkFilterTable {
    source: Arc<dyn Table>,
    mapping: Vec<usize>,
}

impl PkFilterTable {
    /// Keep the rows whose first primary-key column value equals one of
    /// `allowed`.
    pub fn new(source: Arc<dyn Table>, allowed: &[Value]) -> Result<Self> {
        let meta = source.metadata();
        let pks = meta.primary_keys();
        let pk_name = match pks.first() {
            Some(col) => col.name().to_string(),
            None => return Err(FixtureError::NoPrimaryKey(meta.table_name().to_string())),
        };
        if pks.len() > 1 {
            debug!(
                table = %meta.table_name(),
                "composite primary key: filtering on first key column '{}' only",
                pk_name
            );
        }

        let mapping = scan_rows(source.as_ref(), |view| {
            let key = view.value(&pk_name)?;
            Ok(allowed.contains(&key))
        })?;
        Ok(Self { source, mapping })
    }
}

impl Table for PkFilterTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.mapping.len())
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let source_row = *self.mapping.get(row).ok_or_else(|| {
            FixtureError::row_out_of_bounds(
                self.metadata().table_name(),
                row,
                self.mapping.len(),
            )
        })?;
        self.source.value(source_row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataKind};
    use crate::dataset::DefaultTable;

    fn make_table() -> Arc<dyn Table> {
        let meta = TableMetadata::with_primary_keys(
            "events",
            vec![
                Column::new("id", DataKind::Integer),
                Column::new("severity", DataKind::Text),
            ],
            &["id"],
        )
        .unwrap();
        let mut table = DefaultTable::new(meta);
        for (id, severity) in [(1, "info"), (2, "error"), (3, "info"), (4, "error")] {
            table
                .add_row(vec![Value::I32(id), Value::Text(severity.to_string())])
                .unwrap();
        }
        Arc::new(table)
    }

    #[test]
    fn test_filter_preserves_content_and_order() {
        let filter = |view: &RowView<'_>| Ok(view.value("severity")? == Value::Text("error".to_string()));
        let filtered = RowFilterTable::new(make_table(), &filter).unwrap();

        assert_eq!(filtered.row_count().unwrap(), 2);
        assert_eq!(filtered.value(0, "id").unwrap(), Value::I32(2));
        assert_eq!(filtered.value(1, "id").unwrap(), Value::I32(4));
    }

    #[test]
    fn test_filtered_bounds_distinct_from_source() {
        let filter = |view: &RowView<'_>| Ok(view.value("id")? == Value::I32(1));
        let filtered = RowFilterTable::new(make_table(), &filter).unwrap();

        // row 1 exists in the source but not in the filtered space
        let err = filtered.value(1, "id").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::RowOutOfBounds { row: 1, row_count: 1, .. }
        ));
    }

    #[test]
    fn test_predicate_errors_propagate() {
        let filter = |view: &RowView<'_>| view.value("no_such_column").map(|_| true);
        let err = RowFilterTable::new(make_table(), &filter).unwrap_err();
        assert!(matches!(err, FixtureError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_pk_filter_keeps_allowed_keys() {
        let filtered =
            PkFilterTable::new(make_table(), &[Value::I32(3), Value::I32(1)]).unwrap();
        assert_eq!(filtered.row_count().unwrap(), 2);
        assert_eq!(filtered.value(0, "id").unwrap(), Value::I32(1));
        assert_eq!(filtered.value(1, "id").unwrap(), Value::I32(3));
    }

    #[test]
    fn test_pk_filter_requires_primary_key() {
        let meta =
            TableMetadata::new("nopk", vec![Column::new("id", DataKind::Integer)]).unwrap();
        let table: Arc<dyn Table> = Arc::new(DefaultTable::new(meta));
        let err = PkFilterTable::new(table, &[Value::I32(1)]).unwrap_err();
        assert!(matches!(err, FixtureError::NoPrimaryKey(ref name) if name == "nopk"));
    }
}
