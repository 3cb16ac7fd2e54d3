//! In-memory tables and datasets.
//!
//! [`DefaultTable`] and [`DefaultDataSet`] are the base producers the
//! decorator chain composes over: plain row storage validated against the
//! table metadata at insertion time.

use std::sync::Arc;

use crate::core::{check_row_bounds, DataSet, Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// A random-access table backed by in-memory rows.
#[derive(Debug, Clone)]
pub struct DefaultTable {
    metadata: TableMetadata,
    rows: Vec<Vec<Value>>,
}

impl DefaultTable {
    /// Create an empty table bound to `metadata`.
    pub fn new(metadata: TableMetadata) -> Self {
        Self {
            metadata,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    ///
    /// The row must have exactly one value per column, in canonical column
    /// order. Use [`Value::NoValue`] for cells the fixture does not specify.
    pub fn add_row(&mut self, row: Vec<Value>) -> Result<()> {
        let expected = self.metadata.columns().len();
        if row.len() != expected {
            return Err(FixtureError::config(format!(
                "row width {} does not match table '{}' with {} columns",
                row.len(),
                self.metadata.table_name(),
                expected
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style [`add_row`](Self::add_row).
    pub fn with_row(mut self, row: Vec<Value>) -> Result<Self> {
        self.add_row(row)?;
        Ok(self)
    }
}

impl Table for DefaultTable {
    fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    fn row_count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        check_row_bounds(&self.metadata, row, self.rows.len())?;
        let idx = self.metadata.column_index(column)?;
        Ok(self.rows[row][idx].clone())
    }
}

/// An in-memory dataset: an ordered list of shared table handles.
///
/// Duplicate table names are allowed; by-name lookup then fails with the
/// ambiguity error, per the [`DataSet`] contract.
#[derive(Default)]
pub struct DefaultDataSet {
    tables: Vec<Arc<dyn Table>>,
}

impl DefaultDataSet {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from an existing table list.
    pub fn from_tables(tables: Vec<Arc<dyn Table>>) -> Self {
        Self { tables }
    }

    /// Append a table.
    pub fn add_table(&mut self, table: impl Table + 'static) {
        self.tables.push(Arc::new(table));
    }

    /// Append a shared table handle.
    pub fn add_shared(&mut self, table: Arc<dyn Table>) {
        self.tables.push(table);
    }

    /// Builder-style [`add_table`](Self::add_table).
    #[must_use]
    pub fn with_table(mut self, table: impl Table + 'static) -> Self {
        self.add_table(table);
        self
    }
}

impl DataSet for DefaultDataSet {
    fn tables(&self) -> &[Arc<dyn Table>] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataKind};

    fn users_metadata() -> TableMetadata {
        TableMetadata::with_primary_keys(
            "users",
            vec![
                Column::new("id", DataKind::Integer),
                Column::new("name", DataKind::Text),
            ],
            &["id"],
        )
        .unwrap()
    }

    #[test]
    fn test_table_storage_and_lookup() {
        let table = DefaultTable::new(users_metadata())
            .with_row(vec![Value::I32(1), Value::Text("alice".to_string())])
            .unwrap()
            .with_row(vec![Value::I32(2), Value::Null])
            .unwrap();

        assert_eq!(table.row_count().unwrap(), 2);
        assert_eq!(table.value(0, "ID").unwrap(), Value::I32(1));
        assert_eq!(table.value(1, "name").unwrap(), Value::Null);
    }

    #[test]
    fn test_row_out_of_bounds() {
        let table = DefaultTable::new(users_metadata());
        let err = table.value(0, "id").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::RowOutOfBounds { row: 0, row_count: 0, .. }
        ));
    }

    #[test]
    fn test_row_width_validated() {
        let mut table = DefaultTable::new(users_metadata());
        let err = table.add_row(vec![Value::I32(1)]).unwrap_err();
        assert!(matches!(err, FixtureError::Config(_)));
    }

    #[test]
    fn test_dataset_lookup_distinguishes_not_found_and_ambiguous() {
        let mut dataset = DefaultDataSet::new();
        dataset.add_table(DefaultTable::new(users_metadata()));
        dataset.add_table(DefaultTable::new(users_metadata()));

        let err = dataset.table("users").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::AmbiguousTable { ref name, matches: 2 } if name == "users"
        ));

        let err = dataset.table("orders").unwrap_err();
        assert!(matches!(err, FixtureError::TableNotFound(ref name) if name == "orders"));
    }

    #[test]
    fn test_dataset_iteration_order() {
        let orders = TableMetadata::new("orders", vec![Column::new("id", DataKind::Integer)])
            .unwrap();
        let dataset = DefaultDataSet::new()
            .with_table(DefaultTable::new(users_metadata()))
            .with_table(DefaultTable::new(orders));

        assert_eq!(dataset.table_names(), vec!["users", "orders"]);
        let reversed: Vec<&str> = dataset
            .iter_reverse()
            .map(|t| t.metadata().table_name())
            .collect();
        assert_eq!(reversed, vec!["orders", "users"]);
    }
}
