//! Table metadata: name, canonical column order, primary-key subset.

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

use super::column::Column;

/// Metadata for one table.
///
/// Column insertion order is significant: it defines the canonical column
/// order for the table. The primary-key list is a subset of the columns, in
/// key-sequence order.
///
/// Invariants, enforced at construction:
/// - column names are unique within the table (case-insensitive)
/// - every primary-key column exists, by name, in the columns sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name.
    name: String,

    /// Column definitions in canonical order.
    columns: Vec<Column>,

    /// Primary-key columns in key-sequence order.
    primary_keys: Vec<Column>,
}

impl TableMetadata {
    /// Create metadata without a primary key.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        Self::with_primary_keys(name, columns, &[])
    }

    /// Create metadata with the named columns as primary key.
    ///
    /// `primary_keys` entries are matched against `columns` case-insensitively
    /// and the resulting key list preserves the order given here.
    pub fn with_primary_keys(
        name: impl Into<String>,
        columns: Vec<Column>,
        primary_keys: &[&str],
    ) -> Result<Self> {
        let name = name.into();

        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.matches_name(col.name())) {
                return Err(FixtureError::config(format!(
                    "table '{}' declares column '{}' more than once",
                    name,
                    col.name()
                )));
            }
        }

        let mut pk_columns = Vec::with_capacity(primary_keys.len());
        for pk in primary_keys {
            let col = columns
                .iter()
                .find(|c| c.matches_name(pk))
                .ok_or_else(|| {
                    FixtureError::config(format!(
                        "primary-key column '{}' is not a column of table '{}'",
                        pk, name
                    ))
                })?;
            pk_columns.push(col.clone());
        }

        Ok(Self {
            name,
            columns,
            primary_keys: pk_columns,
        })
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.name
    }

    /// Columns in canonical order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Primary-key columns in key-sequence order. Empty if the table has no
    /// primary key.
    #[must_use]
    pub fn primary_keys(&self) -> &[Column] {
        &self.primary_keys
    }

    /// Column names in canonical order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Case-insensitive index lookup.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.matches_name(column))
            .ok_or_else(|| FixtureError::column_not_found(&self.name, column))
    }

    /// Case-insensitive column lookup.
    pub fn column(&self, column: &str) -> Result<&Column> {
        let idx = self.column_index(column)?;
        Ok(&self.columns[idx])
    }

    /// Check if a column exists (case-insensitive).
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.matches_name(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::DataKind;

    fn make_columns() -> Vec<Column> {
        vec![
            Column::new("Id", DataKind::Integer),
            Column::new("Name", DataKind::Text),
            Column::new("CreatedAt", DataKind::DateTime),
        ]
    }

    #[test]
    fn test_construction_and_lookup() {
        let meta = TableMetadata::with_primary_keys("users", make_columns(), &["id"]).unwrap();
        assert_eq!(meta.table_name(), "users");
        assert_eq!(meta.columns().len(), 3);
        assert_eq!(meta.primary_keys().len(), 1);
        assert_eq!(meta.primary_keys()[0].name(), "Id");
        assert_eq!(meta.column_index("NAME").unwrap(), 1);
        assert!(meta.has_column("createdat"));
    }

    #[test]
    fn test_column_not_found() {
        let meta = TableMetadata::new("users", make_columns()).unwrap();
        let err = meta.column_index("missing").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::ColumnNotFound { ref table, ref column }
                if table == "users" && column == "missing"
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut columns = make_columns();
        columns.push(Column::new("ID", DataKind::Integer));
        let err = TableMetadata::new("users", columns).unwrap_err();
        assert!(matches!(err, FixtureError::Config(_)));
    }

    #[test]
    fn test_unknown_primary_key_rejected() {
        let err =
            TableMetadata::with_primary_keys("users", make_columns(), &["missing"]).unwrap_err();
        assert!(matches!(err, FixtureError::Config(_)));
    }

    #[test]
    fn test_primary_key_order_preserved() {
        let meta =
            TableMetadata::with_primary_keys("users", make_columns(), &["name", "id"]).unwrap();
        let pk_names: Vec<&str> = meta.primary_keys().iter().map(Column::name).collect();
        assert_eq!(pk_names, vec!["Name", "Id"]);
    }
}
