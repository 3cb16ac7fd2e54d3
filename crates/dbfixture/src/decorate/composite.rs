//! Table concatenation.

use std::sync::Arc;

use crate::core::{Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// Several tables sharing one metadata, presented as one logical table.
///
/// Row count is the sum of the sub-table counts; a row index resolves to the
/// sub-table owning it, with a local offset. Every sub-table must be
/// random-access.
#[derive(Debug)]
pub struct CompositeTable {
    metadata: TableMetadata,
    tables: Vec<Arc<dyn Table>>,
}

impl CompositeTable {
    /// Concatenate `tables` under an explicit `metadata`.
    pub fn new(metadata: TableMetadata, tables: Vec<Arc<dyn Table>>) -> Result<Self> {
        if tables.is_empty() {
            return Err(FixtureError::config(
                "composite table requires at least one table",
            ));
        }
        Ok(Self { metadata, tables })
    }

    /// Concatenate `tables` under the first table's metadata.
    pub fn from_tables(tables: Vec<Arc<dyn Table>>) -> Result<Self> {
        let metadata = tables
            .first()
            .ok_or_else(|| {
                FixtureError::config("composite table requires at least one table")
            })?
            .metadata()
            .clone();
        Self::new(metadata, tables)
    }
}

impl Table for CompositeTable {
    fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    fn row_count(&self) -> Result<usize> {
        let mut total = 0;
        for table in &self.tables {
            total += table.row_count()?;
        }
        Ok(total)
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let mut offset = 0;
        for table in &self.tables {
            let count = table.row_count()?;
            if row < offset + count {
                return table.value(row - offset, column);
            }
            offset += count;
        }
        Err(FixtureError::row_out_of_bounds(
            self.metadata.table_name(),
            row,
            offset,
        ))
    }
}
