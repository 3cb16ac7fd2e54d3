//! Single-direction cursor enforcement.

use std::cell::Cell;
use std::sync::Arc;

use crate::core::{Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// A pass-through decorator that forbids rewinding.
///
/// Row access must be monotonically non-decreasing; moving backward fails
/// immediately with [`FixtureError::Unsupported`], as does asking for the
/// row count. Re-reading the current row is allowed.
pub struct ForwardOnlyTable {
    source: Arc<dyn Table>,
    last_row: Cell<Option<usize>>,
}

impl ForwardOnlyTable {
    /// Wrap `source`.
    pub fn new(source: Arc<dyn Table>) -> Self {
        Self {
            source,
            last_row: Cell::new(None),
        }
    }
}

impl Table for ForwardOnlyTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        Err(FixtureError::unsupported(format!(
            "row count is not supported on forward-only table '{}'",
            self.metadata().table_name()
        )))
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        if let Some(last) = self.last_row.get() {
            if row < last {
                return Err(FixtureError::unsupported(format!(
                    "forward-only table '{}' cannot move backward from row {} to row {}",
                    self.metadata().table_name(),
                    last,
                    row
                )));
            }
        }
        self.last_row.set(Some(row));
        self.source.value(row, column)
    }
}
