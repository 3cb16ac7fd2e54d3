//! The table contract.

use crate::error::{FixtureError, Result};

use super::metadata::TableMetadata;
use super::value::Value;

/// A read-only view over rows of typed values bound to fixed metadata.
///
/// This is the minimal capability set every decorator composes over:
/// metadata, a row count, and a cell getter. Implementations fall into two
/// families:
///
/// - **Random access**: `row_count` returns a finite count and `value`
///   accepts any `0 <= row < row_count`, failing out-of-range rows with
///   [`FixtureError::RowOutOfBounds`].
/// - **Forward-only**: `row_count` fails with
///   [`FixtureError::Unsupported`] and `value` additionally enforces
///   monotonically non-decreasing row access.
///
/// The no-value sentinel ([`Value::NoValue`]) must be passed through
/// unchanged by every implementation; it is meaningful to comparison.
pub trait Table {
    /// Metadata this table is bound to.
    fn metadata(&self) -> &TableMetadata;

    /// Number of rows.
    ///
    /// # Errors
    ///
    /// Forward-only tables return [`FixtureError::Unsupported`].
    fn row_count(&self) -> Result<usize>;

    /// Get the cell value at (`row`, `column`).
    ///
    /// Column names resolve case-insensitively.
    fn value(&self, row: usize, column: &str) -> Result<Value>;
}

impl std::fmt::Debug for dyn Table + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.metadata().table_name())
            .finish_non_exhaustive()
    }
}

/// Bounds check shared by random-access implementations.
///
/// Fails with [`FixtureError::RowOutOfBounds`] carrying the table name so
/// errors from different layers of a decorator chain stay distinguishable.
pub fn check_row_bounds(metadata: &TableMetadata, row: usize, row_count: usize) -> Result<()> {
    if row < row_count {
        Ok(())
    } else {
        Err(FixtureError::row_out_of_bounds(
            metadata.table_name(),
            row,
            row_count,
        ))
    }
}
