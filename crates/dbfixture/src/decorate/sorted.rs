//! Deterministic row ordering.
//!
//! [`SortedTable`] presents a stable full ordering of all source rows by a
//! column list without copying row data: a permutation of row indices is
//! computed lazily on first value access and cached in a one-shot cell.
//!
//! Two comparator strategies exist. [`SortStrategy::Lexical`] (the default)
//! compares each key column's canonical text form; [`SortStrategy::Typed`]
//! delegates to each column's semantic [`DataKind`]. NULL and the no-value
//! sentinel sort before every concrete value; ties break by the next column
//! in the list, then by source row order (the sort is stable).
//!
//! This ordering is also what the comparison engine uses to make dataset
//! assertions independent of row order; see [`sort_permutation`].

use std::cmp::Ordering;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::core::{DataKind, Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// Row-comparator strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Compare the canonical text form of each key column.
    Lexical,
    /// Compare through each key column's semantic kind.
    Typed,
}

/// A table presenting its source rows in sorted order.
#[derive(Debug)]
pub struct SortedTable {
    source: Arc<dyn Table>,
    columns: Vec<String>,
    strategy: SortStrategy,
    permutation: OnceCell<Vec<usize>>,
}

impl SortedTable {
    /// Sort by the table's own column order.
    pub fn new(source: Arc<dyn Table>) -> Result<Self> {
        let columns: Vec<String> = source
            .metadata()
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        Self::with_columns_owned(source, columns)
    }

    /// Sort by an explicit column list; ties break by later entries.
    pub fn with_columns(source: Arc<dyn Table>, columns: &[&str]) -> Result<Self> {
        let columns = columns.iter().map(|c| (*c).to_string()).collect();
        Self::with_columns_owned(source, columns)
    }

    fn with_columns_owned(source: Arc<dyn Table>, columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(FixtureError::config(
                "sorted table requires at least one sort column",
            ));
        }
        for column in &columns {
            source.metadata().column_index(column)?;
        }
        Ok(Self {
            source,
            columns,
            strategy: SortStrategy::Lexical,
            permutation: OnceCell::new(),
        })
    }

    /// Switch the comparator strategy.
    ///
    /// The strategy must be fixed before the first value access: changing it
    /// after the sort permutation exists is a contract violation and fails
    /// with [`FixtureError::Unsupported`].
    pub fn set_strategy(&mut self, strategy: SortStrategy) -> Result<()> {
        if self.permutation.get().is_some() {
            return Err(FixtureError::unsupported(
                "sort strategy cannot change after rows have been accessed",
            ));
        }
        self.strategy = strategy;
        Ok(())
    }

    /// Builder-style [`set_strategy`](Self::set_strategy).
    pub fn with_strategy(mut self, strategy: SortStrategy) -> Result<Self> {
        self.set_strategy(strategy)?;
        Ok(self)
    }

    /// The active comparator strategy.
    #[must_use]
    pub fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    fn permutation(&self) -> Result<&[usize]> {
        self.permutation
            .get_or_try_init(|| {
                sort_permutation(self.source.as_ref(), &self.columns, self.strategy)
            })
            .map(Vec::as_slice)
    }
}

impl Table for SortedTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        self.source.row_count()
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let permutation = self.permutation()?;
        let source_row = *permutation.get(row).ok_or_else(|| {
            FixtureError::row_out_of_bounds(
                self.metadata().table_name(),
                row,
                permutation.len(),
            )
        })?;
        self.source.value(source_row, column)
    }
}

/// Compute the stable sort permutation of `table`'s rows over `columns`.
///
/// Shared between [`SortedTable`] and the comparison engine so both order
/// rows identically. The source must be random-access; every key cell is
/// fetched exactly once.
pub fn sort_permutation(
    table: &dyn Table,
    columns: &[String],
    strategy: SortStrategy,
) -> Result<Vec<usize>> {
    let row_count = table.row_count()?;
    let metadata = table.metadata();

    let kinds: Vec<DataKind> = columns
        .iter()
        .map(|c| metadata.column(c).map(|col| col.kind()))
        .collect::<Result<_>>()?;

    let mut keys: Vec<Vec<Value>> = Vec::with_capacity(row_count);
    for row in 0..row_count {
        let key: Vec<Value> = columns
            .iter()
            .map(|c| table.value(row, c))
            .collect::<Result<_>>()?;
        keys.push(key);
    }

    let mut permutation: Vec<usize> = (0..row_count).collect();
    permutation.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], &kinds, strategy));
    Ok(permutation)
}

fn compare_keys(
    a: &[Value],
    b: &[Value],
    kinds: &[DataKind],
    strategy: SortStrategy,
) -> Ordering {
    for (i, kind) in kinds.iter().enumerate() {
        let ord = match strategy {
            SortStrategy::Typed => kind.compare(&a[i], &b[i]),
            SortStrategy::Lexical => DataKind::Text.compare(&a[i], &b[i]),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
