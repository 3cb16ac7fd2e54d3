//! The structural diff engine.
//!
//! Comparison ignores column order (columns match by case-insensitive name)
//! and, by default, row order: both sides are ordered with the same sort
//! permutation the [`SortedTable`](crate::decorate::SortedTable) decorator
//! uses, over the expected side's primary key (or all compared columns when
//! there is no key), so only genuine data differences fail an assertion.
//!
//! Cell equality goes through each column's semantic kind by default, so
//! `I32(7)` equals `I64(7)` in an integer column; lexical comparison of the
//! canonical text forms is available for backward-compatible matching. A
//! [`Value::NoValue`] cell on the expected side means the cell is
//! unspecified and is skipped; on the actual side it never equals an
//! explicit `Null`.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::{ConfigProperty, FixtureConfig};
use crate::core::{DataKind, DataSet, Table, Value};
use crate::decorate::{sort_permutation, SortStrategy};
use crate::error::{FixtureError, Result};

use super::types::{DataSetDiff, Difference, TableDiff};

/// Options controlling comparison behavior.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Sort rows before matching them (default `true`).
    pub sort_rows: bool,
    /// Compare cells through each column's semantic kind (default `true`);
    /// otherwise compare canonical text forms.
    pub typed: bool,
    /// Restrict comparison to these columns. `None` compares the full
    /// column sets, which must then match exactly.
    pub columns: Option<Vec<String>>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            sort_rows: true,
            typed: true,
            columns: None,
        }
    }
}

impl CompareOptions {
    /// Positional comparison: rows match by index, unsorted.
    #[must_use]
    pub fn positional() -> Self {
        Self {
            sort_rows: false,
            ..Self::default()
        }
    }

    /// Read the defaults from a [`FixtureConfig`].
    #[must_use]
    pub fn from_config(config: &FixtureConfig) -> Self {
        Self {
            sort_rows: config.bool_value(ConfigProperty::SortRows),
            typed: config.bool_value(ConfigProperty::TypedComparison),
            columns: None,
        }
    }

    /// Restrict comparison to the given columns.
    #[must_use]
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }
}

/// Resolve the columns both tables are compared over.
///
/// Without an explicit subset the two column *sets* must be equal by
/// case-insensitive name (order is ignored); any missing or extra column is
/// a hard comparison error, never silently dropped.
fn compare_columns(
    expected: &dyn Table,
    actual: &dyn Table,
    options: &CompareOptions,
) -> Result<Vec<String>> {
    let expected_meta = expected.metadata();
    let actual_meta = actual.metadata();
    let table = expected_meta.table_name();

    if let Some(subset) = &options.columns {
        for column in subset {
            expected_meta.column_index(column)?;
            actual_meta.column_index(column)?;
        }
        return Ok(subset.clone());
    }

    let mut missing = Vec::new();
    for column in expected_meta.columns() {
        if !actual_meta.has_column(column.name()) {
            missing.push(column.name().to_string());
        }
    }
    let mut extra = Vec::new();
    for column in actual_meta.columns() {
        if !expected_meta.has_column(column.name()) {
            extra.push(column.name().to_string());
        }
    }
    if !missing.is_empty() || !extra.is_empty() {
        return Err(FixtureError::Comparison(format!(
            "table '{}': column sets differ (missing from actual: [{}], unexpected in actual: [{}])",
            table,
            missing.join(", "),
            extra.join(", ")
        )));
    }

    Ok(expected_meta
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect())
}

/// The sort key for row matching: the expected side's primary key when it
/// has one (and every key column is being compared), else all compared
/// columns.
fn sort_columns(expected: &dyn Table, compared: &[String]) -> Vec<String> {
    let pks = expected.metadata().primary_keys();
    if !pks.is_empty()
        && pks
            .iter()
            .all(|pk| compared.iter().any(|c| pk.matches_name(c)))
    {
        pks.iter().map(|c| c.name().to_string()).collect()
    } else {
        compared.to_vec()
    }
}

fn cells_equal(kind: DataKind, expected: &Value, actual: &Value, typed: bool) -> bool {
    // NULL and the no-value sentinel only equal themselves
    if expected.is_null_like() || actual.is_null_like() {
        return matches!(
            (expected, actual),
            (Value::Null, Value::Null) | (Value::NoValue, Value::NoValue)
        );
    }
    if typed {
        kind.compare(expected, actual) == Ordering::Equal
    } else {
        expected.to_text() == actual.to_text()
    }
}

/// Compare two tables, collecting every difference.
///
/// # Errors
///
/// Structural problems (mismatched column sets, unreadable cells, a
/// forward-only side) fail with an error; data differences are returned in
/// the [`TableDiff`].
pub fn diff_tables(
    expected: &dyn Table,
    actual: &dyn Table,
    options: &CompareOptions,
) -> Result<TableDiff> {
    let table_name = expected.metadata().table_name().to_string();
    let columns = compare_columns(expected, actual, options)?;

    let expected_rows = expected.row_count()?;
    let actual_rows = actual.row_count()?;
    let mut diff = TableDiff::new(&table_name, expected_rows, actual_rows);
    if expected_rows != actual_rows {
        debug!(
            table = %table_name,
            expected = expected_rows,
            actual = actual_rows,
            "row count mismatch"
        );
        return Ok(diff);
    }

    let strategy = if options.typed {
        SortStrategy::Typed
    } else {
        SortStrategy::Lexical
    };
    let (expected_order, actual_order) = if options.sort_rows {
        let keys = sort_columns(expected, &columns);
        (
            sort_permutation(expected, &keys, strategy)?,
            sort_permutation(actual, &keys, strategy)?,
        )
    } else {
        ((0..expected_rows).collect(), (0..actual_rows).collect())
    };

    let kinds: Vec<DataKind> = columns
        .iter()
        .map(|c| expected.metadata().column(c).map(|col| col.kind()))
        .collect::<Result<_>>()?;

    for row in 0..expected_rows {
        for (column, kind) in columns.iter().zip(&kinds) {
            let expected_value = expected.value(expected_order[row], column)?;
            if expected_value.is_no_value() {
                // cell not specified by the fixture
                continue;
            }
            let actual_value = actual.value(actual_order[row], column)?;
            if !cells_equal(*kind, &expected_value, &actual_value, options.typed) {
                diff.differences.push(Difference {
                    table: table_name.clone(),
                    column: column.clone(),
                    row,
                    expected: expected_value,
                    actual: actual_value,
                });
            }
        }
    }

    Ok(diff)
}

/// Compare two datasets table by table.
///
/// Table names are matched case-insensitively and order-insensitively;
/// names present on only one side are recorded in the diff. Ambiguous names
/// fail with the ambiguity error.
pub fn diff_datasets(
    expected: &dyn DataSet,
    actual: &dyn DataSet,
    options: &CompareOptions,
) -> Result<DataSetDiff> {
    let mut diff = DataSetDiff::new();

    for name in expected.table_names() {
        match actual.table(name) {
            Ok(actual_table) => {
                let expected_table = expected.table(name)?;
                diff.add_table(diff_tables(expected_table, actual_table, options)?);
            }
            Err(FixtureError::TableNotFound(_)) => diff.missing_tables.push(name.to_string()),
            Err(e) => return Err(e),
        }
    }

    for name in actual.table_names() {
        match expected.table(name) {
            Ok(_) => {}
            Err(FixtureError::TableNotFound(_)) => {
                diff.unexpected_tables.push(name.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(diff)
}

/// Assert two tables are equal, failing with a formatted report.
pub fn assert_tables_eq(
    expected: &dyn Table,
    actual: &dyn Table,
    options: &CompareOptions,
) -> Result<()> {
    let diff = diff_tables(expected, actual, options)?;
    if diff.has_differences() {
        return Err(FixtureError::Comparison(diff.summary()));
    }
    Ok(())
}

/// Assert two datasets are equal, failing with a formatted report.
pub fn assert_datasets_eq(
    expected: &dyn DataSet,
    actual: &dyn DataSet,
    options: &CompareOptions,
) -> Result<()> {
    let diff = diff_datasets(expected, actual, options)?;
    if diff.has_differences() {
        return Err(FixtureError::Comparison(diff.summary()));
    }
    Ok(())
}
