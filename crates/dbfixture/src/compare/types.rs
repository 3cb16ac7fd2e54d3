//! Result types for table and dataset comparison.

use serde::{Deserialize, Serialize};

use crate::core::Value;

/// One cell that differs between the expected and actual tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    /// Table name (from the expected side).
    pub table: String,
    /// Column name.
    pub column: String,
    /// Row index in the compared (possibly sorted) row order.
    pub row: usize,
    /// Expected cell value.
    pub expected: Value,
    /// Actual cell value.
    pub actual: Value,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}].{}: expected {}, got {}",
            self.table,
            self.row,
            self.column,
            self.expected.to_text(),
            self.actual.to_text()
        )
    }
}

/// Comparison result for one table pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDiff {
    /// Table name (from the expected side).
    pub table_name: String,
    /// Row count on the expected side.
    pub expected_rows: usize,
    /// Row count on the actual side.
    pub actual_rows: usize,
    /// Cell-level differences. Empty when the row counts differ, since a
    /// count mismatch short-circuits cell comparison.
    pub differences: Vec<Difference>,
}

impl TableDiff {
    /// Create an empty diff for a table pair.
    pub fn new(table_name: impl Into<String>, expected_rows: usize, actual_rows: usize) -> Self {
        Self {
            table_name: table_name.into(),
            expected_rows,
            actual_rows,
            differences: Vec::new(),
        }
    }

    /// Whether the row counts match.
    #[must_use]
    pub fn row_counts_match(&self) -> bool {
        self.expected_rows == self.actual_rows
    }

    /// Whether anything differs.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        !self.row_counts_match() || !self.differences.is_empty()
    }

    /// Human-readable report.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if !self.row_counts_match() {
            out.push_str(&format!(
                "table '{}': expected {} rows, got {}",
                self.table_name, self.expected_rows, self.actual_rows
            ));
        }
        for diff in &self.differences {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&diff.to_string());
        }
        out
    }
}

/// Comparison result for a dataset pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSetDiff {
    /// Per-table results, for tables present on both sides.
    pub tables: Vec<TableDiff>,
    /// Table names present in the expected dataset only.
    pub missing_tables: Vec<String>,
    /// Table names present in the actual dataset only.
    pub unexpected_tables: Vec<String>,
}

impl DataSetDiff {
    /// Create an empty dataset diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table result.
    pub fn add_table(&mut self, diff: TableDiff) {
        self.tables.push(diff);
    }

    /// Whether anything differs.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        !self.missing_tables.is_empty()
            || !self.unexpected_tables.is_empty()
            || self.tables.iter().any(TableDiff::has_differences)
    }

    /// Number of tables with differences.
    #[must_use]
    pub fn tables_with_differences(&self) -> usize {
        self.tables.iter().filter(|t| t.has_differences()).count()
    }

    /// Human-readable report.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_tables.is_empty() {
            parts.push(format!("missing tables: {}", self.missing_tables.join(", ")));
        }
        if !self.unexpected_tables.is_empty() {
            parts.push(format!(
                "unexpected tables: {}",
                self.unexpected_tables.join(", ")
            ));
        }
        for table in &self.tables {
            if table.has_differences() {
                parts.push(table.summary());
            }
        }
        parts.join("\n")
    }
}
