//! Column projection.
//!
//! [`ColumnFilterTable`] exposes only the columns a [`ColumnFilter`]
//! accepts. The filter runs once, at construction, to build the filtered
//! metadata (columns and primary keys both); cell lookups delegate to the
//! source by column name unchanged, so rejected columns cost nothing at read
//! time.

use std::sync::Arc;

use crate::core::{Column, Table, TableMetadata, Value};
use crate::error::Result;

/// Column-acceptance predicate.
pub trait ColumnFilter {
    /// Whether `column` of table `table_name` survives the projection.
    fn accept(&self, table_name: &str, column: &Column) -> bool;
}

/// Include/exclude glob-pattern filter.
///
/// A column is accepted iff the include set is empty or the column matches
/// an include pattern, AND the column matches no exclude pattern. Patterns
/// support `*` (any run of characters, consecutive `*` collapse) and `?`
/// (exactly one character) and match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PatternColumnFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PatternColumnFilter {
    /// Create a filter that accepts every column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.include.push(pattern.into().to_lowercase());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.exclude.push(pattern.into().to_lowercase());
        self
    }

    /// Builder-style [`include`](Self::include).
    #[must_use]
    pub fn including(mut self, pattern: impl Into<String>) -> Self {
        self.include(pattern);
        self
    }

    /// Builder-style [`exclude`](Self::exclude).
    #[must_use]
    pub fn excluding(mut self, pattern: impl Into<String>) -> Self {
        self.exclude(pattern);
        self
    }
}

impl ColumnFilter for PatternColumnFilter {
    fn accept(&self, _table_name: &str, column: &Column) -> bool {
        let name = column.name().to_lowercase();
        let included =
            self.include.is_empty() || self.include.iter().any(|p| wildcard_match(p, &name));
        included && !self.exclude.iter().any(|p| wildcard_match(p, &name))
    }
}

/// Greedy shell-glob matcher with backtracking.
///
/// Both inputs are expected pre-lowercased by the caller.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let mut pi = 0;
    let mut ti = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// A table exposing only the columns a filter accepts.
///
/// Cell values of surviving columns are unchanged; surviving primary-key
/// columns keep their key order.
pub struct ColumnFilterTable {
    source: Arc<dyn Table>,
    metadata: TableMetadata,
}

impl ColumnFilterTable {
    /// Project `source` through `filter`.
    pub fn new(source: Arc<dyn Table>, filter: &dyn ColumnFilter) -> Result<Self> {
        let source_meta = source.metadata();
        let table_name = source_meta.table_name();

        let columns: Vec<Column> = source_meta
            .columns()
            .iter()
            .filter(|c| filter.accept(table_name, c))
            .cloned()
            .collect();
        let pk_names: Vec<&str> = source_meta
            .primary_keys()
            .iter()
            .filter(|c| filter.accept(table_name, c))
            .map(Column::name)
            .collect();

        let metadata = TableMetadata::with_primary_keys(table_name, columns, &pk_names)?;
        Ok(Self { source, metadata })
    }
}

impl Table for ColumnFilterTable {
    fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    fn row_count(&self) -> Result<usize> {
        self.source.row_count()
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        // resolves against the *filtered* metadata first, so rejected
        // columns fail with column-not-found even though the source still
        // has them
        self.metadata.column_index(column)?;
        self.source.value(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataKind, Nullability};
    use crate::dataset::DefaultTable;
    use crate::error::FixtureError;

    fn make_table() -> Arc<dyn Table> {
        let meta = TableMetadata::with_primary_keys(
            "accounts",
            vec![
                Column::new("id", DataKind::Integer).with_nullable(Nullability::NoNulls),
                Column::new("owner_name", DataKind::Text),
                Column::new("owner_email", DataKind::Text),
                Column::new("balance", DataKind::Decimal),
            ],
            &["id"],
        )
        .unwrap();
        let table = DefaultTable::new(meta)
            .with_row(vec![
                Value::I32(1),
                Value::Text("alice".to_string()),
                Value::Text("alice@example.com".to_string()),
                Value::Decimal(rust_decimal::Decimal::from(100)),
            ])
            .unwrap();
        Arc::new(table)
    }

    #[test]
    fn test_wildcard_matching() {
        assert!(wildcard_match("owner_*", "owner_name"));
        assert!(wildcard_match("*_email", "owner_email"));
        assert!(wildcard_match("??", "id"));
        assert!(!wildcard_match("?", "id"));
        assert!(wildcard_match("**name", "owner_name"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("owner_*", "balance"));
        assert!(wildcard_match("a*c*e", "abcde"));
    }

    #[test]
    fn test_projection_is_intersective() {
        let filter = PatternColumnFilter::new().excluding("owner_*");
        let table = ColumnFilterTable::new(make_table(), &filter).unwrap();

        assert_eq!(table.metadata().column_names(), vec!["id", "balance"]);
        assert_eq!(table.value(0, "id").unwrap(), Value::I32(1));
        assert_eq!(table.row_count().unwrap(), 1);
    }

    #[test]
    fn test_include_and_exclude_compose() {
        let filter = PatternColumnFilter::new()
            .including("owner_*")
            .excluding("*_email");
        let table = ColumnFilterTable::new(make_table(), &filter).unwrap();
        assert_eq!(table.metadata().column_names(), vec!["owner_name"]);
    }

    #[test]
    fn test_rejected_column_not_reachable() {
        let filter = PatternColumnFilter::new().excluding("balance");
        let table = ColumnFilterTable::new(make_table(), &filter).unwrap();
        let err = table.value(0, "balance").unwrap_err();
        assert!(matches!(err, FixtureError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_primary_key_filtered_too() {
        let filter = PatternColumnFilter::new().excluding("id");
        let table = ColumnFilterTable::new(make_table(), &filter).unwrap();
        assert!(table.metadata().primary_keys().is_empty());
    }

    #[test]
    fn test_case_insensitive_patterns() {
        let filter = PatternColumnFilter::new().including("ID");
        let table = ColumnFilterTable::new(make_table(), &filter).unwrap();
        assert_eq!(table.metadata().column_names(), vec!["id"]);
    }
}
