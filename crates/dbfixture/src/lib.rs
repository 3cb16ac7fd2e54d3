//! # dbfixture
//!
//! Dataset fixtures and structural comparison for testing
//! database-dependent code.
//!
//! This library represents tabular datasets (in-memory fixtures or rows
//! streamed from any producer) behind a uniform table abstraction, and
//! compares two datasets for equality. It provides:
//!
//! - **Decorators** for filtering, sorting, case folding, and value
//!   replacement, composing over any [`Table`] without copying data
//! - **Dependency ordering** that sequences tables by foreign-key
//!   relationships, with cycle detection
//! - **Structural diffing** that ignores column order and (optionally) row
//!   order, with type-aware cell comparison
//! - **Streaming** single-pass tables fed from a producer thread through a
//!   bounded channel
//!
//! ## Example
//!
//! ```rust,no_run
//! use dbfixture::{
//!     assert_datasets_eq, Column, CompareOptions, DataKind, DefaultDataSet, DefaultTable,
//!     TableMetadata, Value,
//! };
//!
//! fn main() -> dbfixture::Result<()> {
//!     let meta = TableMetadata::with_primary_keys(
//!         "users",
//!         vec![
//!             Column::new("id", DataKind::Integer),
//!             Column::new("name", DataKind::Text),
//!         ],
//!         &["id"],
//!     )?;
//!
//!     let expected = DefaultDataSet::new().with_table(
//!         DefaultTable::new(meta.clone())
//!             .with_row(vec![Value::I32(1), Value::Text("alice".into())])?,
//!     );
//!     let actual = DefaultDataSet::new().with_table(
//!         DefaultTable::new(meta)
//!             .with_row(vec![Value::I32(1), Value::Text("alice".into())])?,
//!     );
//!
//!     assert_datasets_eq(&expected, &actual, &CompareOptions::default())
//! }
//! ```

pub mod compare;
pub mod config;
pub mod core;
pub mod dataset;
pub mod decorate;
pub mod error;
pub mod order;
pub mod stream;

// Re-exports for convenient access
pub use compare::{
    assert_datasets_eq, assert_tables_eq, diff_datasets, diff_tables, CompareOptions,
    DataSetDiff, Difference, TableDiff,
};
pub use config::{ConfigProperty, FixtureConfig, DEFAULT_STREAM_CAPACITY};
pub use crate::core::{
    AutoIncrement, Column, DataKind, DataSet, KindRegistry, Nullability, Table, TableMetadata,
    Value,
};
pub use dataset::{
    CompositeDataSet, DefaultDataSet, DefaultTable, FilteredDataSet, NamePredicate,
    SequenceTableFilter, TableFilter,
};
pub use decorate::{
    CaseInsensitiveTable, ColumnFilter, ColumnFilterTable, CompositeTable, ForwardOnlyTable,
    PatternColumnFilter, PkFilterTable, ReplacementTable, RowFilter, RowFilterTable, RowView,
    SortStrategy, SortedTable,
};
pub use error::{FixtureError, Result};
pub use order::{
    sort_by_dependencies, DependencyGraph, DependencyInfo, DependencyOrderFilter,
    ForeignKeyRelation,
};
pub use stream::{Row, RowSink, StreamedTable};
