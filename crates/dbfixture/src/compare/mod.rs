//! Structural comparison of tables and datasets.

pub mod engine;
pub mod types;

pub use engine::{
    assert_datasets_eq, assert_tables_eq, diff_datasets, diff_tables, CompareOptions,
};
pub use types::{DataSetDiff, Difference, TableDiff};
