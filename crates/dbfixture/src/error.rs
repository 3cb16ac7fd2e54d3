//! Error types for the fixture library.

use thiserror::Error;

/// Main error type for dataset and table operations.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// No table with the given name exists in the dataset.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// More than one table matched a by-name lookup.
    #[error("ambiguous table name '{name}': {matches} tables match")]
    AmbiguousTable { name: String, matches: usize },

    /// No column with the given name exists in the table metadata.
    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Row index outside the table's row space.
    #[error("row {row} out of bounds for table '{table}' ({row_count} rows)")]
    RowOutOfBounds {
        table: String,
        row: usize,
        row_count: usize,
    },

    /// Table has no primary key where one is required.
    #[error("table {0} has no primary key - primary-key filtering requires one")]
    NoPrimaryKey(String),

    /// The foreign-key dependency graph contains a cycle.
    #[error("cyclic dependency involving table '{table}': cycle overlap {cycle:?}")]
    CyclicDependency { table: String, cycle: Vec<String> },

    /// Programming-contract violation: row count on a forward-only table,
    /// backward iteration, a second pass over a single-pass source, or
    /// reconfiguring a sort comparator after first use.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid configuration value, metadata, or construction argument.
    #[error("configuration error: {0}")]
    Config(String),

    /// Table or dataset comparison failed.
    #[error("comparison failed: {0}")]
    Comparison(String),

    /// Streaming pipeline was cancelled.
    #[error("stream cancelled")]
    Cancelled,

    /// IO error (producer thread spawning).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixtureError {
    /// Create a ColumnNotFound error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        FixtureError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a RowOutOfBounds error.
    pub fn row_out_of_bounds(table: impl Into<String>, row: usize, row_count: usize) -> Self {
        FixtureError::RowOutOfBounds {
            table: table.into(),
            row,
            row_count,
        }
    }

    /// Create an Unsupported error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        FixtureError::Unsupported(message.into())
    }

    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        FixtureError::Config(message.into())
    }
}

/// Result type alias for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
