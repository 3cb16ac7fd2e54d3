//! Column-name case folding.

use std::sync::Arc;

use crate::core::{Table, TableMetadata, Value};
use crate::error::Result;

/// A pass-through decorator resolving requested column names
/// case-insensitively against the source metadata and delegating with the
/// canonical spelling.
///
/// The built-in tables already fold case; this wrapper exists for external
/// [`Table`] implementations whose own lookup is case-sensitive.
pub struct CaseInsensitiveTable {
    source: Arc<dyn Table>,
}

impl CaseInsensitiveTable {
    /// Wrap `source`.
    pub fn new(source: Arc<dyn Table>) -> Self {
        Self { source }
    }
}

impl Table for CaseInsensitiveTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        self.source.row_count()
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let canonical = self.source.metadata().column(column)?.name().to_string();
        self.source.value(row, &canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataKind};
    use crate::dataset::DefaultTable;
    use crate::error::FixtureError;

    /// A table whose own column lookup is case-sensitive.
    struct StrictTable {
        inner: DefaultTable,
    }

    impl Table for StrictTable {
        fn metadata(&self) -> &TableMetadata {
            self.inner.metadata()
        }

        fn row_count(&self) -> Result<usize> {
            self.inner.row_count()
        }

        fn value(&self, row: usize, column: &str) -> Result<Value> {
            if !self
                .metadata()
                .columns()
                .iter()
                .any(|c| c.name() == column)
            {
                return Err(FixtureError::column_not_found(
                    self.metadata().table_name(),
                    column,
                ));
            }
            self.inner.value(row, column)
        }
    }

    #[test]
    fn test_case_folding_against_strict_source() {
        let meta =
            TableMetadata::new("t", vec![Column::new("CustomerId", DataKind::Integer)]).unwrap();
        let inner = DefaultTable::new(meta).with_row(vec![Value::I32(7)]).unwrap();
        let strict = StrictTable { inner };

        assert!(strict.value(0, "customerid").is_err());

        let folded = CaseInsensitiveTable::new(Arc::new(strict));
        assert_eq!(folded.value(0, "customerid").unwrap(), Value::I32(7));
        assert_eq!(folded.value(0, "CUSTOMERID").unwrap(), Value::I32(7));
    }
}
