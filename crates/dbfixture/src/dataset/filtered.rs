//! Dataset-level filtering.
//!
//! A [`TableFilter`] decides membership (and possibly order) of tables in a
//! filtered view of a dataset. [`FilteredDataSet`] materializes the filtered
//! table list once, at construction, so lookup and iteration afterwards are
//! plain slice operations.

use std::sync::Arc;

use tracing::debug;

use crate::core::{find_table, DataSet, Table};
use crate::error::{FixtureError, Result};

/// Predicate over table names, plus the ability to produce the filtered
/// table list from an underlying dataset.
pub trait TableFilter {
    /// Whether a table with this name is part of the filtered view.
    fn accept(&self, table_name: &str) -> bool;

    /// Produce the filtered table list, preserving the dataset's order.
    ///
    /// Filters that impose their own order (like [`SequenceTableFilter`])
    /// override this.
    fn apply(&self, dataset: &dyn DataSet) -> Result<Vec<Arc<dyn Table>>> {
        Ok(dataset
            .iter()
            .filter(|t| self.accept(t.metadata().table_name()))
            .cloned()
            .collect())
    }
}

/// Adapter turning a name predicate into a [`TableFilter`].
pub struct NamePredicate<F>(pub F);

impl<F> TableFilter for NamePredicate<F>
where
    F: Fn(&str) -> bool,
{
    fn accept(&self, table_name: &str) -> bool {
        (self.0)(table_name)
    }
}

/// A filter that fixes the output *order*, not just membership.
///
/// Each requested name is resolved through the dataset's by-name lookup, so
/// a name matching more than one underlying table fails fast with the
/// ambiguity error. In strict mode (the default) a name matching no table
/// fails with the not-found error; in lenient mode it is skipped.
#[derive(Debug, Clone)]
pub struct SequenceTableFilter {
    names: Vec<String>,
    strict: bool,
}

impl SequenceTableFilter {
    /// Create a strict sequence filter.
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            strict: true,
        }
    }

    /// Lenient resolution: requested names missing from the dataset are
    /// skipped instead of failing.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// The requested name sequence.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl TableFilter for SequenceTableFilter {
    fn accept(&self, table_name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(table_name))
    }

    fn apply(&self, dataset: &dyn DataSet) -> Result<Vec<Arc<dyn Table>>> {
        let mut out = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match find_table(dataset.tables(), name) {
                Ok(table) => out.push(table.clone()),
                Err(FixtureError::TableNotFound(_)) if !self.strict => {
                    debug!(table = %name, "skipping table absent from dataset");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }
}

/// A dataset exposing the subset (and order) a filter selects.
#[derive(Debug)]
pub struct FilteredDataSet {
    tables: Vec<Arc<dyn Table>>,
}

impl FilteredDataSet {
    /// Apply `filter` to `dataset`.
    pub fn new(filter: &dyn TableFilter, dataset: &dyn DataSet) -> Result<Self> {
        Ok(Self {
            tables: filter.apply(dataset)?,
        })
    }
}

impl DataSet for FilteredDataSet {
    fn tables(&self) -> &[Arc<dyn Table>] {
        &self.tables
    }
}
