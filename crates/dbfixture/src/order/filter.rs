//! Dataset filter applying dependency order.

use std::sync::Arc;

use crate::core::{DataSet, Table};
use crate::dataset::{SequenceTableFilter, TableFilter};
use crate::error::Result;

use super::graph::DependencyInfo;
use super::sort::sort_by_dependencies;

/// A [`TableFilter`] that presents a dataset's tables in foreign-key
/// dependency order.
///
/// The order is computed once, at construction; applying the filter yields
/// tables in population order, and [`reversed_names`](Self::reversed_names)
/// gives deletion order.
pub struct DependencyOrderFilter {
    sequence: SequenceTableFilter,
}

impl DependencyOrderFilter {
    /// Order the given table names by their dependencies.
    pub fn new(info: &dyn DependencyInfo, tables: &[String]) -> Result<Self> {
        let ordered = sort_by_dependencies(info, tables)?;
        Ok(Self {
            sequence: SequenceTableFilter::new(ordered),
        })
    }

    /// Order all tables of `dataset` by their dependencies.
    pub fn from_dataset(info: &dyn DependencyInfo, dataset: &dyn DataSet) -> Result<Self> {
        let names: Vec<String> = dataset
            .table_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self::new(info, &names)
    }

    /// Table names in population order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        self.sequence.names()
    }

    /// Table names in deletion order (children before parents).
    #[must_use]
    pub fn reversed_names(&self) -> Vec<String> {
        self.sequence.names().iter().rev().cloned().collect()
    }
}

impl TableFilter for DependencyOrderFilter {
    fn accept(&self, table_name: &str) -> bool {
        self.sequence.accept(table_name)
    }

    fn apply(&self, dataset: &dyn DataSet) -> Result<Vec<Arc<dyn Table>>> {
        self.sequence.apply(dataset)
    }
}
