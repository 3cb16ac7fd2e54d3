//! The dataset contract.

use std::sync::Arc;

use crate::error::{FixtureError, Result};

use super::metadata::TableMetadata;
use super::table::Table;

/// An ordered collection of named tables.
///
/// Table order is meaningful: it is the order constraints must be respected
/// in for load/compare operations (parent-before-child for inserts,
/// child-before-parent for deletes).
///
/// Duplicate table names are representable; they are reachable only through
/// iteration. By-name lookup is deliberately defined in terms of the
/// iteration order (not an index), so every implementation inherits the same
/// ambiguity semantics: zero case-insensitive matches fail with
/// [`FixtureError::TableNotFound`], more than one with
/// [`FixtureError::AmbiguousTable`].
pub trait DataSet {
    /// Tables in dataset order.
    fn tables(&self) -> &[Arc<dyn Table>];

    /// Table names in dataset order, duplicates included.
    fn table_names(&self) -> Vec<&str> {
        self.tables()
            .iter()
            .map(|t| t.metadata().table_name())
            .collect()
    }

    /// Number of tables.
    fn table_count(&self) -> usize {
        self.tables().len()
    }

    /// By-name lookup (case-insensitive), with ambiguity detection.
    fn table(&self, name: &str) -> Result<&dyn Table> {
        find_table(self.tables(), name).map(|t| t.as_ref())
    }

    /// Metadata lookup by table name.
    fn metadata(&self, name: &str) -> Result<&TableMetadata> {
        Ok(self.table(name)?.metadata())
    }

    /// Forward iteration over tables.
    fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Table>> {
        self.tables().iter()
    }

    /// Reverse iteration over tables (deletion order for a load-ordered
    /// dataset).
    fn iter_reverse(&self) -> std::iter::Rev<std::slice::Iter<'_, Arc<dyn Table>>> {
        self.tables().iter().rev()
    }
}

/// Scan a table list for a name, enforcing the shared ambiguity semantics.
///
/// Returns the shared handle so callers composing new datasets can keep the
/// table alive without copying it.
pub fn find_table<'a>(tables: &'a [Arc<dyn Table>], name: &str) -> Result<&'a Arc<dyn Table>> {
    let mut found = None;
    let mut matches = 0usize;
    for table in tables {
        if table.metadata().table_name().eq_ignore_ascii_case(name) {
            matches += 1;
            if found.is_none() {
                found = Some(table);
            }
        }
    }
    match (found, matches) {
        (Some(table), 1) => Ok(table),
        (Some(_), n) => Err(FixtureError::AmbiguousTable {
            name: name.to_string(),
            matches: n,
        }),
        (None, _) => Err(FixtureError::TableNotFound(name.to_string())),
    }
}
