//! Dataset concatenation.

use std::sync::Arc;

use crate::core::{DataSet, Table};
use crate::decorate::CompositeTable;
use crate::error::Result;

/// A dataset concatenating the tables of several datasets, in order.
///
/// With [`combine_tables`](Self::combining_tables) enabled, tables sharing a
/// name (case-insensitive) are merged into a single [`CompositeTable`]; the
/// first occurrence's metadata and position win. Otherwise duplicates are
/// kept side by side and by-name lookup reports them as ambiguous.
pub struct CompositeDataSet {
    tables: Vec<Arc<dyn Table>>,
}

impl CompositeDataSet {
    /// Concatenate datasets, keeping duplicate names side by side.
    pub fn new(datasets: &[&dyn DataSet]) -> Self {
        let mut tables = Vec::new();
        for dataset in datasets {
            tables.extend(dataset.iter().cloned());
        }
        Self { tables }
    }

    /// Concatenate datasets, merging same-named tables into composite
    /// tables.
    pub fn combining_tables(datasets: &[&dyn DataSet]) -> Result<Self> {
        let mut groups: Vec<(String, Vec<Arc<dyn Table>>)> = Vec::new();
        for dataset in datasets {
            for table in dataset.iter() {
                let name = table.metadata().table_name();
                match groups
                    .iter_mut()
                    .find(|(n, _)| n.eq_ignore_ascii_case(name))
                {
                    Some((_, members)) => members.push(table.clone()),
                    None => groups.push((name.to_string(), vec![table.clone()])),
                }
            }
        }

        let mut tables: Vec<Arc<dyn Table>> = Vec::with_capacity(groups.len());
        for (_, mut members) in groups {
            if members.len() == 1 {
                tables.push(members.remove(0));
            } else {
                tables.push(Arc::new(CompositeTable::from_tables(members)?));
            }
        }
        Ok(Self { tables })
    }
}

impl DataSet for CompositeDataSet {
    fn tables(&self) -> &[Arc<dyn Table>] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataKind, TableMetadata, Value};
    use crate::dataset::default::{DefaultDataSet, DefaultTable};
    use crate::error::FixtureError;

    fn one_row_table(table_name: &str, id: i32) -> DefaultTable {
        let meta =
            TableMetadata::new(table_name, vec![Column::new("id", DataKind::Integer)]).unwrap();
        DefaultTable::new(meta)
            .with_row(vec![Value::I32(id)])
            .unwrap()
    }

    #[test]
    fn test_concatenation_keeps_duplicates() {
        let a = DefaultDataSet::new().with_table(one_row_table("users", 1));
        let b = DefaultDataSet::new()
            .with_table(one_row_table("users", 2))
            .with_table(one_row_table("orders", 3));

        let combined = CompositeDataSet::new(&[&a, &b]);
        assert_eq!(combined.table_names(), vec!["users", "users", "orders"]);
        assert!(matches!(
            combined.table("users").unwrap_err(),
            FixtureError::AmbiguousTable { .. }
        ));
    }

    #[test]
    fn test_combining_merges_same_named_tables() {
        let a = DefaultDataSet::new().with_table(one_row_table("users", 1));
        let b = DefaultDataSet::new()
            .with_table(one_row_table("USERS", 2))
            .with_table(one_row_table("orders", 3));

        let combined = CompositeDataSet::combining_tables(&[&a, &b]).unwrap();
        assert_eq!(combined.table_names(), vec!["users", "orders"]);

        let users = combined.table("users").unwrap();
        assert_eq!(users.row_count().unwrap(), 2);
        assert_eq!(users.value(0, "id").unwrap(), Value::I32(1));
        assert_eq!(users.value(1, "id").unwrap(), Value::I32(2));
    }
}
