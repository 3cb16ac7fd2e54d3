//! Dependency-consistent table ordering.

use tracing::debug;

use crate::error::Result;

use super::graph::{DependencyGraph, DependencyInfo};

/// Order `tables` so every table appears after all tables it depends on.
///
/// The result is valid data-population order; its reverse is valid deletion
/// order. Fails with [`FixtureError::CyclicDependency`] before producing any
/// ordering if the relationship data contains a cycle.
///
/// # Algorithm
///
/// A relaxation pass, not a single-pass topological sort, so it tolerates an
/// unsorted or partially-sorted input: each full pass walks the current
/// list; a table is inserted immediately before the first of its direct
/// dependents already placed in the output, otherwise appended. Passes
/// repeat until one produces no change. Each pass can only move elements
/// earlier, and with cycles excluded the ordering is a strict partial order
/// over finitely many tables, so the iteration reaches a fixed point.
///
/// [`FixtureError::CyclicDependency`]: crate::error::FixtureError::CyclicDependency
pub fn sort_by_dependencies(info: &dyn DependencyInfo, tables: &[String]) -> Result<Vec<String>> {
    let graph = DependencyGraph::build(info, tables)?;

    let mut order: Vec<String> = tables.to_vec();
    let mut pass = 0usize;
    loop {
        pass += 1;
        let mut next: Vec<String> = Vec::with_capacity(order.len());
        for table in &order {
            let dependents = graph.direct_dependents(table);
            let insert_at = next.iter().position(|placed| {
                dependents.iter().any(|d| d.eq_ignore_ascii_case(placed))
            });
            match insert_at {
                Some(pos) => next.insert(pos, table.clone()),
                None => next.push(table.clone()),
            }
        }
        if next == order {
            debug!(passes = pass, tables = order.len(), "dependency ordering converged");
            return Ok(next);
        }
        order = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixtureError;
    use crate::order::graph::ForeignKeyRelation;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    /// Every table must appear after all of its dependencies.
    fn assert_valid_order(order: &[String], info: &ForeignKeyRelation) {
        use crate::order::graph::DependencyInfo as _;
        for (i, table) in order.iter().enumerate() {
            for dep in info.dependencies(table).unwrap() {
                let dep_pos = order
                    .iter()
                    .position(|t| t.eq_ignore_ascii_case(&dep))
                    .unwrap_or_else(|| panic!("dependency {dep} missing from order"));
                assert!(
                    dep_pos < i,
                    "{table} at {i} precedes its dependency {dep} at {dep_pos}"
                );
            }
        }
    }

    #[test]
    fn test_unordered_input_is_sequenced() {
        let info = ForeignKeyRelation::new()
            .with("orders", "customers")
            .with("order_items", "orders");
        let order =
            sort_by_dependencies(&info, &names(&["orders", "customers", "order_items"]))
                .unwrap();
        assert_eq!(order, names(&["customers", "orders", "order_items"]));

        // reversed order is valid deletion order: children first
        let deletion: Vec<String> = order.iter().rev().cloned().collect();
        assert_eq!(deletion, names(&["order_items", "orders", "customers"]));
    }

    #[test]
    fn test_already_sorted_input_is_stable() {
        let info = ForeignKeyRelation::new()
            .with("orders", "customers")
            .with("order_items", "orders");
        let order =
            sort_by_dependencies(&info, &names(&["customers", "orders", "order_items"]))
                .unwrap();
        assert_eq!(order, names(&["customers", "orders", "order_items"]));
    }

    #[test]
    fn test_independent_tables_keep_relative_order() {
        let info = ForeignKeyRelation::new();
        let order = sort_by_dependencies(&info, &names(&["b", "a", "c"])).unwrap();
        assert_eq!(order, names(&["b", "a", "c"]));
    }

    #[test]
    fn test_diamond_dependency() {
        // d -> b, d -> c, b -> a, c -> a
        let info = ForeignKeyRelation::new()
            .with("d", "b")
            .with("d", "c")
            .with("b", "a")
            .with("c", "a");
        let order = sort_by_dependencies(&info, &names(&["d", "c", "b", "a"])).unwrap();
        assert_valid_order(&order, &info);
    }

    #[test]
    fn test_cycle_aborts_without_partial_order() {
        let info = ForeignKeyRelation::new().with("a", "b").with("b", "a");
        let err = sort_by_dependencies(&info, &names(&["a", "b"])).unwrap_err();
        assert!(matches!(err, FixtureError::CyclicDependency { .. }));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let info = ForeignKeyRelation::new().with("Orders", "CUSTOMERS");
        let order = sort_by_dependencies(&info, &names(&["orders", "customers"])).unwrap();
        assert_eq!(order, names(&["customers", "orders"]));
    }
}
