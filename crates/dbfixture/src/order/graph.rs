//! Foreign-key dependency graph.
//!
//! The graph is transient: it is rebuilt from scratch for every ordering
//! request, querying the [`DependencyInfo`] source exactly once per table.
//! One build therefore operates on one consistent snapshot of the
//! relationship data; there is no process-wide cache.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::{FixtureError, Result};

/// Source of foreign-key relationship data.
///
/// In production this is typically backed by live connection metadata; tests
/// use [`ForeignKeyRelation`].
pub trait DependencyInfo {
    /// Tables directly referenced by `table`'s foreign keys (its parents).
    fn dependencies(&self, table: &str) -> Result<Vec<String>>;

    /// Tables whose foreign keys reference `table` (its children).
    fn dependents(&self, table: &str) -> Result<Vec<String>>;
}

/// In-memory dependency source built from (child, parent) edges.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyRelation {
    /// (child, parent) pairs: child's foreign key references parent.
    edges: Vec<(String, String)>,
}

impl ForeignKeyRelation {
    /// Create an empty relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `child` has a foreign key referencing `parent`.
    pub fn add(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        self.edges.push((child.into(), parent.into()));
        self
    }

    /// Builder-style [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.add(child, parent);
        self
    }
}

impl DependencyInfo for ForeignKeyRelation {
    fn dependencies(&self, table: &str) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for (child, parent) in &self.edges {
            if child.eq_ignore_ascii_case(table)
                && !out.iter().any(|p| p.eq_ignore_ascii_case(parent))
            {
                out.push(parent.clone());
            }
        }
        Ok(out)
    }

    fn dependents(&self, table: &str) -> Result<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for (child, parent) in &self.edges {
            if parent.eq_ignore_ascii_case(table)
                && !out.iter().any(|c| c.eq_ignore_ascii_case(child))
            {
                out.push(child.clone());
            }
        }
        Ok(out)
    }
}

/// Per-table direct and transitive dependency sets.
///
/// Invariant, enforced at construction: for every table, the transitive
/// depends-on set and the transitive dependent set are disjoint. A
/// non-empty intersection means the table participates in a cycle, which is
/// a hard construction-time failure; no partial graph escapes.
#[derive(Debug)]
pub struct DependencyGraph {
    direct_dependencies: HashMap<String, Vec<String>>,
    direct_dependents: HashMap<String, Vec<String>>,
    transitive_dependencies: HashMap<String, HashSet<String>>,
    transitive_dependents: HashMap<String, HashSet<String>>,
}

impl DependencyGraph {
    /// Build the graph for `tables`, snapshotting `info` once per table.
    ///
    /// Self-references are excluded from the edge sets (a table may
    /// reference itself without creating an ordering constraint).
    pub fn build(info: &dyn DependencyInfo, tables: &[String]) -> Result<Self> {
        let mut direct_dependencies = HashMap::new();
        let mut direct_dependents = HashMap::new();

        for table in tables {
            let deps: Vec<String> = info
                .dependencies(table)?
                .into_iter()
                .filter(|d| !d.eq_ignore_ascii_case(table))
                .collect();
            let dependents: Vec<String> = info
                .dependents(table)?
                .into_iter()
                .filter(|d| !d.eq_ignore_ascii_case(table))
                .collect();
            direct_dependencies.insert(normalize(table), deps);
            direct_dependents.insert(normalize(table), dependents);
        }

        let transitive_dependencies = closure(&direct_dependencies);
        let transitive_dependents = closure(&direct_dependents);

        for table in tables {
            let key = normalize(table);
            let deps = &transitive_dependencies[&key];
            let dependents = &transitive_dependents[&key];
            let mut overlap: Vec<String> =
                deps.intersection(dependents).cloned().collect();
            if !overlap.is_empty() {
                overlap.sort();
                debug!(table = %table, overlap = ?overlap, "cyclic dependency detected");
                return Err(FixtureError::CyclicDependency {
                    table: table.clone(),
                    cycle: overlap,
                });
            }
        }

        Ok(Self {
            direct_dependencies,
            direct_dependents,
            transitive_dependencies,
            transitive_dependents,
        })
    }

    /// Tables directly referenced by `table`'s foreign keys.
    #[must_use]
    pub fn direct_dependencies(&self, table: &str) -> &[String] {
        self.direct_dependencies
            .get(&normalize(table))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tables directly referencing `table`.
    #[must_use]
    pub fn direct_dependents(&self, table: &str) -> &[String] {
        self.direct_dependents
            .get(&normalize(table))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Transitive closure of [`direct_dependencies`](Self::direct_dependencies).
    #[must_use]
    pub fn transitive_dependencies(&self, table: &str) -> Option<&HashSet<String>> {
        self.transitive_dependencies.get(&normalize(table))
    }

    /// Transitive closure of [`direct_dependents`](Self::direct_dependents).
    #[must_use]
    pub fn transitive_dependents(&self, table: &str) -> Option<&HashSet<String>> {
        self.transitive_dependents.get(&normalize(table))
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Breadth-first transitive closure over the direct edge map.
///
/// Edges may point at tables outside the requested set; those appear as
/// closure members but are not expanded further (their own edges were never
/// snapshotted).
fn closure(direct: &HashMap<String, Vec<String>>) -> HashMap<String, HashSet<String>> {
    let mut out = HashMap::with_capacity(direct.len());
    for (table, edges) in direct {
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = edges.iter().map(|e| normalize(e)).collect();
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(more) = direct.get(&next) {
                queue.extend(more.iter().map(|e| normalize(e)));
            }
        }
        out.insert(table.clone(), seen);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_direct_and_transitive_sets() {
        let info = ForeignKeyRelation::new()
            .with("order_items", "orders")
            .with("orders", "customers");
        let graph =
            DependencyGraph::build(&info, &names(&["customers", "orders", "order_items"]))
                .unwrap();

        assert_eq!(graph.direct_dependencies("orders"), &["customers"]);
        assert_eq!(graph.direct_dependents("orders"), &["order_items"]);

        let transitive = graph.transitive_dependencies("order_items").unwrap();
        assert!(transitive.contains("orders"));
        assert!(transitive.contains("customers"));

        let dependents = graph.transitive_dependents("customers").unwrap();
        assert!(dependents.contains("orders"));
        assert!(dependents.contains("order_items"));
    }

    #[test]
    fn test_cycle_is_construction_failure() {
        let info = ForeignKeyRelation::new().with("a", "b").with("b", "a");
        let err = DependencyGraph::build(&info, &names(&["a", "b"])).unwrap_err();
        match err {
            FixtureError::CyclicDependency { table, cycle } => {
                assert_eq!(table, "a");
                assert!(cycle.contains(&"b".to_string()));
            }
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_self_reference_is_not_a_cycle() {
        let info = ForeignKeyRelation::new()
            .with("employees", "employees")
            .with("employees", "departments");
        let graph =
            DependencyGraph::build(&info, &names(&["departments", "employees"])).unwrap();
        assert_eq!(graph.direct_dependencies("employees"), &["departments"]);
    }

    #[test]
    fn test_longer_cycle_detected() {
        let info = ForeignKeyRelation::new()
            .with("a", "b")
            .with("b", "c")
            .with("c", "a");
        let err = DependencyGraph::build(&info, &names(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, FixtureError::CyclicDependency { .. }));
    }
}
