//! Foreign-key dependency ordering.
//!
//! Given a set of table names and a source of foreign-key relationship data,
//! produce an ordering where every table appears after the tables it
//! references. That is the order data must be populated in, and its reverse
//! is valid deletion order. Cyclic relationship data is rejected before any
//! ordering is produced.

pub mod filter;
pub mod graph;
pub mod sort;

pub use filter::DependencyOrderFilter;
pub use graph::{DependencyGraph, DependencyInfo, ForeignKeyRelation};
pub use sort::sort_by_dependencies;
