//! The decorator chain.
//!
//! Each decorator wraps an `Arc<dyn Table>` and reinterprets its rows,
//! columns, or order without mutating the source. Decorators compose by
//! plain wrapper chaining: a sorted view of a column-filtered view is just
//! `SortedTable::new(Arc::new(ColumnFilterTable::new(...)?))`.

pub mod case_insensitive;
pub mod column_filter;
pub mod composite;
pub mod forward_only;
pub mod replacement;
pub mod row_filter;
pub mod sorted;

pub use case_insensitive::CaseInsensitiveTable;
pub use column_filter::{ColumnFilter, ColumnFilterTable, PatternColumnFilter};
pub use composite::CompositeTable;
pub use forward_only::ForwardOnlyTable;
pub use replacement::ReplacementTable;
pub use row_filter::{PkFilterTable, RowFilter, RowFilterTable, RowView};
pub use sorted::{sort_permutation, SortStrategy, SortedTable};
