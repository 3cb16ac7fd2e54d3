//! Concrete datasets: in-memory storage, filtered views, concatenation.

pub mod composite;
pub mod default;
pub mod filtered;

pub use composite::CompositeDataSet;
pub use default::{DefaultDataSet, DefaultTable};
pub use filtered::{FilteredDataSet, NamePredicate, SequenceTableFilter, TableFilter};
