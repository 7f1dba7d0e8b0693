pub mod collection;
pub mod field;
pub mod predicate;
pub mod state;

pub use collection::{FilterableCollection, ResultSummary};
pub use field::FilterField;
pub use predicate::Filterable;
pub use state::{FilterCriteria, FilterState};
