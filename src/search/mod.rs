pub mod engine;
pub mod filter;
pub mod types;

pub use engine::PropertySearch;
pub use filter::filter_and_sort;
pub use types::{SearchField, SearchParams, SortBy};
