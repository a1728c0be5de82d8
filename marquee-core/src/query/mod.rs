pub mod filter;
pub mod sort;
pub mod summary;

pub use filter::{FilterSpec, filter_movies};
pub use sort::{
    SortField, SortOrder, SortSpec, compare_movies, sort_movies, sort_movies_by,
};
pub use summary::{DEFAULT_TOP_N, round2, summarize, top_rated};
