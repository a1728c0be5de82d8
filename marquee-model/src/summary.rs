use crate::movie::{MovieView, TopRatedMovie};

/// Per-genre statistics inside a [`MoviesSummary`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenreSummary {
    pub genre_id: u32,
    pub genre_name: String,
    /// Every movie tagged with the genre, rated or not.
    pub count: usize,
    /// Mean over the rated movies in the genre, two decimals; `0.0` when none
    /// are rated.
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoviesSummary {
    pub total_movies: usize,
    pub overall_avg_rating: f64,
    pub genres: Vec<GenreSummary>,
    pub top_rated: Vec<TopRatedMovie>,
}

impl MoviesSummary {
    pub fn empty() -> Self {
        Self {
            total_movies: 0,
            overall_avg_rating: 0.0,
            genres: Vec::new(),
            top_rated: Vec::new(),
        }
    }
}

/// One locally paginated slice of an upstream page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MovieListing {
    pub page: u32,
    pub limit: u32,
    /// Movies left after filtering, counted before the `limit` slice.
    pub total_items: usize,
    pub results: Vec<MovieView>,
}
