//! Fetch → filter → sort → (slice | summarize).
//!
//! Each request fetches exactly one upstream page. The listing re-paginates
//! inside that page only: `page` picks the upstream page and the response
//! always carries the first `limit` movies of it.

use std::{fmt, sync::Arc};

use marquee_model::{MovieListing, MovieView, MoviesSummary};
use tracing::debug;

use crate::{
    error::Result,
    provider::MovieProvider,
    query::{DEFAULT_TOP_N, FilterSpec, filter_movies, sort_movies, summarize},
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: None,
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    pub page: u32,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

impl Default for SummaryQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            sort: None,
            filter: None,
        }
    }
}

/// Build the listing for an already-fetched page.
pub fn build_listing(
    movies: &[marquee_model::Movie],
    query: &MovieQuery,
) -> MovieListing {
    let spec = FilterSpec::parse(query.filter.as_deref());
    let filtered = filter_movies(movies, &spec);
    let sorted = sort_movies(&filtered, query.sort.as_deref());

    let total_items = sorted.len();
    let results = sorted
        .into_iter()
        .take(query.limit as usize)
        .map(MovieView::from)
        .collect();

    MovieListing {
        page: query.page,
        limit: query.limit,
        total_items,
        results,
    }
}

/// Build the summary for an already-fetched page.
pub fn build_summary(
    movies: &[marquee_model::Movie],
    query: &SummaryQuery,
) -> MoviesSummary {
    let spec = FilterSpec::parse(query.filter.as_deref());
    let filtered = filter_movies(movies, &spec);
    let sorted = sort_movies(&filtered, query.sort.as_deref());
    summarize(&sorted, DEFAULT_TOP_N)
}

#[derive(Clone)]
pub struct QueryPipeline {
    provider: Arc<dyn MovieProvider>,
}

impl fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPipeline").finish_non_exhaustive()
    }
}

impl QueryPipeline {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self { provider }
    }

    pub async fn list_movies(
        &self,
        query: &MovieQuery,
    ) -> Result<MovieListing> {
        let movies = self.provider.fetch_page(query.page).await?;
        let listing = build_listing(&movies, query);
        debug!(
            page = query.page,
            fetched = movies.len(),
            matched = listing.total_items,
            returned = listing.results.len(),
            "movie listing built"
        );
        Ok(listing)
    }

    pub async fn summarize_movies(
        &self,
        query: &SummaryQuery,
    ) -> Result<MoviesSummary> {
        let movies = self.provider.fetch_page(query.page).await?;
        let summary = build_summary(&movies, query);
        debug!(
            page = query.page,
            fetched = movies.len(),
            matched = summary.total_movies,
            genres = summary.genres.len(),
            "movie summary built"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::QueryError,
        provider::{MockMovieProvider, ProviderError},
    };
    use marquee_model::Movie;

    fn movie(
        id: u64,
        release_date: &str,
        rating: f64,
        genre_ids: &[u32],
    ) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            release_date: Some(release_date.to_string()),
            original_language: "en".to_string(),
            vote_average: Some(rating),
            genre_ids: genre_ids.to_vec(),
            ..Movie::default()
        }
    }

    fn page() -> Vec<Movie> {
        vec![
            movie(1, "2023-01-01", 6.5, &[28]),
            movie(2, "2022-06-01", 8.0, &[18]),
            movie(3, "2023-04-01", 9.1, &[28, 12]),
            movie(4, "2023-09-01", 7.2, &[35]),
        ]
    }

    fn pipeline_for(expected_page: u32) -> QueryPipeline {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_fetch_page()
            .withf(move |page| *page == expected_page)
            .times(1)
            .returning(|_| Ok(page()));
        QueryPipeline::new(Arc::new(provider))
    }

    #[test]
    fn listing_counts_before_slicing() {
        let query = MovieQuery {
            limit: 2,
            sort: Some("rating_desc".to_string()),
            filter: Some("year:2023".to_string()),
            ..MovieQuery::default()
        };
        let listing = build_listing(&page(), &query);

        assert_eq!(listing.total_items, 3);
        let ids: Vec<u64> =
            listing.results.iter().map(|v| v.movie.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(listing.results[0].genres, vec!["Action", "Adventure"]);
    }

    #[test]
    fn listing_without_sort_keeps_upstream_order() {
        let listing = build_listing(&page(), &MovieQuery::default());
        let ids: Vec<u64> =
            listing.results.iter().map(|v| v.movie.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(listing.limit, DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn listing_fetches_requested_page_and_echoes_it() {
        let pipeline = pipeline_for(3);
        let query = MovieQuery {
            page: 3,
            limit: 10,
            ..MovieQuery::default()
        };
        let listing = pipeline.list_movies(&query).await.expect("listing");
        assert_eq!(listing.page, 3);
        assert_eq!(listing.total_items, 4);
        assert_eq!(listing.results.len(), 4);
    }

    #[tokio::test]
    async fn summary_runs_over_filtered_page() {
        let pipeline = pipeline_for(1);
        let query = SummaryQuery {
            filter: Some("genre:action".to_string()),
            ..SummaryQuery::default()
        };
        let summary = pipeline.summarize_movies(&query).await.expect("summary");

        assert_eq!(summary.total_movies, 2);
        assert_eq!(summary.overall_avg_rating, 7.8);
        let top: Vec<u64> = summary.top_rated.iter().map(|m| m.id).collect();
        assert_eq!(top, vec![3, 1]);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_upstream_error() {
        let mut provider = MockMovieProvider::new();
        provider.expect_fetch_page().returning(|_| {
            Err(ProviderError::Upstream {
                status: 401,
                message: "Invalid API key".to_string(),
            })
        });
        let pipeline = QueryPipeline::new(Arc::new(provider));

        let err = pipeline
            .list_movies(&MovieQuery::default())
            .await
            .expect_err("upstream failure");
        assert!(matches!(
            err,
            QueryError::Upstream(ProviderError::Upstream { status: 401, .. })
        ));
        assert_eq!(err.to_string(), "TMDB API error: 401 Invalid API key");
    }
}
