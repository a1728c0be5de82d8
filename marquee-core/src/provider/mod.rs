//! Sources of upstream movie pages.
//!
//! The query pipeline only sees [`MovieProvider`]. [`TmdbDiscoverProvider`]
//! talks to TMDB; [`CachedProvider`] wraps any provider with a [`PageCache`].

pub mod cache;
pub mod tmdb_api_provider;
pub mod tmdb_discover;

use async_trait::async_trait;
use marquee_model::Movie;

pub use cache::{CachedProvider, PageCache, PageCacheStats};
pub use tmdb_api_provider::{TmdbDiscoverProvider, TmdbSettings};
pub use tmdb_discover::{DiscoverMovieItem, DiscoverPage};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("TMDB_API_KEY is not configured")]
    MissingApiKey,

    #[error("TMDB API error: {status} {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Parse error: {0}")]
    Decode(String),
}

/// Fetches one upstream page of movies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Movie>, ProviderError>;
}
