use std::{fmt, time::Duration};

use async_trait::async_trait;
use marquee_model::Movie;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use super::{
    MovieProvider, ProviderError,
    tmdb_discover::{DiscoverMovieItem, DiscoverMovieQuery, DiscoverPage},
};

pub const TMDB_V3_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 50;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DISCOVER_SORT: &str = "popularity.desc";

/// Connection settings for [`TmdbDiscoverProvider`].
#[derive(Clone)]
pub struct TmdbSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    /// Skips obscure titles with almost no votes.
    pub min_vote_count: u32,
    pub timeout: Duration,
}

impl fmt::Debug for TmdbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("min_vote_count", &self.min_vote_count)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: TMDB_V3_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            min_vote_count: DEFAULT_MIN_VOTE_COUNT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Pulls popularity-ordered pages from TMDB's `/discover/movie`.
pub struct TmdbDiscoverProvider {
    http: reqwest::Client,
    discover_url: Url,
    api_key: Option<String>,
    language: String,
    min_vote_count: u32,
}

impl fmt::Debug for TmdbDiscoverProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbDiscoverProvider")
            .field("discover_url", &self.discover_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbDiscoverProvider {
    pub fn new(settings: TmdbSettings) -> Result<Self, ProviderError> {
        let base = settings.base_url.trim_end_matches('/');
        let discover_url = Url::parse(&format!("{base}/discover/movie"))?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        let api_key = settings.api_key.filter(|key| !key.trim().is_empty());

        Ok(Self {
            http,
            discover_url,
            api_key,
            language: settings.language,
            min_vote_count: settings.min_vote_count,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_tmdb_json<Q, T>(
        &self,
        url: Url,
        query: &Q,
    ) -> Result<T, ProviderError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice::<T>(&body)
                .map_err(|err| ProviderError::Decode(err.to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "TMDB request failed");

        Err(ProviderError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn discover_movies(
        &self,
        page: u32,
    ) -> Result<DiscoverPage<DiscoverMovieItem>, ProviderError> {
        let api_key =
            self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let query = DiscoverMovieQuery {
            api_key,
            language: &self.language,
            sort_by: DISCOVER_SORT,
            page,
            min_vote_count: self.min_vote_count,
        };

        self.get_tmdb_json(self.discover_url.clone(), &query).await
    }
}

#[async_trait]
impl MovieProvider for TmdbDiscoverProvider {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Movie>, ProviderError> {
        let discovered = self.discover_movies(page).await?;
        debug!(
            page,
            results = discovered.results.len(),
            total_pages = discovered.total_pages,
            "fetched TMDB discover page"
        );

        Ok(discovered
            .results
            .into_iter()
            .map(DiscoverMovieItem::into_movie)
            .collect())
    }
}
