use std::{fmt, sync::Arc};

use marquee_core::{
    MovieProvider, ProviderError, QueryPipeline,
    provider::{CachedProvider, PageCache, TmdbDiscoverProvider},
};
use tracing::info;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
    pub page_cache: Arc<PageCache>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the TMDB provider behind a page cache sized from `config`.
    pub fn from_config(config: Config) -> Result<Self, ProviderError> {
        let tmdb = TmdbDiscoverProvider::new(config.tmdb.provider_settings())?;
        if !tmdb.has_api_key() {
            info!("starting without a TMDB API key");
        }

        let page_cache =
            Arc::new(PageCache::new(config.cache.capacity, config.cache.ttl));
        let provider = CachedProvider::new(tmdb, Arc::clone(&page_cache));

        Ok(Self::with_provider(config, Arc::new(provider), page_cache))
    }

    pub fn with_provider(
        config: Config,
        provider: Arc<dyn MovieProvider>,
        page_cache: Arc<PageCache>,
    ) -> Self {
        Self {
            pipeline: Arc::new(QueryPipeline::new(provider)),
            page_cache,
            config: Arc::new(config),
        }
    }
}
