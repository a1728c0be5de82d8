#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU32, AtomicUsize, Ordering},
    },
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use axum_test::TestServer;
use marquee_core::{MovieProvider, ProviderError, provider::PageCache};
use marquee_model::Movie;
use marquee_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigLoad, ConfigMetadata, compose_config, sources::EnvConfig,
    },
};

/// In-memory provider serving fixed pages. Unknown pages are empty.
#[derive(Debug, Default)]
pub struct StaticProvider {
    pages: HashMap<u32, Vec<Movie>>,
    calls: AtomicUsize,
    last_page: AtomicU32,
}

impl StaticProvider {
    pub fn with_page(mut self, page: u32, movies: Vec<Movie>) -> Self {
        self.pages.insert(page, movies);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_page(&self) -> u32 {
        self.last_page.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieProvider for StaticProvider {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Movie>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_page.store(page, Ordering::SeqCst);
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

#[derive(Debug)]
pub struct FailingProvider {
    pub status: u16,
    pub message: String,
}

#[async_trait]
impl MovieProvider for FailingProvider {
    async fn fetch_page(
        &self,
        _page: u32,
    ) -> Result<Vec<Movie>, ProviderError> {
        Err(ProviderError::Upstream {
            status: self.status,
            message: self.message.clone(),
        })
    }
}

pub fn test_config() -> Config {
    let ConfigLoad { config, .. } = compose_config(
        None,
        EnvConfig {
            tmdb_api_key: Some("test-key".to_string()),
            ..EnvConfig::default()
        },
        ConfigMetadata::default(),
    );
    config
}

pub fn build_test_server(
    provider: Arc<dyn MovieProvider>,
) -> Result<TestServer> {
    let cache = Arc::new(PageCache::new(8, Duration::from_secs(60)));
    let state = AppState::with_provider(test_config(), provider, cache);
    TestServer::new(create_app(state))
}

pub fn movie(
    id: u64,
    title: &str,
    release_date: &str,
    language: &str,
    rating: Option<f64>,
    genre_ids: &[u32],
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_date: Some(release_date.to_string()),
        original_language: language.to_string(),
        vote_average: rating,
        vote_count: 100,
        popularity: Some(10.0 + id as f64),
        genre_ids: genre_ids.to_vec(),
        ..Movie::default()
    }
}

/// A small mixed page: two 2023 Action titles, one 2022 Action title,
/// a French drama and an unrated comedy.
pub fn sample_page() -> Vec<Movie> {
    vec![
        movie(1, "Alpha", "2023-05-01", "en", Some(7.0), &[28, 12]),
        movie(2, "bravo", "2022-03-10", "en", Some(8.5), &[28]),
        movie(3, "Charlie", "2023-11-20", "fr", Some(6.0), &[18]),
        movie(4, "Delta", "2023-01-15", "en", Some(9.0), &[28]),
        movie(5, "Echo", "2021-07-04", "en", None, &[35]),
    ]
}
