use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use marquee_model::Movie;
use parking_lot::Mutex;
use tracing::debug;

use super::{MovieProvider, ProviderError};

pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedPage {
    movies: Arc<[Movie]>,
    stored_at: Instant,
}

/// Point-in-time view of a [`PageCache`], reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub ttl: Duration,
}

/// Upstream pages keyed by page number.
///
/// Entries older than `ttl` are dropped on read. When the cache is full the
/// entry stored longest ago is evicted. A capacity of zero disables caching.
/// The lock is never held across an await.
pub struct PageCache {
    capacity: usize,
    ttl: Duration,
    pages: Mutex<HashMap<u32, CachedPage>>,
}

impl fmt::Debug for PageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("entries", &self.pages.lock().len())
            .finish()
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

impl PageCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            pages: Mutex::new(HashMap::with_capacity(capacity.min(1024))),
        }
    }

    pub fn get(&self, page: u32) -> Option<Arc<[Movie]>> {
        self.get_at(page, Instant::now())
    }

    pub fn insert(&self, page: u32, movies: Vec<Movie>) -> Arc<[Movie]> {
        self.insert_at(page, movies, Instant::now())
    }

    pub fn len(&self) -> usize {
        self.pages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.pages.lock().clear();
    }

    pub fn stats(&self) -> PageCacheStats {
        PageCacheStats {
            entries: self.len(),
            capacity: self.capacity,
            ttl: self.ttl,
        }
    }

    fn get_at(&self, page: u32, now: Instant) -> Option<Arc<[Movie]>> {
        let mut pages = self.pages.lock();
        let cached = pages.get(&page)?;

        if now.saturating_duration_since(cached.stored_at) >= self.ttl {
            pages.remove(&page);
            return None;
        }

        Some(Arc::clone(&cached.movies))
    }

    fn insert_at(
        &self,
        page: u32,
        movies: Vec<Movie>,
        now: Instant,
    ) -> Arc<[Movie]> {
        let movies: Arc<[Movie]> = movies.into();
        if self.capacity == 0 {
            return movies;
        }

        let mut pages = self.pages.lock();
        if !pages.contains_key(&page) && pages.len() >= self.capacity {
            let oldest = pages
                .iter()
                .min_by_key(|(_, cached)| cached.stored_at)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                pages.remove(&oldest);
                debug!(
                    evicted_page = oldest,
                    "page cache full, evicted oldest entry"
                );
            }
        }

        pages.insert(
            page,
            CachedPage {
                movies: Arc::clone(&movies),
                stored_at: now,
            },
        );
        movies
    }
}

/// Serves pages from a [`PageCache`] and falls through to `inner` on a miss.
/// Failed fetches are not cached.
pub struct CachedProvider<P> {
    inner: P,
    cache: Arc<PageCache>,
}

impl<P> fmt::Debug for CachedProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedProvider")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<P: MovieProvider> CachedProvider<P> {
    pub fn new(inner: P, cache: Arc<PageCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }
}

#[async_trait]
impl<P: MovieProvider> MovieProvider for CachedProvider<P> {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Movie>, ProviderError> {
        if let Some(movies) = self.cache.get(page) {
            debug!(page, "page cache hit");
            return Ok(movies.to_vec());
        }

        debug!(page, "page cache miss");
        let movies = self.inner.fetch_page(page).await?;
        self.cache.insert(page, movies.clone());
        Ok(movies)
    }
}
