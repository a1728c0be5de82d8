use std::{fmt, path::PathBuf, time::Duration};

use marquee_core::provider::TmdbSettings;

#[derive(Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tmdb: TmdbConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("tmdb", &self.tmdb)
            .field("cache", &self.cache)
            .field("cors", &self.cors)
            .field("dev_mode", &self.dev_mode)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub min_vote_count: u32,
    pub timeout: Duration,
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("min_vote_count", &self.min_vote_count)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TmdbConfig {
    pub fn provider_settings(&self) -> TmdbSettings {
        TmdbSettings {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            language: self.language.clone(),
            min_vote_count: self.min_vote_count,
            timeout: self.timeout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
