use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use marquee_core::provider::{
    cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL},
    tmdb_api_provider::{
        DEFAULT_LANGUAGE, DEFAULT_MIN_VOTE_COUNT, DEFAULT_TIMEOUT, TMDB_V3_BASE,
    },
};

use super::{
    models::{
        CacheConfig, Config, ConfigMetadata, CorsConfig, ServerConfig,
        TmdbConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigWarnings},
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then the TOML file, then the environment, in increasing
    /// precedence.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env_config = EnvConfig::gather();
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        Ok(compose_config(
            file_config,
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        ))
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Merge file and environment values over the built-in defaults.
/// Environment values win over file values.
pub fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> ConfigLoad {
    let mut warnings = ConfigWarnings::default();

    if metadata.config_path.is_none() {
        warnings.push_with_hint(
            "No marquee.toml detected; using environment and defaults",
            "Pass --config or set MARQUEE_CONFIG to a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        tmdb: file_tmdb,
        cache: file_cache,
        cors: file_cors,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let tmdb = TmdbConfig {
        api_key: env
            .tmdb_api_key
            .or(file_tmdb.api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty()),
        base_url: env
            .tmdb_base_url
            .or(file_tmdb.base_url)
            .unwrap_or_else(|| TMDB_V3_BASE.to_string()),
        language: env
            .tmdb_language
            .or(file_tmdb.language)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        min_vote_count: env
            .tmdb_min_vote_count
            .or(file_tmdb.min_vote_count)
            .unwrap_or(DEFAULT_MIN_VOTE_COUNT),
        timeout: env
            .tmdb_timeout_secs
            .or(file_tmdb.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    };

    let cache = CacheConfig {
        capacity: env
            .cache_capacity
            .or(file_cache.capacity)
            .unwrap_or(DEFAULT_CACHE_CAPACITY),
        ttl: env
            .cache_ttl_secs
            .or(file_cache.ttl_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_default(),
    };

    let config = Config {
        server,
        tmdb,
        cache,
        cors,
        dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
        metadata,
    };

    warnings.items.extend(validation::validate(&config).items);

    ConfigLoad { config, warnings }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to load .env file")]
    EnvFile(#[from] dotenvy::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::sources::{FileServerConfig, FileTmdbConfig};

    fn metadata_with_file() -> ConfigMetadata {
        ConfigMetadata {
            config_path: Some(PathBuf::from("marquee.toml")),
            env_file_loaded: false,
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let ConfigLoad { config, warnings } = compose_config(
            None,
            EnvConfig::default(),
            ConfigMetadata::default(),
        );

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.tmdb.base_url, TMDB_V3_BASE);
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.min_vote_count, 50);
        assert_eq!(config.tmdb.timeout, Duration::from_secs(10));
        assert_eq!(config.cache.capacity, 64);
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert!(config.cors.allowed_origins.is_empty());
        assert!(!config.dev_mode);

        // missing file + missing api key
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = FileConfig {
            server: FileServerConfig {
                host: Some("127.0.0.1".to_string()),
                port: Some(9000),
            },
            tmdb: FileTmdbConfig {
                api_key: Some("file-key".to_string()),
                language: Some("de-DE".to_string()),
                ..FileTmdbConfig::default()
            },
            ..FileConfig::default()
        };
        let env = EnvConfig {
            server_port: Some(9100),
            tmdb_api_key: Some("env-key".to_string()),
            cache_ttl_secs: Some(5),
            ..EnvConfig::default()
        };

        let ConfigLoad { config, warnings } =
            compose_config(Some(file), env, metadata_with_file());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.tmdb.language, "de-DE");
        assert_eq!(config.cache.ttl, Duration::from_secs(5));
        assert!(warnings.is_empty());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let env = EnvConfig {
            tmdb_api_key: Some("   ".to_string()),
            ..EnvConfig::default()
        };
        let ConfigLoad { config, warnings } =
            compose_config(None, env, metadata_with_file());

        assert!(config.tmdb.api_key.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].message.contains("TMDB_API_KEY"));
    }

    #[test]
    fn explicit_missing_config_path_is_an_error() {
        let err = ConfigLoader::new()
            .with_config_path("/nonexistent/marquee.toml")
            .load_file_config(&EnvConfig::default())
            .expect_err("missing explicit file");
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }
}
