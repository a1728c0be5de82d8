//! Layered server configuration: `.env`, an optional `marquee.toml`, then
//! environment variables. CLI flags are applied on top by the binary.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, compose_config};
pub use models::{
    CacheConfig, Config, ConfigMetadata, CorsConfig, ServerConfig, TmdbConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
