//! # Marquee Server
//!
//! Binary entry point: loads configuration, installs tracing, wires the TMDB
//! provider behind the page cache and serves the catalog API.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use marquee_server::{
    AppState, create_app,
    infra::config::{ConfigLoad, ConfigLoader},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee-server")]
#[command(about = "Read-only movie catalog API with genre summaries")]
struct Cli {
    /// Path to a marquee.toml configuration file
    #[arg(short, long, env = "MARQUEE_CONFIG")]
    config: Option<PathBuf>,

    /// Path to an env file loaded before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Allow any CORS origin
    #[arg(long, default_value_t = false)]
    dev: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = cli.env_file.clone() {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if cli.dev {
        config.dev_mode = true;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(
                    message = %warning.message,
                    hint = %hint,
                    "configuration warning"
                )
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    info!(
        tmdb.base_url = %config.tmdb.base_url,
        tmdb.language = %config.tmdb.language,
        tmdb.min_vote_count = config.tmdb.min_vote_count,
        cache.capacity = config.cache.capacity,
        cache.ttl_secs = config.cache.ttl.as_secs(),
        dev_mode = config.dev_mode,
        "configuration in effect"
    );

    let bind_address = config.server.bind_address();
    let state = AppState::from_config(config)
        .context("failed to initialize TMDB provider")?;
    let router = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    let addr = listener.local_addr()?;
    info!("Starting Marquee movie catalog on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
