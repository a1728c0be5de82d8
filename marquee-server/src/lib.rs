//! # Marquee Server
//!
//! Read-only movie catalog API. Each request pulls one popularity-ordered
//! page from TMDB, then filters, sorts and either slices or summarizes it.
//!
//! ## Routes
//!
//! - `GET /api/movies`: `page`, `limit`, `sort`, `filter`
//! - `GET /api/movies/summary`: `page`, `sort`, `filter`
//! - `GET /ping` and `GET /health`

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use infra::app_state::AppState;

/// Assemble the full router with CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    // Permissive in dev, allow-list otherwise
    let cors_layer = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        let allow_origin = if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(AllowMethods::list([
                axum::http::Method::GET,
                axum::http::Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::any())
    };

    Router::new()
        .merge(routes::create_api_router())
        .merge(routes::create_health_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}
