use axum::{Router, routing::get};

use crate::{
    AppState,
    handlers::{
        health_handler, list_movies_handler, movies_summary_handler,
        ping_handler,
    },
};

pub const MOVIES: &str = "/api/movies";
pub const MOVIES_SUMMARY: &str = "/api/movies/summary";
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

/// Movie catalog routes. Both the bare and trailing-slash forms resolve.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(MOVIES, get(list_movies_handler))
        .route("/api/movies/", get(list_movies_handler))
        .route(MOVIES_SUMMARY, get(movies_summary_handler))
        .route("/api/movies/summary/", get(movies_summary_handler))
}

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route(PING, get(ping_handler))
        .route(HEALTH, get(health_handler))
}
