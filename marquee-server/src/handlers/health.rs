use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

/// Liveness probe
pub async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Marquee movie catalog is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness with page cache occupancy
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let stats = state.page_cache.stats();

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "cache": {
                "entries": stats.entries,
                "capacity": stats.capacity,
                "ttl_secs": stats.ttl.as_secs(),
            },
            "tmdb": {
                "api_key_configured": state.config.tmdb.api_key.is_some(),
            },
        },
    }))
}
